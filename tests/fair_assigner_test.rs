// ==========================================
// FairAssigner 引擎集成测试
// ==========================================
// 测试目标: 验证月度分组 → 公平分配链路
// 覆盖范围: 均摊、并列取人顺序、守恒、时间序
// ==========================================

use chrono::NaiveDate;
use pharmacy_scheduler::{Assignment, FairAssigner, MonthGrouper, StockItem};
use std::collections::HashMap;

// ==========================================
// 测试辅助函数
// ==========================================

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn roster(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

/// 分组 + 分配一步到位
fn group_and_assign(
    items: &[StockItem],
    workers: &[String],
) -> (Vec<Assignment>, Vec<u32>) {
    let buckets = MonthGrouper::new().group(items);
    let (assignments, ledger) = FairAssigner::new().assign(&buckets, workers);
    let burdens = ledger.loads().iter().map(|l| l.burden).collect();
    (assignments, burdens)
}

/// 按条目求和分配数量
fn totals_by_item(assignments: &[Assignment]) -> HashMap<String, u32> {
    let mut totals = HashMap::new();
    for a in assignments {
        *totals.entry(a.item_id.clone()).or_insert(0) += a.quantity;
    }
    totals
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_quantity_three_across_three_dispensers() {
    // 场景: 数量 3,发药员 3 人 → 每人 1,负担 [1,1,1]
    let items = vec![StockItem::new("a", ymd(2026, 9, 20), 3)];
    let workers = roster(&["w1", "w2", "w3"]);

    let (assignments, burdens) = group_and_assign(&items, &workers);

    assert_eq!(assignments.len(), 3);
    let pairs: Vec<(&str, u32)> = assignments
        .iter()
        .map(|a| (a.dispenser_id.as_str(), a.quantity))
        .collect();
    assert_eq!(pairs, vec![("w1", 1), ("w2", 1), ("w3", 1)]);
    assert_eq!(burdens, vec![1, 1, 1]);
}

#[test]
fn test_quantity_ten_across_two_dispensers() {
    // 场景: 数量 10,两人并列 → assignCount=2, perShare=5 → 各 5
    let items = vec![StockItem::new("a", ymd(2026, 10, 1), 10)];
    let workers = roster(&["w1", "w2"]);

    let (assignments, burdens) = group_and_assign(&items, &workers);

    assert_eq!(assignments.len(), 2);
    assert!(assignments.iter().all(|a| a.quantity == 5));
    assert_eq!(burdens, vec![5, 5]);
}

#[test]
fn test_conservation_over_mixed_quantities() {
    // 守恒: 每个条目的分配之和恰好等于条目数量
    let items = vec![
        StockItem::new("a", ymd(2026, 9, 3), 13),
        StockItem::new("b", ymd(2026, 9, 18), 1),
        StockItem::new("c", ymd(2026, 11, 2), 7),
        StockItem::new("d", ymd(2026, 10, 9), 42),
    ];
    let workers = roster(&["w1", "w2", "w3"]);

    let (assignments, burdens) = group_and_assign(&items, &workers);

    let totals = totals_by_item(&assignments);
    assert_eq!(totals["a"], 13);
    assert_eq!(totals["b"], 1);
    assert_eq!(totals["c"], 7);
    assert_eq!(totals["d"], 42);
    // 台账总量 = 条目总量
    assert_eq!(burdens.iter().sum::<u32>(), 13 + 1 + 7 + 42);
    // 每条记录数量为正
    assert!(assignments.iter().all(|a| a.quantity > 0));
}

#[test]
fn test_month_keys_appear_in_chronological_order() {
    // 输出中的月份键严格单调不减
    let items = vec![
        StockItem::new("nov", ymd(2026, 11, 5), 2),
        StockItem::new("sep", ymd(2026, 9, 12), 3),
        StockItem::new("jan", ymd(2027, 1, 8), 2),
    ];
    let workers = roster(&["w1", "w2"]);

    let (assignments, _) = group_and_assign(&items, &workers);

    let keys: Vec<&str> = assignments.iter().map(|a| a.month_key.as_str()).collect();
    let mut sorted_keys = keys.clone();
    sorted_keys.sort();
    assert_eq!(keys, sorted_keys, "月份键必须按时间序出现: {:?}", keys);
    assert_eq!(assignments[0].month_key, "2026-09");
    assert_eq!(assignments.last().unwrap().month_key, "2027-01");
}

#[test]
fn test_soonest_expiry_gets_least_burdened_first() {
    // 同月内效期最早的条目先占用最空闲的发药员
    let items = vec![
        StockItem::new("late", ymd(2026, 9, 25), 1),
        StockItem::new("early", ymd(2026, 9, 2), 1),
    ];
    let workers = roster(&["w1", "w2"]);

    let (assignments, _) = group_and_assign(&items, &workers);

    // early 先处理,拿到名册第一位 w1
    assert_eq!(assignments[0].item_id, "early");
    assert_eq!(assignments[0].dispenser_id, "w1");
    assert_eq!(assignments[1].item_id, "late");
    assert_eq!(assignments[1].dispenser_id, "w2");
}

#[test]
fn test_unit_quantity_stream_stays_balanced() {
    // 单位数量条目流: 任意时刻 max-min ≤ 1 (终态校验)
    let items: Vec<StockItem> = (0..25)
        .map(|i| StockItem::new(format!("I{:02}", i), ymd(2026, 9, 1) + chrono::Duration::days(i), 1))
        .collect();
    let workers = roster(&["w1", "w2", "w3", "w4"]);

    let (_, burdens) = group_and_assign(&items, &workers);

    let max = *burdens.iter().max().unwrap();
    let min = *burdens.iter().min().unwrap();
    assert!(max - min <= 1, "负担失衡: {:?}", burdens);
    assert_eq!(burdens.iter().sum::<u32>(), 25);
}

// ==========================================
// 药房效期排班系统 - 月度分组引擎
// ==========================================
// 职责: 按效期年月分组合格条目,组间升序、组内效期最早者在前
// 输入: 合格条目列表
// 输出: 有序月度分组列表
// ==========================================
// 组内顺序直接决定谁先占用最空闲的发药员 (见 fair_assigner)
// ==========================================

use crate::domain::item::StockItem;
use crate::domain::schedule::MonthBucket;
use chrono::NaiveDate;
use std::collections::BTreeMap;

// ==========================================
// MonthGrouper - 月度分组引擎
// ==========================================
pub struct MonthGrouper {
    // 无状态引擎,不需要注入依赖
}

impl MonthGrouper {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 按效期年月分组
    ///
    /// # 参数
    /// - `items`: 合格条目列表
    ///
    /// # 返回
    /// 月度分组列表,月份键升序,组内按效期升序 (稳定排序,同日保持输入序)
    pub fn group(&self, items: &[StockItem]) -> Vec<MonthBucket> {
        // BTreeMap 按键升序;YYYY-MM 零填充,字典序即时间序
        let mut buckets: BTreeMap<String, Vec<StockItem>> = BTreeMap::new();

        for item in items {
            buckets
                .entry(Self::month_key(item.expiry_date))
                .or_default()
                .push(item.clone());
        }

        buckets
            .into_iter()
            .map(|(month_key, mut items)| {
                items.sort_by_key(|item| item.expiry_date);
                MonthBucket { month_key, items }
            })
            .collect()
    }

    /// 月份键: 效期的 YYYY-MM 表示
    pub fn month_key(date: NaiveDate) -> String {
        date.format("%Y-%m").to_string()
    }
}

impl Default for MonthGrouper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(id: &str, expiry: NaiveDate) -> StockItem {
        StockItem::new(id, expiry, 1)
    }

    #[test]
    fn test_month_key_is_zero_padded() {
        assert_eq!(MonthGrouper::month_key(ymd(2026, 3, 5)), "2026-03");
        assert_eq!(MonthGrouper::month_key(ymd(2026, 11, 30)), "2026-11");
    }

    #[test]
    fn test_buckets_sorted_chronologically() {
        let grouper = MonthGrouper::new();
        let items = vec![
            item("C", ymd(2026, 11, 2)),
            item("A", ymd(2026, 4, 10)),
            item("B", ymd(2026, 9, 1)),
        ];

        let buckets = grouper.group(&items);
        let keys: Vec<&str> = buckets.iter().map(|b| b.month_key.as_str()).collect();
        assert_eq!(keys, vec!["2026-04", "2026-09", "2026-11"]);
    }

    #[test]
    fn test_items_sorted_soonest_first_within_bucket() {
        let grouper = MonthGrouper::new();
        let items = vec![
            item("late", ymd(2026, 5, 28)),
            item("early", ymd(2026, 5, 3)),
            item("mid", ymd(2026, 5, 15)),
        ];

        let buckets = grouper.group(&items);
        assert_eq!(buckets.len(), 1);
        let ids: Vec<&str> = buckets[0].items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["early", "mid", "late"]);
    }

    #[test]
    fn test_same_day_keeps_input_order() {
        let grouper = MonthGrouper::new();
        let items = vec![
            item("first", ymd(2026, 5, 10)),
            item("second", ymd(2026, 5, 10)),
        ];

        let buckets = grouper.group(&items);
        let ids: Vec<&str> = buckets[0].items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_year_boundary_orders_across_years() {
        let grouper = MonthGrouper::new();
        let items = vec![
            item("jan", ymd(2027, 1, 5)),
            item("dec", ymd(2026, 12, 20)),
        ];

        let buckets = grouper.group(&items);
        let keys: Vec<&str> = buckets.iter().map(|b| b.month_key.as_str()).collect();
        assert_eq!(keys, vec!["2026-12", "2027-01"]);
    }
}

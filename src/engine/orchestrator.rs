// ==========================================
// 药房效期排班系统 - 引擎编排器
// ==========================================
// 用途: 协调两条独立流水线的执行
//   流水线 A (数量级公平): 准入过滤 → 月度分组 → 公平分配
//   流水线 B (条目级切批): 周批次 + 顺延
// 红线: 要么产出完整一致的结果,要么在任何分配发生前
//       以校验错误失败,绝不部分提交
// ==========================================

use crate::config::SchedulerConfig;
use crate::domain::item::StockItem;
use crate::domain::schedule::{
    Assignment, DispenserLoad, ExcludedItem, RolloverNotification, WeeklyAssignment,
};
use crate::engine::error::{EngineResult, ScheduleError};
use crate::engine::expiry_filter::ExpiryFilter;
use crate::engine::fair_assigner::FairAssigner;
use crate::engine::month_grouper::MonthGrouper;
use crate::engine::weekly_batcher::{WeeklyBatchResult, WeeklyBatcher};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

// ==========================================
// FairAssignmentResult - 公平分配流水线结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairAssignmentResult {
    pub assignments: Vec<Assignment>,
    pub excluded_items: Vec<ExcludedItem>,
    pub dispenser_loads: Vec<DispenserLoad>,
}

// ==========================================
// ScheduleOutcome - 完整排班结果
// ==========================================
// 两条流水线的产出合并;空集合是合法结果,
// 调用方按集合是否为空分支,而不是捕获错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    // 流水线 A 输出
    pub assignments: Vec<Assignment>,
    pub excluded_items: Vec<ExcludedItem>,
    pub dispenser_loads: Vec<DispenserLoad>,

    // 流水线 B 输出
    pub weekly_assignments: Vec<WeeklyAssignment>,
    pub rollover_notifications: Vec<RolloverNotification>,
}

// ==========================================
// ScheduleOrchestrator - 引擎编排器
// ==========================================
pub struct ScheduleOrchestrator {
    filter: ExpiryFilter,
    grouper: MonthGrouper,
    assigner: FairAssigner,
    batcher: WeeklyBatcher,
}

impl ScheduleOrchestrator {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 排班参数
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            filter: ExpiryFilter::new(config),
            grouper: MonthGrouper::new(),
            assigner: FairAssigner::new(),
            batcher: WeeklyBatcher::new(config),
        }
    }

    /// 执行完整排班 (两条流水线)
    ///
    /// # 参数
    /// - `items`: 库存条目列表
    /// - `roster`: 发药员名册 (顺序有意义)
    /// - `today`: 当前日期,同时作为周批次起始日期
    ///
    /// # 返回
    /// 完整排班结果;输入非法时返回校验错误,不产生任何分配
    #[instrument(skip(self, items, roster), fields(
        items_count = items.len(),
        roster_count = roster.len(),
        today = %today
    ))]
    pub fn run(
        &self,
        items: &[StockItem],
        roster: &[String],
        today: NaiveDate,
    ) -> EngineResult<ScheduleOutcome> {
        info!(
            items_count = items.len(),
            roster_count = roster.len(),
            "开始执行排班"
        );

        // ==========================================
        // 步骤 0: 输入校验 (两条流水线共用,先于一切分配)
        // ==========================================
        Self::validate_items(items)?;

        // ==========================================
        // 流水线 A: 准入过滤 → 月度分组 → 公平分配
        // ==========================================
        let fair = self.fair_assignment(items, roster, today);

        // ==========================================
        // 流水线 B: 周批次 + 顺延
        // ==========================================
        let weekly = self.batcher.batch(items, today);

        info!(
            assignments_count = fair.assignments.len(),
            excluded_count = fair.excluded_items.len(),
            weekly_count = weekly.weekly_assignments.len(),
            rollover_count = weekly.rollover_notifications.len(),
            "排班完成"
        );

        Ok(ScheduleOutcome {
            assignments: fair.assignments,
            excluded_items: fair.excluded_items,
            dispenser_loads: fair.dispenser_loads,
            weekly_assignments: weekly.weekly_assignments,
            rollover_notifications: weekly.rollover_notifications,
        })
    }

    /// 仅执行公平分配流水线
    pub fn run_fair_assignment(
        &self,
        items: &[StockItem],
        roster: &[String],
        today: NaiveDate,
    ) -> EngineResult<FairAssignmentResult> {
        Self::validate_items(items)?;
        Ok(self.fair_assignment(items, roster, today))
    }

    /// 仅执行周批次流水线
    pub fn run_weekly_batching(
        &self,
        items: &[StockItem],
        start_date: NaiveDate,
    ) -> EngineResult<WeeklyBatchResult> {
        Self::validate_items(items)?;
        Ok(self.batcher.batch(items, start_date))
    }

    // ==========================================
    // 内部方法
    // ==========================================

    /// 流水线 A 主体 (输入已校验)
    fn fair_assignment(
        &self,
        items: &[StockItem],
        roster: &[String],
        today: NaiveDate,
    ) -> FairAssignmentResult {
        // 步骤 1: 效期准入
        let (eligible, excluded_items) = self.filter.filter(items, roster, today);
        debug!(eligible_count = eligible.len(), "准入过滤完成");

        // 步骤 2: 月度分组
        let buckets = self.grouper.group(&eligible);
        debug!(buckets_count = buckets.len(), "月度分组完成");

        // 步骤 3: 公平分配
        let (assignments, ledger) = self.assigner.assign(&buckets, roster);

        FairAssignmentResult {
            assignments,
            excluded_items,
            dispenser_loads: ledger.loads(),
        }
    }

    /// 输入校验: 数量必须为正
    ///
    /// 数量为 0 会破坏守恒不变量,必须在任何分配前整体拒绝
    fn validate_items(items: &[StockItem]) -> EngineResult<()> {
        for item in items {
            if item.quantity == 0 {
                return Err(ScheduleError::InvalidQuantity {
                    item_id: item.item_id.clone(),
                    quantity: 0,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_quantity_fails_before_any_allocation() {
        let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default());
        let items = vec![
            StockItem::new("ok", ymd(2026, 9, 1), 2),
            StockItem::new("bad", ymd(2026, 9, 2), 0),
        ];
        let roster = vec!["w1".to_string()];

        let err = orchestrator.run(&items, &roster, ymd(2026, 7, 1)).unwrap_err();
        match err {
            ScheduleError::InvalidQuantity { item_id, quantity } => {
                assert_eq!(item_id, "bad");
                assert_eq!(quantity, 0);
            }
            other => panic!("期望 InvalidQuantity,得到 {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_inputs_are_data_not_errors() {
        let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default());

        // 空条目
        let outcome = orchestrator
            .run(&[], &["w1".to_string()], ymd(2026, 7, 1))
            .unwrap();
        assert!(outcome.assignments.is_empty());
        assert!(outcome.weekly_assignments.is_empty());
        // 名册仍有快照
        assert_eq!(outcome.dispenser_loads.len(), 1);
        assert_eq!(outcome.dispenser_loads[0].burden, 0);

        // 空名册: 全部排除,不报错
        let items = vec![StockItem::new("A", ymd(2026, 9, 1), 3)];
        let outcome = orchestrator.run(&items, &[], ymd(2026, 7, 1)).unwrap();
        assert!(outcome.assignments.is_empty());
        assert_eq!(outcome.excluded_items.len(), 1);
    }
}

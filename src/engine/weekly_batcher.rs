// ==========================================
// 药房效期排班系统 - 周批次引擎
// ==========================================
// 红线: 周批次长度不得超过周容量;顺延目标
//       恒为下一个自然月第 1 周,不得跳月
// ==========================================
// 职责: 按效期排序全部条目,切成每周一批,
//       第 4 周之后的剩余条目顺延到下月第 1 周并发出通知
// 输入: 全量条目列表 (不经准入过滤) + 起始日期
// 输出: 周批次列表 + 顺延通知列表
// ==========================================
// 状态机: BATCHING(month, week)
// - 整批消费完且还有剩余: week < 4 → week+1;
//   week = 4 → 发顺延通知, 进入 (下月, week 1)
// - 出现不满一批或条目耗尽 → DONE
// 没有其他状态和迁移
// ==========================================
// 与公平分配是两条独立流水线: 这里条目是原子单位,
// 数量不拆分
// ==========================================

use crate::config::SchedulerConfig;
use crate::domain::item::StockItem;
use crate::domain::schedule::{RolloverNotification, WeeklyAssignment};
use crate::engine::month_grouper::MonthGrouper;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

// ==========================================
// WeeklyBatchResult - 周批次结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyBatchResult {
    pub weekly_assignments: Vec<WeeklyAssignment>,
    pub rollover_notifications: Vec<RolloverNotification>,
}

// ==========================================
// WeeklyBatcher - 周批次引擎
// ==========================================
pub struct WeeklyBatcher {
    config: SchedulerConfig,
}

impl WeeklyBatcher {
    /// 构造函数
    ///
    /// # 参数
    /// - config: 排班参数 (周容量/每月周数)
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 切周批次
    ///
    /// # 参数
    /// - `items`: 全量条目列表 (条目为原子单位)
    /// - `start_date`: 起始日期,首批归属其所在自然月
    ///
    /// # 返回
    /// 周批次结果 (批次列表 + 顺延通知列表)
    #[instrument(skip(self, items), fields(items_count = items.len(), start_date = %start_date))]
    pub fn batch(&self, items: &[StockItem], start_date: NaiveDate) -> WeeklyBatchResult {
        let mut weekly_assignments = Vec::new();
        let mut rollover_notifications = Vec::new();

        if self.config.week_capacity == 0 {
            warn!("周容量为 0,无法切批");
            return WeeklyBatchResult {
                weekly_assignments,
                rollover_notifications,
            };
        }

        // 步骤 1: 全量按效期升序 (稳定排序,同日保持输入序)
        let mut sorted: Vec<StockItem> = items.to_vec();
        sorted.sort_by_key(|item| item.expiry_date);

        // 步骤 2-5: 逐批消费
        let mut month_anchor = Self::first_of_month(start_date);
        let mut week = 1u32;
        let mut cursor = 0usize;

        while cursor < sorted.len() {
            let end = (cursor + self.config.week_capacity).min(sorted.len());
            let chunk = &sorted[cursor..end];
            cursor = end;

            weekly_assignments.push(WeeklyAssignment {
                month_key: MonthGrouper::month_key(month_anchor),
                week_number: week,
                products: chunk.to_vec(),
            });
            debug!(
                month_key = %MonthGrouper::month_key(month_anchor),
                week,
                chunk_len = chunk.len(),
                "周批次生成"
            );

            // 不满一批 → 终止 (这就是唯一允许的 "短周")
            if chunk.len() < self.config.week_capacity {
                break;
            }

            // 条目耗尽 → 终止,不发空顺延
            if cursor >= sorted.len() {
                break;
            }

            if week < self.config.weeks_per_month {
                week += 1;
            } else {
                // 第 4 周已满且仍有剩余 → 顺延到下月第 1 周
                let next_month = Self::first_of_next_month(month_anchor);
                let rolled_ids: Vec<String> = sorted[cursor..]
                    .iter()
                    .map(|item| item.item_id.clone())
                    .collect();
                debug!(
                    from_month = %MonthGrouper::month_key(month_anchor),
                    to_month = %MonthGrouper::month_key(next_month),
                    rolled_count = rolled_ids.len(),
                    "周批次顺延"
                );
                rollover_notifications.push(RolloverNotification {
                    from_month: MonthGrouper::month_key(month_anchor),
                    from_week: week,
                    to_month: MonthGrouper::month_key(next_month),
                    to_week: 1,
                    product_ids: rolled_ids,
                });
                month_anchor = next_month;
                week = 1;
            }
        }

        WeeklyBatchResult {
            weekly_assignments,
            rollover_notifications,
        }
    }

    // ==========================================
    // 纯函数
    // ==========================================

    /// 所在自然月的 1 号
    fn first_of_month(date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }

    /// 下一个自然月的 1 号
    ///
    /// 先回到 1 号再加一个月,避免月末/闰年溢出
    fn first_of_next_month(date: NaiveDate) -> NaiveDate {
        let first = Self::first_of_month(date);
        first
            .checked_add_months(Months::new(1))
            .unwrap_or(first)
    }
}

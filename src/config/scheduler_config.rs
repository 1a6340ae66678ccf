// ==========================================
// 药房效期排班系统 - 排班参数配置
// ==========================================
// 职责: 集中管理排班阈值,默认值即业务规则
// 红线: 引擎不读环境、不读时钟,所有参数显式传入
// ==========================================

use serde::{Deserialize, Serialize};

/// 排班参数 (阈值/容量)
///
/// 默认值:
/// - 最小剩余效期 30 天
/// - 每周批次容量 7 条
/// - 每月 4 周,第 4 周满后顺延到下月第 1 周
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// 准入所需的最小剩余效期 (天)
    #[serde(default = "default_min_shelf_life_days")]
    pub min_shelf_life_days: i64,

    /// 周批次容量 (条目数,不拆分数量)
    #[serde(default = "default_week_capacity")]
    pub week_capacity: usize,

    /// 每月周数,超出即顺延
    #[serde(default = "default_weeks_per_month")]
    pub weeks_per_month: u32,
}

fn default_min_shelf_life_days() -> i64 {
    30
}

fn default_week_capacity() -> usize {
    7
}

fn default_weeks_per_month() -> u32 {
    4
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_shelf_life_days: default_min_shelf_life_days(),
            week_capacity: default_week_capacity(),
            weeks_per_month: default_weeks_per_month(),
        }
    }
}

// ==========================================
// 药房效期排班系统 - 领域类型定义
// ==========================================
// 红线: 排除原因是枚举码,不是自由文本
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 排除原因 (Exclusion Reason)
// ==========================================
// 序列化格式: snake_case (与下游报表一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    ExpiresThisMonth,      // 本月内到期,不再分配
    InsufficientShelfLife, // 剩余效期不足阈值
    NoWorkersAvailable,    // 发药员名册为空
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::ExpiresThisMonth => write!(f, "expires_this_month"),
            ExclusionReason::InsufficientShelfLife => write!(f, "insufficient_shelf_life"),
            ExclusionReason::NoWorkersAvailable => write!(f, "no_workers_available"),
        }
    }
}

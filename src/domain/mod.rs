// ==========================================
// 药房效期排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含引擎逻辑,不含 I/O
// ==========================================

pub mod item;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use item::{RawItemRecord, StockItem};
pub use schedule::{
    Assignment, DispenserLoad, ExcludedItem, MonthBucket, RolloverNotification, WeeklyAssignment,
};
pub use types::ExclusionReason;

// ==========================================
// 药房效期排班系统 - 核心库
// ==========================================
// 系统定位: 效期感知的公平分配与周滚动排班核心
// 红线: 核心纯计算、无 I/O、不读系统时钟,
//       当前日期永远由调用方提供
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排班规则
pub mod engine;

// 配置层 - 排班参数
pub mod config;

// 导入层 - 外部库存数据
pub mod importer;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Assignment, DispenserLoad, ExcludedItem, ExclusionReason, MonthBucket, RawItemRecord,
    RolloverNotification, StockItem, WeeklyAssignment,
};

// 引擎
pub use engine::{
    BurdenLedger, EngineResult, ExpiryFilter, FairAssigner, FairAssignmentResult, MonthGrouper,
    ScheduleError, ScheduleOrchestrator, ScheduleOutcome, WeeklyBatchResult, WeeklyBatcher,
};

// 配置
pub use config::SchedulerConfig;

// 导入
pub use importer::{InventoryImporter, RawScheduleRequest, ScheduleRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "药房效期排班系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

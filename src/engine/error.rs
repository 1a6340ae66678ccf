// ==========================================
// 药房效期排班系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 只有调用方契约违规才是错误;
//       名册为空、无合格条目等预期情形一律以空数据表达
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum ScheduleError {
    // ===== 调用方契约违规 =====
    #[error("数量非法: item_id={item_id}, quantity={quantity}")]
    InvalidQuantity { item_id: String, quantity: i64 },

    #[error("日期非法 (field={field}): {value}")]
    InvalidDate { field: String, value: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, ScheduleError>;

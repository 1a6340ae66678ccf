// ==========================================
// 药房效期排班系统 - 库存条目实体
// ==========================================
// 职责: 定义药品库存条目及其导入原始记录
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// StockItem - 药品库存条目 (已校验)
// ==========================================
// 一次排班调用期间由调用方持有,本身不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    /// 条目标识 (对核心不透明,来自库存子系统)
    pub item_id: String,

    /// 效期 (到期日)
    pub expiry_date: NaiveDate,

    /// 库存数量 (校验后恒 > 0)
    pub quantity: u32,
}

impl StockItem {
    /// 构造库存条目
    pub fn new(item_id: impl Into<String>, expiry_date: NaiveDate, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            expiry_date,
            quantity,
        }
    }
}

// ==========================================
// RawItemRecord - 导入原始记录 (未校验)
// ==========================================
// 来自外部库存源的一行,字段未经解析
// 只有 importer 能把它转成 StockItem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItemRecord {
    pub item_id: String,

    /// 效期字符串 (ISO-8601, 如 "2026-09-15")
    pub expiry_date: String,

    /// 原始数量 (允许非法值,由校验拒绝)
    pub quantity: i64,
}

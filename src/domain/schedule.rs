// ==========================================
// 药房效期排班系统 - 排班产出实体
// ==========================================
// 职责: 定义两条排班流水线的产出记录
// 红线: 同一 (发药员, 条目) 允许多条分配记录,
//       下游必须求和,不得覆盖
// ==========================================

use crate::domain::item::StockItem;
use crate::domain::types::ExclusionReason;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Assignment - 数量级分配记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// 发药员标识 (来自用户/角色子系统,对核心不透明)
    pub dispenser_id: String,

    /// 条目标识
    pub item_id: String,

    /// 效期月份键 (YYYY-MM)
    pub month_key: String,

    /// 本条记录分配的数量 (恒 > 0)
    pub quantity: u32,
}

// ==========================================
// ExcludedItem - 被排除条目
// ==========================================
// 供运营侧报表使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedItem {
    pub item_id: String,
    pub expiry_date: NaiveDate,
    pub quantity: u32,
    pub reason: ExclusionReason,
}

// ==========================================
// MonthBucket - 月度分组
// ==========================================
// 键升序、组内按效期升序,由 MonthGrouper 保证
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// 月份键 (YYYY-MM, 零填充,字典序即时间序)
    pub month_key: String,

    /// 组内条目 (效期最早者在前)
    pub items: Vec<StockItem>,
}

// ==========================================
// DispenserLoad - 发药员负担快照
// ==========================================
// 按名册输入顺序输出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispenserLoad {
    pub dispenser_id: String,

    /// 单次排班内累计分配数量
    pub burden: u32,
}

// ==========================================
// WeeklyAssignment - 周批次
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAssignment {
    /// 批次所属月份键 (YYYY-MM)
    pub month_key: String,

    /// 周序号, 取值 [1, 4]
    pub week_number: u32,

    /// 本周条目 (有序, 长度 ≤ 周容量)
    pub products: Vec<StockItem>,
}

// ==========================================
// RolloverNotification - 顺延通知
// ==========================================
// to_month 恒为 from_month 的下一个自然月, to_week 恒为 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverNotification {
    pub from_month: String,
    pub from_week: u32,
    pub to_month: String,
    pub to_week: u32,

    /// 顺延条目的标识列表
    pub product_ids: Vec<String>,
}

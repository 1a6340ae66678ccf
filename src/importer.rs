// ==========================================
// 药房效期排班系统 - 库存导入层
// ==========================================
// 职责: 解析外部库存源的排班请求 (JSON) 并校验为领域类型
// 红线: 原始字符串只在这里变成领域类型;
//       非法记录整体拒绝,不静默丢弃、不修补
// ==========================================

use crate::domain::item::{RawItemRecord, StockItem};
use crate::engine::error::{EngineResult, ScheduleError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ==========================================
// RawScheduleRequest - 原始排班请求 (未校验)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScheduleRequest {
    /// 当前日期字符串 (ISO-8601),排班核心不读系统时钟
    pub today: String,

    /// 发药员名册 (顺序有意义)
    pub dispensers: Vec<String>,

    /// 原始库存记录
    pub items: Vec<RawItemRecord>,
}

// ==========================================
// ScheduleRequest - 已校验排班请求
// ==========================================
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub today: NaiveDate,
    pub dispensers: Vec<String>,
    pub items: Vec<StockItem>,
}

// ==========================================
// InventoryImporter - 库存导入器
// ==========================================
pub struct InventoryImporter;

impl InventoryImporter {
    /// 解析并校验排班请求
    ///
    /// # 参数
    /// - `json`: 排班请求 JSON 文本
    ///
    /// # 返回
    /// - 已校验请求;任何一条记录非法即整体失败
    ///
    /// # 流程
    /// 1. JSON → RawScheduleRequest
    /// 2. 日期解析 (InvalidDate)
    /// 3. 数量校验 (InvalidQuantity)
    pub fn parse_request(json: &str) -> EngineResult<ScheduleRequest> {
        let raw: RawScheduleRequest = serde_json::from_str(json)
            .map_err(|e| ScheduleError::Other(anyhow::anyhow!("请求 JSON 解析失败: {}", e)))?;
        Self::validate_request(raw)
    }

    /// 校验原始请求
    pub fn validate_request(raw: RawScheduleRequest) -> EngineResult<ScheduleRequest> {
        let today = Self::parse_date("today", &raw.today)?;

        let mut items = Vec::with_capacity(raw.items.len());
        for record in &raw.items {
            items.push(Self::validate_record(record)?);
        }

        debug!(
            items_count = items.len(),
            dispensers_count = raw.dispensers.len(),
            "排班请求校验通过"
        );

        Ok(ScheduleRequest {
            today,
            dispensers: raw.dispensers,
            items,
        })
    }

    /// 校验单条库存记录
    pub fn validate_record(record: &RawItemRecord) -> EngineResult<StockItem> {
        if record.quantity <= 0 {
            return Err(ScheduleError::InvalidQuantity {
                item_id: record.item_id.clone(),
                quantity: record.quantity,
            });
        }

        let expiry_date = Self::parse_date("expiry_date", &record.expiry_date)?;

        Ok(StockItem {
            item_id: record.item_id.clone(),
            expiry_date,
            quantity: record.quantity as u32,
        })
    }

    /// 解析 ISO-8601 日期
    fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
        value.parse::<NaiveDate>().map_err(|_| ScheduleError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

// ==========================================
// 药房效期排班系统 - 效期准入引擎
// ==========================================
// 红线: 本月到期与效期不足的药品不得进入分配池
// ==========================================
// 职责: 把库存条目划分为合格/排除两类,并给出排除原因码
// 输入: 库存条目列表 + 发药员名册 + 调用方提供的当前日期
// 输出: (合格条目, 排除条目+原因)
// ==========================================
// 判定优先级 (固定,不可调序):
// 1) 名册为空 → 全部 no_workers_available,跳过日期判定
// 2) 效期落在当前自然月 → expires_this_month
// 3) 剩余天数 < 阈值 → insufficient_shelf_life
// 4) 其余 → 合格
//
// 注意: 规则 2 先于规则 3,月界处存在不连续
// (跨入下月、剩 31 天的条目合格;本月内、剩 35 天的条目被排除)。
// 这是既定业务规则,不得"修正"。
// ==========================================

use crate::config::SchedulerConfig;
use crate::domain::item::StockItem;
use crate::domain::schedule::ExcludedItem;
use crate::domain::types::ExclusionReason;
use chrono::{Datelike, NaiveDate};
use tracing::{debug, instrument};

// ==========================================
// ExpiryFilter - 效期准入引擎
// ==========================================
pub struct ExpiryFilter {
    config: SchedulerConfig,
}

impl ExpiryFilter {
    /// 构造函数
    ///
    /// # 参数
    /// - config: 排班参数
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 划分合格/排除条目
    ///
    /// # 参数
    /// - `items`: 库存条目列表 (已校验)
    /// - `roster`: 发药员名册 (顺序有意义)
    /// - `today`: 当前日期 (调用方提供,引擎不读时钟)
    ///
    /// # 返回
    /// (合格条目列表, 排除条目列表)
    #[instrument(skip(self, items, roster), fields(
        items_count = items.len(),
        roster_count = roster.len()
    ))]
    pub fn filter(
        &self,
        items: &[StockItem],
        roster: &[String],
        today: NaiveDate,
    ) -> (Vec<StockItem>, Vec<ExcludedItem>) {
        // 规则 1: 名册为空,全部排除,不做日期判定
        if roster.is_empty() {
            debug!("名册为空,排除全部 {} 条", items.len());
            let excluded = items
                .iter()
                .map(|item| Self::exclude(item, ExclusionReason::NoWorkersAvailable))
                .collect();
            return (Vec::new(), excluded);
        }

        let mut eligible = Vec::new();
        let mut excluded = Vec::new();

        for item in items {
            // 规则 2: 本月到期 (优先于天数阈值判定)
            if Self::expires_in_month(item.expiry_date, today) {
                debug!(item_id = %item.item_id, "排除: 本月到期");
                excluded.push(Self::exclude(item, ExclusionReason::ExpiresThisMonth));
                continue;
            }

            // 规则 3: 剩余效期不足
            let days_left = Self::days_left(item.expiry_date, today);
            if days_left < self.config.min_shelf_life_days {
                debug!(item_id = %item.item_id, days_left, "排除: 剩余效期不足");
                excluded.push(Self::exclude(item, ExclusionReason::InsufficientShelfLife));
                continue;
            }

            // 规则 4: 合格
            eligible.push(item.clone());
        }

        debug!(
            eligible_count = eligible.len(),
            excluded_count = excluded.len(),
            "准入判定完成"
        );
        (eligible, excluded)
    }

    // ==========================================
    // 纯函数
    // ==========================================

    /// 计算剩余效期天数
    ///
    /// 日期按整天计,差值即剩余天数
    pub fn days_left(expiry_date: NaiveDate, today: NaiveDate) -> i64 {
        expiry_date.signed_duration_since(today).num_days()
    }

    /// 判定效期是否落在指定日期的自然月内
    pub fn expires_in_month(expiry_date: NaiveDate, reference: NaiveDate) -> bool {
        expiry_date.year() == reference.year() && expiry_date.month() == reference.month()
    }

    /// 构造排除记录
    fn exclude(item: &StockItem, reason: ExclusionReason) -> ExcludedItem {
        ExcludedItem {
            item_id: item.item_id.clone(),
            expiry_date: item.expiry_date,
            quantity: item.quantity,
            reason,
        }
    }
}

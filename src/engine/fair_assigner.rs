// ==========================================
// 药房效期排班系统 - 公平分配引擎
// ==========================================
// 红线: 分配守恒,每个合格条目的分配数量之和必须
//       恰好等于条目数量,不得多分、不得漏分
// ==========================================
// 职责: 把每个条目的数量摊给当前负担最小的发药员
// 输入: 有序月度分组 + 发药员名册
// 输出: 分配记录列表 + 负担台账
// ==========================================
// 算法 (逐条目循环直到数量耗尽):
// 1) minBurden = 全体发药员的最小负担
// 2) 取出负担等于 minBurden 的发药员,保持名册输入顺序
// 3) assignCount = min(并列人数, 剩余数量)
// 4) perShare = ceil(剩余数量 / assignCount)
// 5) 依次发放 min(perShare, 剩余数量),剩余为 0 即提前结束
// 无随机性,结果完全由输入决定
// ==========================================

use crate::domain::schedule::{Assignment, DispenserLoad, MonthBucket};
use tracing::{debug, instrument, warn};

// ==========================================
// BurdenLedger - 发药员负担台账
// ==========================================
// 平行向量,保持名册输入顺序;并列时的取人顺序
// 可以在输出中观察到,不得用无序哈希表实现
#[derive(Debug, Clone)]
pub struct BurdenLedger {
    dispenser_ids: Vec<String>,
    burdens: Vec<u32>,
}

impl BurdenLedger {
    /// 从名册建立台账,初始负担全 0
    pub fn new(roster: &[String]) -> Self {
        Self {
            dispenser_ids: roster.to_vec(),
            burdens: vec![0; roster.len()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dispenser_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dispenser_ids.len()
    }

    /// 当前最小负担 (台账为空时为 None)
    pub fn min_burden(&self) -> Option<u32> {
        self.burdens.iter().copied().min()
    }

    /// 负担最小的发药员下标,按名册顺序
    pub fn least_burdened(&self) -> Vec<usize> {
        match self.min_burden() {
            Some(min) => self
                .burdens
                .iter()
                .enumerate()
                .filter(|(_, &b)| b == min)
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        }
    }

    /// 记一笔负担
    pub fn add(&mut self, index: usize, quantity: u32) {
        self.burdens[index] += quantity;
    }

    pub fn dispenser_id(&self, index: usize) -> &str {
        &self.dispenser_ids[index]
    }

    pub fn burden(&self, index: usize) -> u32 {
        self.burdens[index]
    }

    /// 负担快照,按名册顺序输出
    pub fn loads(&self) -> Vec<DispenserLoad> {
        self.dispenser_ids
            .iter()
            .zip(self.burdens.iter())
            .map(|(dispenser_id, &burden)| DispenserLoad {
                dispenser_id: dispenser_id.clone(),
                burden,
            })
            .collect()
    }
}

// ==========================================
// FairAssigner - 公平分配引擎
// ==========================================
pub struct FairAssigner {
    // 无状态引擎,负担台账归单次调用所有
}

impl FairAssigner {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 按最小负担贪心分配
    ///
    /// 月度分组严格按时间序处理,组内严格按效期最早者在前,
    /// 因此最早到期的条目最先占用最空闲的发药员。
    ///
    /// # 参数
    /// - `buckets`: 月度分组 (MonthGrouper 输出,已排序)
    /// - `roster`: 发药员名册 (顺序即并列时的取人顺序)
    ///
    /// # 返回
    /// (分配记录列表, 负担台账)
    #[instrument(skip(self, buckets, roster), fields(
        buckets_count = buckets.len(),
        roster_count = roster.len()
    ))]
    pub fn assign(
        &self,
        buckets: &[MonthBucket],
        roster: &[String],
    ) -> (Vec<Assignment>, BurdenLedger) {
        let mut ledger = BurdenLedger::new(roster);
        let mut assignments = Vec::new();

        // 正常流程不会走到这里 (名册为空时准入引擎已排除全部条目),
        // 但本引擎是公开接口,空名册必须返回空结果而不是死循环
        if ledger.is_empty() {
            warn!("名册为空,跳过分配");
            return (assignments, ledger);
        }

        for bucket in buckets {
            for item in &bucket.items {
                let mut remaining = item.quantity;

                while remaining > 0 {
                    // 步骤 1-2: 当前负担最小的发药员,按名册顺序
                    let least = ledger.least_burdened();

                    // 步骤 3: 本轮参与分配的人数
                    let assign_count = least.len().min(remaining as usize) as u32;

                    // 步骤 4: 每人份额 (向上取整)
                    let per_share = remaining.div_ceil(assign_count);

                    // 步骤 5: 依次发放,数量耗尽即提前结束
                    for &index in least.iter().take(assign_count as usize) {
                        if remaining == 0 {
                            break;
                        }
                        let granted = per_share.min(remaining);
                        assignments.push(Assignment {
                            dispenser_id: ledger.dispenser_id(index).to_string(),
                            item_id: item.item_id.clone(),
                            month_key: bucket.month_key.clone(),
                            quantity: granted,
                        });
                        ledger.add(index, granted);
                        remaining -= granted;
                    }
                }

                debug!(
                    item_id = %item.item_id,
                    month_key = %bucket.month_key,
                    quantity = item.quantity,
                    "条目分配完成"
                );
            }
        }

        (assignments, ledger)
    }
}

impl Default for FairAssigner {
    fn default() -> Self {
        Self::new()
    }
}

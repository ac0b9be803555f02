// ==========================================
// ANS 合规报告 - 罚金计算器
// ==========================================
// 规则:
// - 可用率 >= 阈值: 不罚
// - 否则 缺口 = 阈值 - 可用率,按档位表 (升序、右闭) 取罚金比例
// - 罚金 = 月合同额 × 比例 / 100,按最小货币单位四舍五入 (half-up)
// 红线: 月合同额为负 → 配置错误,不截断为 0
// ==========================================

use crate::domain::penalty::PenaltyResult;
use crate::engine::error::{AnsError, AnsResult};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 档位边界比较容差 (百分点)
///
/// 98.9 - 98.4 在 f64 下为 0.5000000000000142,应落入 0.5 档
const DEFICIT_EPSILON: f64 = 1e-9;

// ==========================================
// PenaltyTier - 罚金档位
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyTier {
    /// 档位上界 (含),None 表示无上界 (只能是最后一档)
    pub max_deficit_pct: Option<f64>,
    /// 罚金比例 (%)
    pub rate_pct: Decimal,
}

impl PenaltyTier {
    pub fn bounded(max_deficit_pct: f64, rate_pct: Decimal) -> Self {
        Self {
            max_deficit_pct: Some(max_deficit_pct),
            rate_pct,
        }
    }

    pub fn open(rate_pct: Decimal) -> Self {
        Self {
            max_deficit_pct: None,
            rate_pct,
        }
    }
}

// ==========================================
// TierSchedule - 罚金档位表
// ==========================================
// 不变量 (构造时校验):
// - 非空
// - 除最后一档外均有上界,上界严格递增且非负
// - 最后一档无上界
// - 比例非负且单调不减
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PenaltyTier>", into = "Vec<PenaltyTier>")]
pub struct TierSchedule {
    tiers: Vec<PenaltyTier>,
}

impl TierSchedule {
    /// 构造并校验档位表
    pub fn new(tiers: Vec<PenaltyTier>) -> AnsResult<Self> {
        if tiers.is_empty() {
            return Err(AnsError::InvalidConfiguration(
                "罚金档位表为空".to_string(),
            ));
        }

        let last_index = tiers.len() - 1;
        let mut previous_bound: Option<f64> = None;
        let mut previous_rate = Decimal::ZERO;

        for (index, tier) in tiers.iter().enumerate() {
            if tier.rate_pct < Decimal::ZERO {
                return Err(AnsError::InvalidConfiguration(format!(
                    "第 {} 档罚金比例为负: {}",
                    index + 1,
                    tier.rate_pct
                )));
            }
            if tier.rate_pct < previous_rate {
                return Err(AnsError::InvalidConfiguration(format!(
                    "第 {} 档罚金比例 {} 小于上一档 {}",
                    index + 1,
                    tier.rate_pct,
                    previous_rate
                )));
            }
            previous_rate = tier.rate_pct;

            match (tier.max_deficit_pct, index == last_index) {
                (None, true) => {}
                (None, false) => {
                    return Err(AnsError::InvalidConfiguration(format!(
                        "第 {} 档无上界,但不是最后一档",
                        index + 1
                    )));
                }
                (Some(bound), true) => {
                    return Err(AnsError::InvalidConfiguration(format!(
                        "最后一档必须无上界 (当前上界 {})",
                        bound
                    )));
                }
                (Some(bound), false) => {
                    if !bound.is_finite() || bound < 0.0 {
                        return Err(AnsError::InvalidConfiguration(format!(
                            "第 {} 档上界非法: {}",
                            index + 1,
                            bound
                        )));
                    }
                    if let Some(prev) = previous_bound {
                        if bound <= prev {
                            return Err(AnsError::InvalidConfiguration(format!(
                                "档位上界必须严格递增: {} <= {}",
                                bound, prev
                            )));
                        }
                    }
                    previous_bound = Some(bound);
                }
            }
        }

        Ok(Self { tiers })
    }

    /// 合同默认档位表: ≤0.5 → 0.5%, ≤1.0 → 1.0%, ≤1.5 → 1.5%, 其余 → 2.0%
    pub fn contractual_default() -> Self {
        Self {
            tiers: vec![
                PenaltyTier::bounded(0.5, Decimal::new(5, 1)),
                PenaltyTier::bounded(1.0, Decimal::new(10, 1)),
                PenaltyTier::bounded(1.5, Decimal::new(15, 1)),
                PenaltyTier::open(Decimal::new(20, 1)),
            ],
        }
    }

    pub fn tiers(&self) -> &[PenaltyTier] {
        &self.tiers
    }

    /// 按缺口取罚金比例 (右闭区间,边界取较轻档)
    pub fn rate_for_deficit(&self, deficit_pct: f64) -> Decimal {
        for tier in &self.tiers {
            match tier.max_deficit_pct {
                Some(bound) if deficit_pct <= bound + DEFICIT_EPSILON => return tier.rate_pct,
                Some(_) => continue,
                None => return tier.rate_pct,
            }
        }
        // 构造时保证最后一档无上界,此处不可达
        self.tiers
            .last()
            .map(|tier| tier.rate_pct)
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for TierSchedule {
    fn default() -> Self {
        Self::contractual_default()
    }
}

impl TryFrom<Vec<PenaltyTier>> for TierSchedule {
    type Error = AnsError;

    fn try_from(tiers: Vec<PenaltyTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierSchedule> for Vec<PenaltyTier> {
    fn from(schedule: TierSchedule) -> Self {
        schedule.tiers
    }
}

// ==========================================
// PenaltyCalculator - 罚金计算器
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyCalculator {
    schedule: TierSchedule,
    currency_scale: u32, // 最小货币单位的小数位 (COP = 0)
}

impl PenaltyCalculator {
    /// 构造函数
    ///
    /// # 参数
    /// - `schedule`: 已校验的档位表
    /// - `currency_scale`: 金额保留小数位
    pub fn new(schedule: TierSchedule, currency_scale: u32) -> Self {
        Self {
            schedule,
            currency_scale,
        }
    }

    pub fn schedule(&self) -> &TierSchedule {
        &self.schedule
    }

    /// 计算罚金
    ///
    /// # 参数
    /// - `availability_pct`: 系统级可用率 (未取整)
    /// - `threshold_pct`: 合同阈值
    /// - `monthly_value`: 月合同额
    ///
    /// # 错误
    /// - 月合同额为负 / 阈值越界 → InvalidConfiguration
    pub fn compute_penalty(
        &self,
        availability_pct: f64,
        threshold_pct: f64,
        monthly_value: Decimal,
    ) -> AnsResult<PenaltyResult> {
        if monthly_value < Decimal::ZERO {
            return Err(AnsError::InvalidConfiguration(format!(
                "月合同额不能为负: {}",
                monthly_value
            )));
        }
        if !threshold_pct.is_finite() || !(0.0..=100.0).contains(&threshold_pct) {
            return Err(AnsError::InvalidConfiguration(format!(
                "ANS 阈值必须在 [0, 100] 内: {}",
                threshold_pct
            )));
        }

        if availability_pct >= threshold_pct {
            return Ok(PenaltyResult::not_applicable());
        }

        let deficit_pct = threshold_pct - availability_pct;
        let penalty_rate_pct = self.schedule.rate_for_deficit(deficit_pct);
        let penalty_value = (monthly_value * penalty_rate_pct / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(self.currency_scale, RoundingStrategy::MidpointAwayFromZero);

        tracing::debug!(
            deficit_pct,
            penalty_rate_pct = %penalty_rate_pct,
            penalty_value = %penalty_value,
            "ANS 未达标,计算罚金"
        );

        Ok(PenaltyResult {
            applies: true,
            deficit_pct,
            penalty_rate_pct,
            penalty_value,
        })
    }
}

impl Default for PenaltyCalculator {
    fn default() -> Self {
        Self::new(TierSchedule::contractual_default(), 0)
    }
}

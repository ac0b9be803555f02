// ==========================================
// ANS 合规报告 - 合同参数
// ==========================================
// 依据: 合同 SCJ-1809-2024 - ANS 条款
// 职责: 承载阈值、预警带宽、月合同额、罚金档位表
// 红线: 不可能成立的配置立即报错,不自动修正
// ==========================================

use crate::domain::types::LoadPolicy;
use crate::engine::error::{AnsError, AnsResult};
use crate::engine::penalty::TierSchedule;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 默认合同阈值 (%)
pub const DEFAULT_THRESHOLD_PCT: f64 = 98.9;
/// 默认预警带宽 (百分点)
pub const DEFAULT_WARNING_MARGIN_PCT: f64 = 1.0;
/// 默认合同编号
pub const DEFAULT_CONTRACT_NUMBER: &str = "SCJ-1809-2024";
/// 默认历史月数
pub const DEFAULT_HISTORY_MONTHS: u32 = 12;
/// 默认系统名称 (系统级单元)
pub const DEFAULT_SYSTEM_NAME: &str = "Sistema de Videovigilancia";

/// Decimal 支持的最大小数位
const MAX_CURRENCY_SCALE: u32 = 28;

// ==========================================
// AnsConfig - ANS 合同参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsConfig {
    pub threshold_pct: f64,               // 合同可用率阈值
    pub warning_margin_pct: f64,          // 预警带宽 (仅提示)
    pub monthly_contract_value: Decimal,  // 月合同额
    pub tier_schedule: TierSchedule,      // 罚金档位表
    pub currency_scale: u32,              // 金额小数位 (COP = 0)
    pub contract_number: String,          // 合同编号
    pub system_name: String,              // 系统级单元名称
    pub history_months: u32,              // 历史回看月数
    pub locale: String,                   // 文案语言
    pub load_policy: LoadPolicy,          // 无数据处理策略
}

impl Default for AnsConfig {
    fn default() -> Self {
        Self {
            threshold_pct: DEFAULT_THRESHOLD_PCT,
            warning_margin_pct: DEFAULT_WARNING_MARGIN_PCT,
            monthly_contract_value: Decimal::ZERO,
            tier_schedule: TierSchedule::contractual_default(),
            currency_scale: 0,
            contract_number: DEFAULT_CONTRACT_NUMBER.to_string(),
            system_name: DEFAULT_SYSTEM_NAME.to_string(),
            history_months: DEFAULT_HISTORY_MONTHS,
            locale: crate::i18n::DEFAULT_LOCALE.to_string(),
            load_policy: LoadPolicy::Permissive,
        }
    }
}

impl AnsConfig {
    /// 校验参数
    ///
    /// # 错误
    /// - 阈值不在 [0, 100] 或非有限
    /// - 预警带宽为负或非有限
    /// - 月合同额为负
    /// - 金额小数位超出 Decimal 范围
    ///
    /// 档位表结构由 TierSchedule 构造保证
    pub fn validate(&self) -> AnsResult<()> {
        if !self.threshold_pct.is_finite() || !(0.0..=100.0).contains(&self.threshold_pct) {
            return Err(AnsError::InvalidConfiguration(format!(
                "ANS 阈值必须在 [0, 100] 内: {}",
                self.threshold_pct
            )));
        }

        if !self.warning_margin_pct.is_finite() || self.warning_margin_pct < 0.0 {
            return Err(AnsError::InvalidConfiguration(format!(
                "预警带宽必须为非负数: {}",
                self.warning_margin_pct
            )));
        }

        if self.monthly_contract_value < Decimal::ZERO {
            return Err(AnsError::InvalidConfiguration(format!(
                "月合同额不能为负: {}",
                self.monthly_contract_value
            )));
        }

        if self.currency_scale > MAX_CURRENCY_SCALE {
            return Err(AnsError::InvalidConfiguration(format!(
                "金额小数位超出范围 (0-{}): {}",
                MAX_CURRENCY_SCALE, self.currency_scale
            )));
        }

        Ok(())
    }

    /// 构造并校验
    pub fn validated(self) -> AnsResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

// ==========================================
// ANS 合规报告 - 配置读取 Trait
// ==========================================
// 职责: 定义报告生成所需的配置读取接口(不包含实现)
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::ans_config::AnsConfig;
use crate::config::error::ConfigResult;
use crate::domain::types::LoadPolicy;
use crate::engine::penalty::TierSchedule;
use rust_decimal::Decimal;

// ==========================================
// AnsConfigReader Trait
// ==========================================
// 实现者: ConfigManager(从 config_kv 表读取)、StaticConfigReader(内存)
pub trait AnsConfigReader: Send + Sync {
    // ===== 合同数值 (格式错误 → 报错) =====

    /// 合同可用率阈值 (%)
    ///
    /// # 默认值
    /// - 98.9
    fn get_threshold_pct(&self) -> ConfigResult<f64>;

    /// 预警带宽 (百分点)
    ///
    /// # 默认值
    /// - 1.0
    fn get_warning_margin_pct(&self) -> ConfigResult<f64>;

    /// 月合同额
    ///
    /// # 默认值
    /// - 0
    fn get_monthly_contract_value(&self) -> ConfigResult<Decimal>;

    /// 罚金档位表
    ///
    /// # 默认值
    /// - ≤0.5 → 0.5%, ≤1.0 → 1.0%, ≤1.5 → 1.5%, 其余 → 2.0%
    fn get_tier_schedule(&self) -> ConfigResult<TierSchedule>;

    /// 金额小数位
    ///
    /// # 默认值
    /// - 0 (COP)
    fn get_currency_scale(&self) -> ConfigResult<u32>;

    // ===== 展示与策略 (格式错误 → 默认值 + 告警) =====

    fn get_contract_number(&self) -> ConfigResult<String>;

    fn get_system_name(&self) -> ConfigResult<String>;

    /// 历史回看月数
    ///
    /// # 默认值
    /// - 12
    fn get_history_months(&self) -> ConfigResult<u32>;

    fn get_locale(&self) -> ConfigResult<String>;

    /// 无数据处理策略
    ///
    /// # 默认值
    /// - Permissive
    fn get_load_policy(&self) -> ConfigResult<LoadPolicy>;

    /// 读取完整参数并校验
    fn load_ans_config(&self) -> ConfigResult<AnsConfig> {
        let config = AnsConfig {
            threshold_pct: self.get_threshold_pct()?,
            warning_margin_pct: self.get_warning_margin_pct()?,
            monthly_contract_value: self.get_monthly_contract_value()?,
            tier_schedule: self.get_tier_schedule()?,
            currency_scale: self.get_currency_scale()?,
            contract_number: self.get_contract_number()?,
            system_name: self.get_system_name()?,
            history_months: self.get_history_months()?,
            locale: self.get_locale()?,
            load_policy: self.get_load_policy()?,
        };
        Ok(config.validated()?)
    }
}

// ==========================================
// StaticConfigReader - 内存配置
// ==========================================
// 用途: 测试、无数据库的夹具模式
#[derive(Debug, Clone, Default)]
pub struct StaticConfigReader {
    config: AnsConfig,
}

impl StaticConfigReader {
    pub fn new(config: AnsConfig) -> Self {
        Self { config }
    }
}

impl AnsConfigReader for StaticConfigReader {
    fn get_threshold_pct(&self) -> ConfigResult<f64> {
        Ok(self.config.threshold_pct)
    }

    fn get_warning_margin_pct(&self) -> ConfigResult<f64> {
        Ok(self.config.warning_margin_pct)
    }

    fn get_monthly_contract_value(&self) -> ConfigResult<Decimal> {
        Ok(self.config.monthly_contract_value)
    }

    fn get_tier_schedule(&self) -> ConfigResult<TierSchedule> {
        Ok(self.config.tier_schedule.clone())
    }

    fn get_currency_scale(&self) -> ConfigResult<u32> {
        Ok(self.config.currency_scale)
    }

    fn get_contract_number(&self) -> ConfigResult<String> {
        Ok(self.config.contract_number.clone())
    }

    fn get_system_name(&self) -> ConfigResult<String> {
        Ok(self.config.system_name.clone())
    }

    fn get_history_months(&self) -> ConfigResult<u32> {
        Ok(self.config.history_months)
    }

    fn get_locale(&self) -> ConfigResult<String> {
        Ok(self.config.locale.clone())
    }

    fn get_load_policy(&self) -> ConfigResult<LoadPolicy> {
        Ok(self.config.load_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::ConfigError;

    #[test]
    fn test_static_reader_round_trip() {
        let config = AnsConfig {
            monthly_contract_value: Decimal::from(500_000_000),
            ..Default::default()
        };
        let reader = StaticConfigReader::new(config.clone());
        assert_eq!(reader.load_ans_config().unwrap(), config);
    }

    #[test]
    fn test_static_reader_validates() {
        let reader = StaticConfigReader::new(AnsConfig {
            threshold_pct: -1.0,
            ..Default::default()
        });
        assert!(matches!(
            reader.load_ans_config(),
            Err(ConfigError::Invalid(_))
        ));
    }
}

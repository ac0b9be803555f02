// ==========================================
// ANS 合规报告 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// 规则:
// - 键不存在 → 默认值
// - 合同数值格式错误 → InvalidConfiguration (不静默回退金额相关配置)
// - 展示类配置格式错误 → 默认值 + 告警
// ==========================================

use crate::config::ans_config::{
    DEFAULT_CONTRACT_NUMBER, DEFAULT_HISTORY_MONTHS, DEFAULT_SYSTEM_NAME,
    DEFAULT_THRESHOLD_PCT, DEFAULT_WARNING_MARGIN_PCT,
};
use crate::config::config_reader::AnsConfigReader;
use crate::config::error::{ConfigError, ConfigResult};
use crate::db::open_sqlite_connection;
use crate::domain::types::LoadPolicy;
use crate::engine::error::AnsError;
use crate::engine::penalty::TierSchedule;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 会对传入连接再次应用统一 PRAGMA(幂等)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值(scope_id='global')
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 读取 global scope 的配置值(公开方法,供其他模块复用)
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 配置 (UPSERT)
    pub fn upsert_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        tracing::info!(config_key = key, "配置已更新");
        Ok(())
    }

    /// 获取所有配置的快照(JSON格式,键有序)
    ///
    /// # 用途
    /// - 报告归档时记录生成所用的参数
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 读取合同数值: 缺省 → 默认值,格式错误 → InvalidConfiguration
    fn get_contractual<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get_config_value(key)? {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<T>().map_err(|e| {
                ConfigError::Invalid(AnsError::InvalidConfiguration(format!(
                    "配置 {} 格式错误 (value: {}): {}",
                    key, raw, e
                )))
            }),
        }
    }

    /// 读取展示类配置: 缺省或格式错误 → 默认值
    fn get_cosmetic<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr,
    {
        match self.get_config_value(key)? {
            None => Ok(default),
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(value) => Ok(value),
                Err(_) => {
                    tracing::warn!(
                        config_key = key,
                        raw_value = %raw,
                        "配置格式错误,使用默认值"
                    );
                    Ok(default)
                }
            },
        }
    }

    /// 读取非空字符串配置
    fn get_text_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_config_value(key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }
}

// ==========================================
// AnsConfigReader Trait 实现
// ==========================================
impl AnsConfigReader for ConfigManager {
    fn get_threshold_pct(&self) -> ConfigResult<f64> {
        self.get_contractual(config_keys::THRESHOLD_PCT, DEFAULT_THRESHOLD_PCT)
    }

    fn get_warning_margin_pct(&self) -> ConfigResult<f64> {
        self.get_contractual(config_keys::WARNING_MARGIN_PCT, DEFAULT_WARNING_MARGIN_PCT)
    }

    fn get_monthly_contract_value(&self) -> ConfigResult<Decimal> {
        self.get_contractual(config_keys::MONTHLY_CONTRACT_VALUE, Decimal::ZERO)
    }

    fn get_tier_schedule(&self) -> ConfigResult<TierSchedule> {
        match self.get_config_value(config_keys::TIER_SCHEDULE)? {
            None => Ok(TierSchedule::contractual_default()),
            Some(raw) => serde_json::from_str::<TierSchedule>(&raw).map_err(|e| {
                ConfigError::Invalid(AnsError::InvalidConfiguration(format!(
                    "罚金档位表格式错误: {}",
                    e
                )))
            }),
        }
    }

    fn get_currency_scale(&self) -> ConfigResult<u32> {
        self.get_contractual(config_keys::CURRENCY_SCALE, 0)
    }

    fn get_contract_number(&self) -> ConfigResult<String> {
        self.get_text_or_default(config_keys::CONTRACT_NUMBER, DEFAULT_CONTRACT_NUMBER)
    }

    fn get_system_name(&self) -> ConfigResult<String> {
        self.get_text_or_default(config_keys::SYSTEM_NAME, DEFAULT_SYSTEM_NAME)
    }

    fn get_history_months(&self) -> ConfigResult<u32> {
        let months = self.get_cosmetic(config_keys::HISTORY_MONTHS, DEFAULT_HISTORY_MONTHS)?;
        if months == 0 {
            tracing::warn!(
                config_key = config_keys::HISTORY_MONTHS,
                "历史月数为 0,使用默认值"
            );
            return Ok(DEFAULT_HISTORY_MONTHS);
        }
        Ok(months)
    }

    fn get_locale(&self) -> ConfigResult<String> {
        let value = self.get_text_or_default(config_keys::LOCALE, crate::i18n::DEFAULT_LOCALE)?;
        let normalized = crate::i18n::normalize_locale(&value);
        if !value.to_lowercase().starts_with(normalized) {
            tracing::warn!(
                config_key = config_keys::LOCALE,
                raw_value = %value,
                "不支持的语言,使用默认值"
            );
        }
        Ok(normalized.to_string())
    }

    fn get_load_policy(&self) -> ConfigResult<LoadPolicy> {
        let value = self.get_config_value(config_keys::STRICT_DATA)?;
        let strict = match value.as_deref().map(|v| v.trim().to_lowercase()) {
            None => false,
            Some(v) => match v.as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    tracing::warn!(
                        config_key = config_keys::STRICT_DATA,
                        raw_value = %v,
                        "配置格式错误,使用默认值"
                    );
                    false
                }
            },
        };

        Ok(if strict {
            LoadPolicy::Strict
        } else {
            LoadPolicy::Permissive
        })
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 合同数值
    pub const THRESHOLD_PCT: &str = "ans_threshold_pct";
    pub const WARNING_MARGIN_PCT: &str = "ans_warning_margin_pct";
    pub const MONTHLY_CONTRACT_VALUE: &str = "ans_monthly_contract_value";
    pub const TIER_SCHEDULE: &str = "ans_tier_schedule"; // JSON: [{max_deficit_pct, rate_pct}]
    pub const CURRENCY_SCALE: &str = "ans_currency_scale";

    // 展示
    pub const CONTRACT_NUMBER: &str = "ans_contract_number";
    pub const SYSTEM_NAME: &str = "ans_system_name";
    pub const HISTORY_MONTHS: &str = "ans_history_months";
    pub const LOCALE: &str = "ans_locale";

    // 数据策略
    pub const STRICT_DATA: &str = "ans_strict_data";
}

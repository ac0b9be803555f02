// ==========================================
// ANS 合规报告 - 配置层
// ==========================================
// 职责: 合同参数定义、校验与读取
// 存储: config_kv 表
// ==========================================

pub mod ans_config;
pub mod config_manager;
pub mod config_reader;
pub mod error;

// 重导出核心配置类型
pub use ans_config::AnsConfig;
pub use config_manager::{config_keys, ConfigManager};
pub use config_reader::{AnsConfigReader, StaticConfigReader};
pub use error::{ConfigError, ConfigResult};

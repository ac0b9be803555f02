// ==========================================
// ANS 合规报告 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换下层错误为带原因的错误消息
// 红线: 失败时给出明确原因,绝不返回编造的合规数字
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::AnsError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含显式原因
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 计算错误
    // ==========================================
    #[error("期间无数据: {0}")]
    DataNotFound(String),

    #[error("配置不合法: {0}")]
    InvalidConfiguration(String),

    #[error("数据质量错误: {0}")]
    DataQualityError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("配置读取失败: {0}")]
    ConfigError(String),

    #[error("数据源读取失败: {0}")]
    ImportError(String),

    #[error("序列化失败: {0}")]
    SerializationError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 AnsError 转换
// ==========================================
impl From<AnsError> for ApiError {
    fn from(err: AnsError) -> Self {
        match err {
            AnsError::InvalidPeriod { .. } => ApiError::InvalidInput(err.to_string()),
            AnsError::DataNotFound { .. } => ApiError::DataNotFound(err.to_string()),
            AnsError::InvalidConfiguration(msg) => ApiError::InvalidConfiguration(msg),
            AnsError::HoursExceedPeriod { .. } | AnsError::InvalidMeasurement { .. } => {
                ApiError::DataQualityError(err.to_string())
            }
        }
    }
}

// ==========================================
// 从 ConfigError 转换
// ==========================================
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(inner) => ApiError::from(inner),
            other => ApiError::ConfigError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Other(inner) => ApiError::Other(inner),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

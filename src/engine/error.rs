// ==========================================
// ANS 合规报告 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 引擎不吞错误,全部上抛给调用方
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnsError {
    /// 严格模式下期间无数据
    #[error("期间无数据: {year}-{month:02}")]
    DataNotFound { year: i32, month: u32 },

    /// 配置不可能成立 (负合同额、空档位表、阈值越界等)
    #[error("配置无效: {0}")]
    InvalidConfiguration(String),

    /// 数据质量错误: 小时数超出期间墙钟时长
    #[error(
        "数据质量错误 ({unit}): 可运行 {operative_hours} + 不可运行 {non_operative_hours} 超出期间总小时 {total_hours}"
    )]
    HoursExceedPeriod {
        unit: String,
        operative_hours: f64,
        non_operative_hours: f64,
        total_hours: u64,
    },

    /// 数据质量错误: 负数或非有限值
    #[error("数据质量错误 ({unit}, 字段 {field}): 非法值 {value}")]
    InvalidMeasurement {
        unit: String,
        field: String,
        value: f64,
    },

    /// 报告期间越界
    #[error("报告期间无效: year={year}, month={month} (year 1-9999, month 1-12)")]
    InvalidPeriod { year: i32, month: u32 },
}

impl AnsError {
    /// 是否为数据质量类错误
    pub fn is_data_quality(&self) -> bool {
        matches!(
            self,
            AnsError::HoursExceedPeriod { .. } | AnsError::InvalidMeasurement { .. }
        )
    }
}

/// Result 类型别名
pub type AnsResult<T> = Result<T, AnsError>;

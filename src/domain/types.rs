// ==========================================
// ANS 合规报告 - 领域类型定义
// ==========================================
// 依据: 合同 SCJ-1809-2024 - ANS 可用率条款
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 合规状态 (Compliance Status)
// ==========================================
// 三段划分: 达标 / 预警 / 严重
// 预警仅为提示,不触发罚金
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant, // 达标 (>= 阈值)
    Warning,   // 预警 (阈值 - 预警带宽 <= pct < 阈值)
    Critical,  // 严重 (< 阈值 - 预警带宽)
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Compliant => write!(f, "COMPLIANT"),
            ComplianceStatus::Warning => write!(f, "WARNING"),
            ComplianceStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl ComplianceStatus {
    /// 从字符串解析状态
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "COMPLIANT" => Some(ComplianceStatus::Compliant),
            "WARNING" => Some(ComplianceStatus::Warning),
            "CRITICAL" => Some(ComplianceStatus::Critical),
            _ => None,
        }
    }

    /// 是否达标 (只有 COMPLIANT 与罚金边界相关)
    pub fn is_compliant(&self) -> bool {
        matches!(self, ComplianceStatus::Compliant)
    }

    /// 渲染层使用的行底色 (十六进制 RGB)
    pub fn fill_color_hex(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "C6EFCE",
            ComplianceStatus::Warning => "FFEB9C",
            ComplianceStatus::Critical => "FFC7CE",
        }
    }
}

// ==========================================
// 数据加载策略 (Load Policy)
// ==========================================
// Permissive: 无数据时回退为零值并打标记
// Strict: 无数据时报 DataNotFound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadPolicy {
    #[default]
    Permissive,
    Strict,
}

impl fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadPolicy::Permissive => write!(f, "PERMISSIVE"),
            LoadPolicy::Strict => write!(f, "STRICT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_through_str() {
        for status in [
            ComplianceStatus::Compliant,
            ComplianceStatus::Warning,
            ComplianceStatus::Critical,
        ] {
            assert_eq!(ComplianceStatus::from_str(&status.to_string()), Some(status));
        }
        assert_eq!(ComplianceStatus::from_str("ok"), None);
    }

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ComplianceStatus::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");
    }
}

// ==========================================
// ANS 合规报告 - 历史记录
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::ComplianceStatus;

// ==========================================
// HistoricalEntry - 历史期间记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEntry {
    pub period_label: String,  // 例: "Enero 2025"
    pub availability_pct: f64, // 该期间可用率
    #[serde(default)]
    pub notes: String,         // 备注 (observaciones)
}

// ==========================================
// HistoricalRow - 带合规分级的历史行
// ==========================================
// 保持输入顺序,供渲染层按时间顺序展示
// status 与当期分级使用同一阈值与预警带宽
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRow {
    #[serde(flatten)]
    pub entry: HistoricalEntry,
    pub status: ComplianceStatus,
    pub compliant: bool, // status == Compliant
}

// ==========================================
// HistoricalSummary - 历史汇总
// ==========================================
// total_periods == 0 时 average_availability_pct 定义为 0,调用方需先判断
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSummary {
    pub total_periods: usize,
    pub compliant_periods: usize,
    pub non_compliant_periods: usize,
    pub average_availability_pct: f64,
    /// 达标率 (%),无历史时为 None (渲染为 "N/A")
    pub compliance_rate_pct: Option<f64>,
}

impl HistoricalSummary {
    /// 空历史汇总
    pub fn empty() -> Self {
        Self {
            total_periods: 0,
            compliant_periods: 0,
            non_compliant_periods: 0,
            average_availability_pct: 0.0,
            compliance_rate_pct: None,
        }
    }
}

impl Default for HistoricalSummary {
    fn default() -> Self {
        Self::empty()
    }
}

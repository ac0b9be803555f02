// ==========================================
// ANS 合规报告 - 报告载荷
// ==========================================
// 交给渲染协作方的唯一产物
// 每次生成请求新建,组装后不可变,不共享所有权
// 不含时间戳/随机 ID: 相同输入序列化结果逐字节一致
// ==========================================

use crate::domain::availability::UnitAvailability;
use crate::domain::history::{HistoricalRow, HistoricalSummary};
use crate::domain::metrics::PeriodMetrics;
use crate::domain::penalty::PenaltyResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// PeriodInfo - 报告期间信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodInfo {
    pub year: i32,
    pub month: u32,
    pub label: String, // 例: "Septiembre de 2025"
}

// ==========================================
// ReportNarrative - 文字占位段落
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportNarrative {
    pub section_title: String,
    pub intro: String,
    pub formula: String,
    pub result_line: String,
    pub compliance_analysis: String,
    pub penalty_statement: String,
    pub history_intro: String,
}

// ==========================================
// LocalityDisplayRow - localidad 表格行 (已格式化)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalityDisplayRow {
    pub locality: String,
    pub cameras: String,
    pub operative_hours: String,
    pub non_operative_hours: String,
    pub availability: String,
    pub fill_color: String,
}

// ==========================================
// DisplayFigures - 展示用数值 (仅此处取整)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayFigures {
    pub total_hours: String,
    pub operative_hours: String,
    pub non_operative_hours: String,
    pub availability: String,
    pub threshold: String,
    pub deficit: String,
    pub penalty_rate: String,
    pub penalty_value: String,
    pub average_availability: String,
    pub compliance_rate: String,
    pub localities: Vec<LocalityDisplayRow>,
}

// ==========================================
// ReportPayload - 报告载荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    // ===== 期间与合同 =====
    pub period: PeriodInfo,
    pub contract_number: String,
    pub threshold_pct: f64,
    pub warning_margin_pct: f64,
    pub monthly_contract_value: Decimal,

    // ===== 计算结果 =====
    pub data_available: bool, // false: 本期无测量,渲染层应显示"无数据"而非 0%
    pub period_metrics: PeriodMetrics,
    pub system_availability: UnitAvailability,
    pub locality_availabilities: Vec<UnitAvailability>,
    pub penalty_result: PenaltyResult,

    // ===== 历史 =====
    pub historical_summary: HistoricalSummary,
    pub historical_entries: Vec<HistoricalRow>,

    // ===== 渲染素材 =====
    pub narrative: ReportNarrative,
    pub display: DisplayFigures,
}

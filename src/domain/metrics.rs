// ==========================================
// ANS 合规报告 - 期间运行指标
// ==========================================
// 职责: 定义外部抽取结果 (Raw*) 与规范化指标 (PeriodMetrics)
// 红线: 本模块不做 I/O,不做计算
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// PeriodMetrics - 规范化期间指标
// ==========================================
// 由 PeriodMetricsLoader 构造,单次报告内不可变
// 不变量: operative_hours + non_operative_hours <= total_hours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub total_hours: u64,         // 期间总小时数 (日历小时 或 外部直接给出)
    pub operative_hours: f64,     // 可运行小时
    pub non_operative_hours: f64, // 不可运行小时
    pub has_data: bool,           // false = 无测量 (零值回退),不是 0% 可用率
}

impl PeriodMetrics {
    /// 已测量小时 (可用率分母)
    pub fn measured_hours(&self) -> f64 {
        self.operative_hours + self.non_operative_hours
    }
}

// ==========================================
// RawPeriodMetrics - 外部抽取的系统级小时数
// ==========================================
// 来源: JSON 夹具 / 监控库 / Excel 抽取
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPeriodMetrics {
    /// 外部直接给出的总小时数,缺省则按日历推导
    #[serde(default)]
    pub total_hours: Option<u64>,

    #[serde(default)]
    pub operative_hours: f64,

    #[serde(default)]
    pub non_operative_hours: f64,

    /// 参与统计的摄像头数量 (监控库按摄像头累加小时时给出)
    #[serde(default)]
    pub camera_count: Option<u32>,
}

// ==========================================
// RawLocalityMetrics - 外部抽取的分区 (localidad) 小时数
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLocalityMetrics {
    pub locality: String,
    #[serde(default)]
    pub camera_count: u32,
    #[serde(default)]
    pub operative_hours: f64,
    #[serde(default)]
    pub non_operative_hours: f64,
    /// 外部直接给出的总小时数 (摄像头小时),缺省则按 日历小时 × 摄像头数 推导
    #[serde(default)]
    pub total_hours: Option<u64>,
}

// ==========================================
// NarrativeInputs - 文字说明素材
// ==========================================
// 不达标原因 / 纠正措施,由业务人员在数据源中维护
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeInputs {
    #[serde(default)]
    pub causes: Vec<String>,
    #[serde(default)]
    pub corrective_actions: Vec<String>,
}

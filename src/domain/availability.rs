// ==========================================
// ANS 合规报告 - 单元可用率
// ==========================================
// 单元 = 整个系统 或 一个 localidad
// 各 localidad 独立测量,不要求加总等于系统值
// ==========================================

use crate::domain::metrics::PeriodMetrics;
use crate::domain::types::ComplianceStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// UnitAvailability - 单元可用率
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitAvailability {
    pub unit_name: String,          // 系统名称 或 localidad 名称
    pub camera_count: u32,          // 摄像头数量 (仅展示)
    pub metrics: PeriodMetrics,     // 期间指标
    pub availability_pct: f64,      // [0, 100],未取整
    pub status: ComplianceStatus,   // 分类结果
}

impl UnitAvailability {
    /// 是否存在实测数据
    pub fn has_data(&self) -> bool {
        self.metrics.has_data
    }
}

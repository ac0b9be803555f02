// ==========================================
// ANS 合规报告 - 可用率计算器
// ==========================================
// 公式: 100 × 可运行小时 / (可运行小时 + 不可运行小时)
// 分母为 0 时返回 0.0 (无测量是合法状态,不是错误)
// 红线: 计算全程不取整,取整只在展示层
// ==========================================

use crate::domain::availability::UnitAvailability;
use crate::domain::metrics::PeriodMetrics;
use crate::engine::classification::ClassificationEngine;

// ==========================================
// AvailabilityCalculator - 可用率计算器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityCalculator;

impl AvailabilityCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 计算可用率 (%)
    ///
    /// # 返回
    /// [0, 100] 内的浮点数,未取整
    pub fn availability_pct(&self, metrics: &PeriodMetrics) -> f64 {
        availability_pct(metrics.operative_hours, metrics.non_operative_hours)
    }

    /// 计算单元可用率并分类
    ///
    /// # 参数
    /// - `unit_name`: 单元名称
    /// - `camera_count`: 摄像头数量
    /// - `metrics`: 已加载的期间指标
    /// - `classifier`: 分类引擎 (各单元独立分类)
    pub fn evaluate_unit(
        &self,
        unit_name: &str,
        camera_count: u32,
        metrics: PeriodMetrics,
        classifier: &ClassificationEngine,
    ) -> UnitAvailability {
        let availability_pct = self.availability_pct(&metrics);
        let status = classifier.classify(availability_pct);

        tracing::debug!(
            unit = unit_name,
            availability_pct,
            status = %status,
            "单元可用率"
        );

        UnitAvailability {
            unit_name: unit_name.to_string(),
            camera_count,
            metrics,
            availability_pct,
            status,
        }
    }
}

/// 可用率公式
pub fn availability_pct(operative_hours: f64, non_operative_hours: f64) -> f64 {
    let measured = operative_hours + non_operative_hours;
    if measured <= 0.0 || !measured.is_finite() {
        return 0.0;
    }
    (100.0 * operative_hours / measured).clamp(0.0, 100.0)
}

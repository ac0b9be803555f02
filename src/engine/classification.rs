// ==========================================
// ANS 合规报告 - 分类引擎
// ==========================================
// 规则 (三段连续,互不重叠):
// - pct >= 阈值                       → COMPLIANT
// - 阈值 - 预警带宽 <= pct < 阈值      → WARNING (仅提示,不触发罚金)
// - pct < 阈值 - 预警带宽             → CRITICAL
// ==========================================

use crate::domain::types::ComplianceStatus;

// ==========================================
// ClassificationEngine - 分类引擎
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationEngine {
    threshold_pct: f64,
    warning_margin_pct: f64,
}

impl ClassificationEngine {
    /// 构造函数
    ///
    /// # 参数
    /// - `threshold_pct`: 合同可用率阈值 (例: 98.9)
    /// - `warning_margin_pct`: 预警带宽 (例: 1.0 个百分点)
    pub fn new(threshold_pct: f64, warning_margin_pct: f64) -> Self {
        Self {
            threshold_pct,
            warning_margin_pct,
        }
    }

    pub fn threshold_pct(&self) -> f64 {
        self.threshold_pct
    }

    /// 分类单个可用率
    pub fn classify(&self, pct: f64) -> ComplianceStatus {
        classify(pct, self.threshold_pct, self.warning_margin_pct)
    }
}

/// 分类函数
///
/// NaN 不满足任何比较,落入 CRITICAL
pub fn classify(pct: f64, threshold_pct: f64, warning_margin_pct: f64) -> ComplianceStatus {
    if pct >= threshold_pct {
        ComplianceStatus::Compliant
    } else if pct >= threshold_pct - warning_margin_pct {
        ComplianceStatus::Warning
    } else {
        ComplianceStatus::Critical
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_exactly_is_compliant() {
        assert_eq!(classify(98.9, 98.9, 1.0), ComplianceStatus::Compliant);
    }

    #[test]
    fn test_warning_band_lower_edge_inclusive() {
        let engine = ClassificationEngine::new(98.9, 1.0);
        assert_eq!(engine.classify(98.9 - 1.0), ComplianceStatus::Warning);
        assert_eq!(engine.classify(98.5), ComplianceStatus::Warning);
    }

    #[test]
    fn test_below_band_is_critical() {
        let engine = ClassificationEngine::new(98.9, 1.0);
        assert_eq!(engine.classify(97.22), ComplianceStatus::Critical);
        assert_eq!(engine.classify(0.0), ComplianceStatus::Critical);
    }

    #[test]
    fn test_zero_margin_has_no_warning_band() {
        assert_eq!(classify(98.89, 98.9, 0.0), ComplianceStatus::Critical);
        assert_eq!(classify(98.9, 98.9, 0.0), ComplianceStatus::Compliant);
    }

    #[test]
    fn test_partition_is_total_and_contiguous() {
        let engine = ClassificationEngine::new(98.9, 1.0);
        let mut previous = ComplianceStatus::Critical;
        // 从 0 扫描到 100,状态只能按 CRITICAL → WARNING → COMPLIANT 前进
        // (枚举顺序: Compliant < Warning < Critical)
        for i in 0..=10_000 {
            let pct = i as f64 / 100.0;
            let status = engine.classify(pct);
            assert!(status <= previous, "pct={} 状态回退", pct);
            previous = status;
        }
        assert_eq!(previous, ComplianceStatus::Compliant);
    }

    #[test]
    fn test_nan_is_critical() {
        assert_eq!(classify(f64::NAN, 98.9, 1.0), ComplianceStatus::Critical);
    }
}

// ==========================================
// ANS 合规报告 - 历史汇总器
// ==========================================
// 职责: 历史期间序列 → 汇总统计
// 规则:
// - 达标期数 = count(pct >= 阈值)
// - 平均可用率 = mean(pct),空序列定义为 0
// - 汇总与顺序无关,行输出保持输入顺序
// - 行分级复用当期的三档分类 (达标/预警/严重)
// ==========================================

use crate::domain::history::{HistoricalEntry, HistoricalRow, HistoricalSummary};
use crate::domain::types::ComplianceStatus;
use crate::engine::classification::classify;

// ==========================================
// HistoricalAggregator - 历史汇总器
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct HistoricalAggregator {
    threshold_pct: f64,
    warning_margin_pct: f64,
}

impl HistoricalAggregator {
    /// 构造函数
    ///
    /// # 参数
    /// - `threshold_pct`: 合同阈值 (%)
    /// - `warning_margin_pct`: 预警带宽 (百分点)
    pub fn new(threshold_pct: f64, warning_margin_pct: f64) -> Self {
        Self {
            threshold_pct,
            warning_margin_pct,
        }
    }

    /// 汇总历史期间
    pub fn aggregate(&self, entries: &[HistoricalEntry]) -> HistoricalSummary {
        aggregate(entries, self.threshold_pct)
    }

    /// 为每条记录标注合规分级 (保持顺序)
    pub fn rows(&self, entries: &[HistoricalEntry]) -> Vec<HistoricalRow> {
        entries
            .iter()
            .map(|entry| {
                let status = classify(
                    entry.availability_pct,
                    self.threshold_pct,
                    self.warning_margin_pct,
                );
                HistoricalRow {
                    entry: entry.clone(),
                    status,
                    compliant: status == ComplianceStatus::Compliant,
                }
            })
            .collect()
    }
}

/// 汇总函数
pub fn aggregate(entries: &[HistoricalEntry], threshold_pct: f64) -> HistoricalSummary {
    if entries.is_empty() {
        return HistoricalSummary::empty();
    }

    let total_periods = entries.len();
    let compliant_periods = entries
        .iter()
        .filter(|e| e.availability_pct >= threshold_pct)
        .count();
    let sum: f64 = entries.iter().map(|e| e.availability_pct).sum();
    let average_availability_pct = sum / total_periods as f64;
    let compliance_rate_pct = Some(compliant_periods as f64 / total_periods as f64 * 100.0);

    HistoricalSummary {
        total_periods,
        compliant_periods,
        non_compliant_periods: total_periods - compliant_periods,
        average_availability_pct,
        compliance_rate_pct,
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, pct: f64) -> HistoricalEntry {
        HistoricalEntry {
            period_label: label.to_string(),
            availability_pct: pct,
            notes: "-".to_string(),
        }
    }

    #[test]
    fn test_empty_history() {
        let summary = aggregate(&[], 98.9);

        assert_eq!(summary.total_periods, 0);
        assert_eq!(summary.compliant_periods, 0);
        assert_eq!(summary.average_availability_pct, 0.0);
        assert_eq!(summary.compliance_rate_pct, None);
    }

    #[test]
    fn test_three_periods() {
        let entries = vec![
            entry("Julio 2025", 99.0),
            entry("Agosto 2025", 98.0),
            entry("Septiembre 2025", 99.5),
        ];

        let summary = aggregate(&entries, 98.9);

        assert_eq!(summary.total_periods, 3);
        assert_eq!(summary.compliant_periods, 2);
        assert_eq!(summary.non_compliant_periods, 1);
        assert!((summary.average_availability_pct - 98.833_333_333_333_33).abs() < 1e-9);
    }

    #[test]
    fn test_order_independent() {
        let forward = vec![entry("a", 97.1), entry("b", 99.9), entry("c", 98.9)];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = aggregate(&forward, 98.9);
        let b = aggregate(&reversed, 98.9);

        assert_eq!(a.compliant_periods, b.compliant_periods);
        assert!((a.average_availability_pct - b.average_availability_pct).abs() < 1e-9);
    }

    #[test]
    fn test_rows_preserve_order() {
        let aggregator = HistoricalAggregator::new(98.9, 1.0);
        let entries = vec![entry("Enero 2025", 98.0), entry("Febrero 2025", 98.9)];

        let rows = aggregator.rows(&entries);

        assert_eq!(rows[0].entry.period_label, "Enero 2025");
        assert!(!rows[0].compliant);
        assert!(rows[1].compliant);
    }

    #[test]
    fn test_rows_carry_three_level_status() {
        let aggregator = HistoricalAggregator::new(98.9, 1.0);
        let entries = vec![
            entry("Julio 2025", 99.2),
            entry("Agosto 2025", 98.0),
            entry("Septiembre 2025", 97.5),
        ];

        let rows = aggregator.rows(&entries);
        let statuses: Vec<ComplianceStatus> = rows.iter().map(|r| r.status).collect();

        assert_eq!(
            statuses,
            vec![
                ComplianceStatus::Compliant,
                ComplianceStatus::Warning,
                ComplianceStatus::Critical
            ]
        );
        assert_eq!(
            rows.iter().filter(|r| r.compliant).count(),
            aggregator.aggregate(&entries).compliant_periods
        );
    }

    #[test]
    fn test_row_status_serialized() {
        let aggregator = HistoricalAggregator::new(98.9, 1.0);
        let rows = aggregator.rows(&[entry("Agosto 2025", 98.0)]);

        let value = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(value["period_label"], "Agosto 2025");
        assert_eq!(value["status"], "WARNING");
    }
}

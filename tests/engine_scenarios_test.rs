// ==========================================
// 引擎集成测试 - 合同场景
// ==========================================
// 测试目标: 可用率 → 分类 → 罚金 → 历史汇总 → 组装 全链路
// ==========================================

mod test_helpers;

use ans_report::domain::{
    ComplianceStatus, HistoricalEntry, LoadPolicy, RawPeriodMetrics, ReportPeriod,
};
use ans_report::engine::availability::availability_pct;
use ans_report::engine::classification::classify;
use ans_report::engine::history::aggregate;
use ans_report::engine::{
    PenaltyCalculator, PenaltyTier, ReportAssembler, ReportInputs, TierSchedule,
};
use ans_report::{AnsConfig, AnsError};
use rust_decimal::Decimal;
use test_helpers::EPS;

fn contract_config() -> AnsConfig {
    AnsConfig {
        monthly_contract_value: Decimal::from(500_000_000),
        ..Default::default()
    }
}

fn inputs_with_hours(operative: f64, non_operative: f64) -> ReportInputs {
    let period = ReportPeriod::new(2025, 9).unwrap();
    ReportInputs {
        raw_metrics: Some(RawPeriodMetrics {
            total_hours: Some(720),
            operative_hours: operative,
            non_operative_hours: non_operative,
            camera_count: None,
        }),
        ..ReportInputs::new(period)
    }
}

fn entry(label: &str, pct: f64) -> HistoricalEntry {
    HistoricalEntry {
        period_label: label.to_string(),
        availability_pct: pct,
        notes: String::new(),
    }
}

// ==========================================
// 具体场景
// ==========================================

#[test]
fn test_scenario_compliant_month() {
    let assembler = ReportAssembler::new(contract_config()).unwrap();
    let payload = assembler.assemble(&inputs_with_hours(713.0, 7.0)).unwrap();

    assert!((payload.system_availability.availability_pct - 99.027_777_777).abs() < 1e-6);
    assert_eq!(payload.system_availability.status, ComplianceStatus::Compliant);
    assert!(!payload.penalty_result.applies);
    assert_eq!(payload.penalty_result.penalty_value, Decimal::ZERO);
}

#[test]
fn test_scenario_top_tier_penalty() {
    let assembler = ReportAssembler::new(contract_config()).unwrap();
    let payload = assembler.assemble(&inputs_with_hours(700.0, 20.0)).unwrap();

    let penalty = &payload.penalty_result;
    assert!((payload.system_availability.availability_pct - 97.222_222).abs() < 1e-4);
    assert!((penalty.deficit_pct - 1.677_778).abs() < 1e-4);
    assert_eq!(penalty.penalty_rate_pct, Decimal::new(20, 1));
    assert_eq!(penalty.penalty_value, Decimal::from(10_000_000));
}

#[test]
fn test_scenario_zero_hours() {
    let assembler = ReportAssembler::new(contract_config()).unwrap();
    let payload = assembler.assemble(&inputs_with_hours(0.0, 0.0)).unwrap();

    assert!(payload.system_availability.availability_pct.abs() < EPS);
    assert_eq!(payload.system_availability.status, ComplianceStatus::Critical);
    assert!((payload.penalty_result.deficit_pct - 98.9).abs() < EPS);
}

#[test]
fn test_scenario_deficit_on_tier_boundary() {
    let calculator = PenaltyCalculator::default();
    let result = calculator
        .compute_penalty(98.4, 98.9, Decimal::from(500_000_000))
        .unwrap();

    assert!(result.applies);
    assert_eq!(result.penalty_rate_pct, Decimal::new(5, 1));
    assert_eq!(result.penalty_value, Decimal::from(2_500_000));
}

#[test]
fn test_scenario_history_summary() {
    let summary = aggregate(
        &[
            entry("Julio 2025", 99.0),
            entry("Agosto 2025", 98.0),
            entry("Septiembre 2025", 99.5),
        ],
        98.9,
    );

    assert_eq!(summary.total_periods, 3);
    assert_eq!(summary.compliant_periods, 2);
    assert_eq!(summary.non_compliant_periods, 1);
    assert!((summary.average_availability_pct - 98.833_333_333).abs() < 1e-6);
}

// ==========================================
// 性质
// ==========================================

#[test]
fn test_availability_stays_in_range() {
    let samples = [0.0, 0.5, 7.0, 100.0, 713.0, 10_000.0];
    for &op in &samples {
        for &non_op in &samples {
            let pct = availability_pct(op, non_op);
            assert!((0.0..=100.0).contains(&pct), "op={} non_op={}", op, non_op);
        }
    }
}

#[test]
fn test_penalty_rate_monotonic_in_deficit() {
    let schedule = TierSchedule::contractual_default();
    let mut previous = Decimal::ZERO;
    let mut deficit = 0.0;
    while deficit <= 5.0 {
        let rate = schedule.rate_for_deficit(deficit);
        assert!(rate >= previous, "deficit={}", deficit);
        previous = rate;
        deficit += 0.01;
    }
}

#[test]
fn test_threshold_exactly_met() {
    assert_eq!(classify(98.9, 98.9, 1.0), ComplianceStatus::Compliant);

    let result = PenaltyCalculator::default()
        .compute_penalty(98.9, 98.9, Decimal::from(500_000_000))
        .unwrap();
    assert!(!result.applies);
}

#[test]
fn test_warning_never_triggers_different_penalty_boundary() {
    // 预警区间仍按未达标计罚
    assert_eq!(classify(98.5, 98.9, 1.0), ComplianceStatus::Warning);
    let result = PenaltyCalculator::default()
        .compute_penalty(98.5, 98.9, Decimal::from(1_000))
        .unwrap();
    assert!(result.applies);
    assert_eq!(result.penalty_rate_pct, Decimal::new(5, 1));
}

#[test]
fn test_custom_schedule_and_scale() {
    let schedule = TierSchedule::new(vec![
        PenaltyTier::bounded(1.0, Decimal::new(10, 1)),
        PenaltyTier::open(Decimal::new(25, 1)),
    ])
    .unwrap();
    let calculator = PenaltyCalculator::new(schedule, 2);

    let result = calculator
        .compute_penalty(96.9, 98.9, Decimal::new(123_456_789, 2))
        .unwrap();

    // 1,234,567.89 × 2.5% = 30,864.19725 → 30,864.20
    assert_eq!(result.penalty_value, Decimal::new(3_086_420, 2));
}

#[test]
fn test_hours_beyond_period_rejected() {
    let assembler = ReportAssembler::new(contract_config()).unwrap();
    let err = assembler
        .assemble(&inputs_with_hours(715.0, 10.0))
        .unwrap_err();
    assert!(matches!(err, AnsError::HoursExceedPeriod { .. }));
    assert!(err.is_data_quality());
}

#[test]
fn test_strict_policy_requires_data() {
    let assembler = ReportAssembler::new(AnsConfig {
        load_policy: LoadPolicy::Strict,
        ..contract_config()
    })
    .unwrap();
    let period = ReportPeriod::new(2025, 9).unwrap();

    assert_eq!(
        assembler.assemble(&ReportInputs::new(period)).unwrap_err(),
        AnsError::DataNotFound {
            year: 2025,
            month: 9
        }
    );
}

#[test]
fn test_assembly_is_idempotent() {
    let assembler = ReportAssembler::new(contract_config()).unwrap();
    let mut inputs = inputs_with_hours(700.0, 20.0);
    inputs.history = Some(vec![entry("Agosto 2025", 98.0), entry("Julio 2025", 99.2)]);

    let first = serde_json::to_vec(&assembler.assemble(&inputs).unwrap()).unwrap();
    let second = serde_json::to_vec(&assembler.assemble(&inputs).unwrap()).unwrap();

    assert_eq!(first, second);
}

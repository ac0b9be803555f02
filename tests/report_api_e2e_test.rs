// ==========================================
// ReportApi 端到端测试
// ==========================================
// 测试目标: 配置读取 + 数据源 + 引擎 → ReportPayload / JSON
// ==========================================

mod test_helpers;

use std::sync::Arc;

use ans_report::config::{config_keys, ConfigManager, StaticConfigReader};
use ans_report::domain::{HistoricalEntry, ReportPeriod};
use ans_report::importer::{
    EmptyNarrativeSource, HistorySource, ImportError, ImportResult, JsonFixtureSource,
    MonitoringStore,
};
use ans_report::{AnsConfig, ApiError, ComplianceStatus, LoadPolicy, ReportApi};
use rust_decimal::Decimal;
use tempfile::TempDir;
use test_helpers::{
    create_test_db, insert_test_config, month_of_records, open_test_connection, set_config,
    write_fixture,
};

const CRITICAL_FIXTURE: &str = r#"{
    "disponibilidad_mes": {
        "horas_totales_mes": 720,
        "horas_operativas": 700,
        "horas_no_operativas": 20
    },
    "disponibilidad_por_localidad": [
        {"localidad": "Kennedy", "total_camaras": 2, "horas_operativas": 1300, "horas_no_operativas": 140},
        {"localidad": "Suba", "total_camaras": 1, "horas_operativas": 718, "horas_no_operativas": 2}
    ],
    "historico_ans": [
        {"mes": "Julio 2025", "disponibilidad": 99.0},
        {"mes": "Agosto 2025", "disponibilidad": 98.0}
    ],
    "causas_incumplimiento": ["Falla de fibra en Kennedy"],
    "acciones_correctivas": ["Reemplazo de tramo de fibra"]
}"#;

fn static_reader(config: AnsConfig) -> Arc<StaticConfigReader> {
    Arc::new(StaticConfigReader::new(config))
}

fn contract_config() -> AnsConfig {
    AnsConfig {
        monthly_contract_value: Decimal::from(500_000_000),
        ..Default::default()
    }
}

/// 历史读取总是失败的数据源
struct BrokenHistory;

impl HistorySource for BrokenHistory {
    fn history(&self, _period: ReportPeriod, _months_back: u32) -> ImportResult<Vec<HistoricalEntry>> {
        Err(ImportError::DatabaseQueryError("historico no disponible".to_string()))
    }
}

#[test]
fn test_fixture_report_critical_month() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_fixture(dir.path(), "ans_9_2025.json", CRITICAL_FIXTURE).expect("write fixture");
    let api = ReportApi::with_fixtures(static_reader(contract_config()), dir.path());

    let payload = api.generate_report(2025, 9).expect("Failed to generate report");

    assert!(payload.data_available);
    assert_eq!(payload.period.label, "Septiembre de 2025");
    assert_eq!(payload.system_availability.status, ComplianceStatus::Critical);
    assert_eq!(payload.penalty_result.penalty_value, Decimal::from(10_000_000));
    assert_eq!(payload.display.penalty_value, "$10.000.000");

    // localidad 独立分类
    assert_eq!(payload.locality_availabilities.len(), 2);
    assert_eq!(
        payload.locality_availabilities[0].status,
        ComplianceStatus::Critical
    );
    assert_eq!(
        payload.locality_availabilities[1].status,
        ComplianceStatus::Compliant
    );

    assert_eq!(payload.historical_summary.total_periods, 2);
    assert_eq!(payload.historical_summary.compliant_periods, 1);
    // 历史行与当期同一三档分级: 98.0 落在预警带内
    assert_eq!(
        payload.historical_entries[0].status,
        ComplianceStatus::Compliant
    );
    assert_eq!(
        payload.historical_entries[1].status,
        ComplianceStatus::Warning
    );
    assert!(payload
        .narrative
        .compliance_analysis
        .contains("Falla de fibra en Kennedy"));
}

#[test]
fn test_report_json_is_stable() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_fixture(dir.path(), "ans_9_2025.json", CRITICAL_FIXTURE).expect("write fixture");
    let api = ReportApi::with_fixtures(static_reader(contract_config()), dir.path());

    let first = api.generate_report_json(2025, 9).expect("Failed to render JSON");
    let second = api.generate_report_json(2025, 9).expect("Failed to render JSON");
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).expect("Invalid JSON");
    assert_eq!(value["contract_number"], "SCJ-1809-2024");
    assert_eq!(value["period"]["month"], 9);
}

#[test]
fn test_missing_fixture_permissive_and_strict() {
    ans_report::logging::init_test();
    let dir = TempDir::new().expect("Failed to create temp dir");

    let permissive = ReportApi::with_fixtures(static_reader(contract_config()), dir.path());
    let payload = permissive
        .generate_report(2025, 9)
        .expect("Permissive mode should not fail");
    assert!(!payload.data_available);
    assert_eq!(payload.display.availability, "N/A");

    let strict = ReportApi::with_fixtures(
        static_reader(AnsConfig {
            load_policy: LoadPolicy::Strict,
            ..contract_config()
        }),
        dir.path(),
    );
    assert!(matches!(
        strict.generate_report(2025, 9),
        Err(ApiError::DataNotFound(_))
    ));
}

#[test]
fn test_invalid_period_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let api = ReportApi::with_fixtures(static_reader(contract_config()), dir.path());

    assert!(matches!(
        api.generate_report(2025, 13),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        api.generate_report(0, 1),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_malformed_fixture_surfaces_import_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_fixture(dir.path(), "ans_9_2025.json", "no es json").expect("write fixture");
    let api = ReportApi::with_fixtures(static_reader(contract_config()), dir.path());

    assert!(matches!(
        api.generate_report(2025, 9),
        Err(ApiError::ImportError(_))
    ));
}

#[test]
fn test_hours_beyond_period_surfaces_data_quality_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_fixture(
        dir.path(),
        "ans_9_2025.json",
        r#"{"horas_totales_mes": 720, "horas_operativas": 720, "horas_no_operativas": 5}"#,
    )
    .expect("write fixture");
    let api = ReportApi::with_fixtures(static_reader(contract_config()), dir.path());

    assert!(matches!(
        api.generate_report(2025, 9),
        Err(ApiError::DataQualityError(_))
    ));
}

#[test]
fn test_locality_hours_beyond_camera_hours_surfaces_data_quality_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    // 系统级数据合法,Kennedy 超出 720 × 192 = 138.240 小时
    write_fixture(
        dir.path(),
        "ans_9_2025.json",
        r#"{
            "disponibilidad_mes": {
                "horas_totales_mes": 720,
                "horas_operativas": 700,
                "horas_no_operativas": 20
            },
            "disponibilidad_por_localidad": [
                {"localidad": "Kennedy", "total_camaras": 192, "horas_operativas": 137980, "horas_no_operativas": 580}
            ]
        }"#,
    )
    .expect("write fixture");
    let api = ReportApi::with_fixtures(static_reader(contract_config()), dir.path());

    assert!(matches!(
        api.generate_report(2025, 9),
        Err(ApiError::DataQualityError(_))
    ));
}

#[test]
fn test_history_failure_degrades_to_empty() {
    ans_report::logging::init_test();
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_fixture(dir.path(), "ans_9_2025.json", CRITICAL_FIXTURE).expect("write fixture");
    let fixtures = Arc::new(JsonFixtureSource::new(dir.path()));

    let api = ReportApi::new(
        static_reader(contract_config()),
        fixtures.clone(),
        fixtures,
        Arc::new(BrokenHistory),
        Arc::new(EmptyNarrativeSource),
    );

    let payload = api.generate_report(2025, 9).expect("Failed to generate report");
    assert_eq!(payload.historical_summary.total_periods, 0);
    assert!(payload.historical_entries.is_empty());
    assert_eq!(payload.display.average_availability, "N/A");
    assert_eq!(payload.display.compliance_rate, "N/A");
}

#[test]
fn test_monitoring_store_with_config_manager() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open connection");
    insert_test_config(&conn).expect("Failed to insert test config");
    set_config(&conn, config_keys::LOCALE, "en").expect("Failed to set locale");
    drop(conn);

    let store = Arc::new(MonitoringStore::new(&db_path).expect("Failed to open store"));
    let mut records = month_of_records(2025, 8, 31, &[("Suba", "S1", 0.0)]);
    records.extend(month_of_records(
        2025,
        9,
        30,
        &[("Kennedy", "K1", 1.0), ("Kennedy", "K2", 0.0), ("Suba", "S1", 0.0)],
    ));
    store
        .insert_daily_records(&records)
        .expect("Failed to insert records");

    let config_reader = Arc::new(ConfigManager::new(&db_path).expect("Failed to create config"));
    let api = ReportApi::with_monitoring_store(config_reader, store);
    let payload = api.generate_report(2025, 9).expect("Failed to generate report");

    // 2130 / 2160 = 98.61% → 预警,缺口 0.29 → 0.5%
    assert_eq!(payload.period_metrics.total_hours, 2160);
    assert_eq!(payload.system_availability.camera_count, 3);
    assert_eq!(payload.system_availability.status, ComplianceStatus::Warning);
    assert_eq!(payload.penalty_result.penalty_rate_pct, Decimal::new(5, 1));
    assert_eq!(payload.penalty_result.penalty_value, Decimal::from(2_500_000));
    assert_eq!(payload.period.label, "September 2025");

    assert_eq!(payload.locality_availabilities[0].unit_name, "Suba");
    assert_eq!(
        payload.locality_availabilities[1].status,
        ComplianceStatus::Warning
    );

    assert_eq!(payload.historical_summary.total_periods, 2);
    assert_eq!(payload.historical_summary.compliant_periods, 1);
}

#[test]
fn test_invalid_stored_config_fails_report() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open connection");
    set_config(&conn, config_keys::THRESHOLD_PCT, "101").expect("Failed to set threshold");
    drop(conn);

    let config_reader = Arc::new(ConfigManager::new(&db_path).expect("Failed to create config"));
    let store = Arc::new(MonitoringStore::new(&db_path).expect("Failed to open store"));
    let api = ReportApi::with_monitoring_store(config_reader, store);

    assert!(matches!(
        api.generate_report(2025, 9),
        Err(ApiError::InvalidConfiguration(_))
    ));
}

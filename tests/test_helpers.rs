// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、配置写入、监控数据生成等功能
// ==========================================

#![allow(dead_code)]

use ans_report::config::config_keys;
use ans_report::db::{ensure_schema, open_sqlite_connection};
use ans_report::importer::DailyAvailability;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 浮点比较容差
pub const EPS: f64 = 1e-9;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件(需要保持存活)
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是 UTF-8")?
        .to_string();

    let conn = open_sqlite_connection(&db_path)?;
    ensure_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

/// 写入一条 global 配置
pub fn set_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
         ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
        params![key, value],
    )?;
    Ok(())
}

/// 写入合同测试配置 (月合同额 5 亿比索)
pub fn insert_test_config(conn: &Connection) -> Result<(), Box<dyn Error>> {
    set_config(conn, config_keys::THRESHOLD_PCT, "98.9")?;
    set_config(conn, config_keys::WARNING_MARGIN_PCT, "1.0")?;
    set_config(conn, config_keys::MONTHLY_CONTRACT_VALUE, "500000000")?;
    set_config(conn, config_keys::CONTRACT_NUMBER, "SCJ-1809-2024")?;
    set_config(conn, config_keys::HISTORY_MONTHS, "12")?;
    Ok(())
}

/// 生成一个月的每日监控记录
///
/// # 参数
/// - cameras: (localidad, id_camara, 每日不可运行小时)
pub fn month_of_records(
    year: i32,
    month: u32,
    days: u32,
    cameras: &[(&str, &str, f64)],
) -> Vec<DailyAvailability> {
    let mut records = Vec::new();
    for day in 1..=days {
        let date = match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => date,
            None => continue,
        };
        for (locality, camera, down) in cameras {
            records.push(DailyAvailability {
                date,
                locality: locality.to_string(),
                camera_id: camera.to_string(),
                operative_hours: 24.0 - down,
                non_operative_hours: *down,
            });
        }
    }
    records
}

/// 写入 JSON 夹具
pub fn write_fixture(
    dir: &std::path::Path,
    file_name: &str,
    content: &str,
) -> Result<(), Box<dyn Error>> {
    std::fs::write(dir.join(file_name), content)?;
    Ok(())
}

// ==========================================
// ANS 合规报告 - 监控库数据源 (SQLite)
// ==========================================
// 表: disponibilidad_diaria(fecha, localidad, id_camara,
//                           horas_operativas, horas_no_operativas)
// 粒度: 每摄像头每日一行,小时数为摄像头小时
// 约定: 期间无行 → 无数据 (Ok(None) / 空集合)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::history::HistoricalEntry;
use crate::domain::metrics::{RawLocalityMetrics, RawPeriodMetrics};
use crate::domain::period::{ReportPeriod, MIN_YEAR};
use crate::engine::availability::availability_pct;
use crate::engine::presentation::spanish_month_name;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::source_trait::{HistorySource, LocalitySource, MetricsSource};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// 无备注时的占位
const EMPTY_NOTES: &str = "-";

// ==========================================
// DailyAvailability - 每日监控记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAvailability {
    pub date: NaiveDate,
    pub locality: String,
    pub camera_id: String,
    pub operative_hours: f64,
    pub non_operative_hours: f64,
}

// ==========================================
// MonitoringStore - 监控库数据源
// ==========================================
pub struct MonitoringStore {
    conn: Arc<Mutex<Connection>>,
}

impl MonitoringStore {
    /// 打开监控库
    pub fn new(db_path: &str) -> ImportResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| ImportError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 (与 ConfigManager 共享连接)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> ImportResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ImportError::DatabaseConnectionError(format!("锁获取失败: {}", e)))
    }

    /// 批量写入每日记录 (同日同摄像头覆盖)
    ///
    /// # 返回
    /// - 写入行数
    pub fn insert_daily_records(&self, records: &[DailyAvailability]) -> ImportResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO disponibilidad_diaria
                     (fecha, localidad, id_camara, horas_operativas, horas_no_operativas)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(fecha, id_camara) DO UPDATE SET
                     localidad = ?2, horas_operativas = ?4, horas_no_operativas = ?5",
            )?;
            for record in records {
                count += stmt.execute(params![
                    record.date.format("%Y-%m-%d").to_string(),
                    record.locality,
                    record.camera_id,
                    record.operative_hours,
                    record.non_operative_hours,
                ])?;
            }
        }

        tx.commit()?;
        tracing::info!(rows = count, "监控记录已写入");
        Ok(count)
    }
}

/// 期间日期区间 [start, end)
fn date_range(first: ReportPeriod, last: ReportPeriod) -> (String, String) {
    (
        first.first_day().format("%Y-%m-%d").to_string(),
        last.next().first_day().format("%Y-%m-%d").to_string(),
    )
}

impl MetricsSource for MonitoringStore {
    fn period_metrics(&self, period: ReportPeriod) -> ImportResult<Option<RawPeriodMetrics>> {
        let conn = self.lock()?;
        let (start, end) = date_range(period, period);

        let (rows, cameras, operative, non_operative): (i64, i64, f64, f64) = conn.query_row(
            "SELECT COUNT(*),
                    COUNT(DISTINCT id_camara),
                    COALESCE(SUM(horas_operativas), 0),
                    COALESCE(SUM(horas_no_operativas), 0)
             FROM disponibilidad_diaria
             WHERE fecha >= ?1 AND fecha < ?2",
            params![start, end],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

        if rows == 0 {
            return Ok(None);
        }

        tracing::debug!(period = %period, rows, cameras, "监控库期间汇总");

        Ok(Some(RawPeriodMetrics {
            total_hours: None,
            operative_hours: operative,
            non_operative_hours: non_operative,
            camera_count: Some(cameras as u32),
        }))
    }
}

impl LocalitySource for MonitoringStore {
    /// 按可用率降序、名称升序
    fn locality_metrics(&self, period: ReportPeriod) -> ImportResult<Vec<RawLocalityMetrics>> {
        let conn = self.lock()?;
        let (start, end) = date_range(period, period);

        let mut stmt = conn.prepare(
            "SELECT localidad,
                    COUNT(DISTINCT id_camara) AS camaras,
                    SUM(horas_operativas) AS horas_op,
                    SUM(horas_no_operativas) AS horas_no_op,
                    CASE WHEN SUM(horas_operativas) + SUM(horas_no_operativas) > 0
                         THEN 100.0 * SUM(horas_operativas)
                              / (SUM(horas_operativas) + SUM(horas_no_operativas))
                         ELSE 0 END AS disponibilidad
             FROM disponibilidad_diaria
             WHERE fecha >= ?1 AND fecha < ?2
             GROUP BY localidad
             ORDER BY disponibilidad DESC, localidad ASC",
        )?;

        let rows = stmt.query_map(params![start, end], |row| {
            Ok(RawLocalityMetrics {
                locality: row.get(0)?,
                camera_count: row.get::<_, i64>(1)? as u32,
                operative_hours: row.get(2)?,
                non_operative_hours: row.get(3)?,
                total_hours: None,
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl HistorySource for MonitoringStore {
    /// 截至 `period` (含) 的最近 `months_back` 个月,按时间顺序
    fn history(&self, period: ReportPeriod, months_back: u32) -> ImportResult<Vec<HistoricalEntry>> {
        if months_back == 0 {
            return Ok(Vec::new());
        }

        let first = period
            .months_before(months_back - 1)
            .or_else(|| ReportPeriod::new(MIN_YEAR, 1))
            .unwrap_or(period);

        let conn = self.lock()?;
        let (start, end) = date_range(first, period);

        let mut stmt = conn.prepare(
            "SELECT CAST(substr(fecha, 1, 4) AS INTEGER) AS anio,
                    CAST(substr(fecha, 6, 2) AS INTEGER) AS mes,
                    SUM(horas_operativas),
                    SUM(horas_no_operativas)
             FROM disponibilidad_diaria
             WHERE fecha >= ?1 AND fecha < ?2
             GROUP BY anio, mes
             ORDER BY anio, mes",
        )?;

        let rows = stmt.query_map(params![start, end], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (year, month, operative, non_operative) = row?;
            entries.push(HistoricalEntry {
                period_label: format!("{} {}", spanish_month_name(month as u32), year),
                availability_pct: availability_pct(operative, non_operative),
                notes: EMPTY_NOTES.to_string(),
            });
        }

        Ok(entries)
    }
}

// ==========================================
// ANS 合规报告 - Excel/CSV 抽取数据源
// ==========================================
// 目录约定:
// - disponibilidad_{year}_{MM}.{xlsx|xls|csv}: localidad 表
//   表头 LOCALIDAD / CÁMARAS / HRS OPERATIVAS / HRS NO OPER.
// - historico_ans.{xlsx|xls|csv}: 历史表
//   表头 MES / DISPONIBILIDAD / OBSERVACIONES
// 系统级小时 = 各 localidad 摄像头小时之和
// ==========================================

use crate::domain::history::HistoricalEntry;
use crate::domain::metrics::{RawLocalityMetrics, RawPeriodMetrics};
use crate::domain::period::ReportPeriod;
use crate::engine::presentation::spanish_month_name;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{normalize_header, FieldMapper};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::source_trait::{HistorySource, LocalitySource, MetricsSource};
use std::path::{Path, PathBuf};

/// 支持的扩展名 (按优先级)
const EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// 历史表文件名 (不含扩展名)
const HISTORY_STEM: &str = "historico_ans";

// ==========================================
// SpreadsheetSource - 表格抽取数据源
// ==========================================
#[derive(Debug, Clone)]
pub struct SpreadsheetSource {
    dir: PathBuf,
}

impl SpreadsheetSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// 查找 {stem}.{ext},按扩展名优先级
    fn find_file(&self, stem: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", stem, ext)))
            .find(|path| path.is_file())
    }

    /// 期间 localidad 表路径
    pub fn locality_file(&self, period: ReportPeriod) -> Option<PathBuf> {
        self.find_file(&format!(
            "disponibilidad_{}_{:02}",
            period.year, period.month
        ))
    }

    /// 历史表路径
    pub fn history_file(&self) -> Option<PathBuf> {
        self.find_file(HISTORY_STEM)
    }
}

impl LocalitySource for SpreadsheetSource {
    fn locality_metrics(&self, period: ReportPeriod) -> ImportResult<Vec<RawLocalityMetrics>> {
        let path = match self.locality_file(period) {
            Some(path) => path,
            None => return Ok(Vec::new()),
        };

        let records = UniversalFileParser.parse(&path)?;
        let mapper = FieldMapper;

        let mut localities = Vec::with_capacity(records.len());
        for (index, row) in records.iter().enumerate() {
            // 行号从 2 开始 (第 1 行为表头)
            if let Some(locality) = mapper.map_locality_row(row, index + 2)? {
                localities.push(locality);
            }
        }

        tracing::debug!(
            file = %path.display(),
            rows = localities.len(),
            "localidad 表已读取"
        );
        Ok(localities)
    }
}

impl MetricsSource for SpreadsheetSource {
    fn period_metrics(&self, period: ReportPeriod) -> ImportResult<Option<RawPeriodMetrics>> {
        let localities = self.locality_metrics(period)?;
        if localities.is_empty() {
            return Ok(None);
        }

        Ok(Some(RawPeriodMetrics {
            total_hours: None,
            operative_hours: localities.iter().map(|l| l.operative_hours).sum(),
            non_operative_hours: localities.iter().map(|l| l.non_operative_hours).sum(),
            camera_count: Some(localities.iter().map(|l| l.camera_count).sum()),
        }))
    }
}

impl HistorySource for SpreadsheetSource {
    /// 只保留窗口内的期间; 无法识别的标签原样保留
    fn history(&self, period: ReportPeriod, months_back: u32) -> ImportResult<Vec<HistoricalEntry>> {
        let path = match self.history_file() {
            Some(path) => path,
            None => return Ok(Vec::new()),
        };
        if months_back == 0 {
            return Ok(Vec::new());
        }

        let first = period.months_before(months_back - 1);
        let records = UniversalFileParser.parse(&path)?;
        let mapper = FieldMapper;
        let scale = mapper.detect_availability_scale(&records);

        let mut entries = Vec::new();
        for (index, row) in records.iter().enumerate() {
            let entry = match mapper.map_history_row(row, index + 2, scale)? {
                Some(entry) => entry,
                None => continue,
            };

            match parse_period_label(&entry.period_label) {
                Some(p) if p > period => continue,
                Some(p) if first.map_or(false, |f| p < f) => continue,
                Some(_) => {}
                None => tracing::debug!(label = %entry.period_label, "历史期间标签无法识别"),
            }
            entries.push(entry);
        }

        let skip = entries.len().saturating_sub(months_back as usize);
        Ok(entries.into_iter().skip(skip).collect())
    }
}

/// 解析 "Enero 2025" / "Enero de 2025"
pub fn parse_period_label(label: &str) -> Option<ReportPeriod> {
    let tokens: Vec<String> = label
        .split_whitespace()
        .map(normalize_header)
        .filter(|t| t != "DE")
        .collect();

    let (month_token, year_token) = match tokens.as_slice() {
        [month, year] => (month, year),
        _ => return None,
    };

    let month = (1..=12).find(|m| normalize_header(spanish_month_name(*m)) == *month_token)?;
    let year = year_token.parse::<i32>().ok()?;
    ReportPeriod::new(year, month)
}

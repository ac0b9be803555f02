// ==========================================
// ANS 合规报告 - JSON 夹具数据源
// ==========================================
// 文件: {dir}/ans_{month}_{year}.json
//   回退: {dir}/ans_{西语月份小写}_{year}.json (例: ans_septiembre_2025.json)
// 约定: 文件不存在 → 无数据; JSON 损坏 → JsonParseError
// ==========================================

use crate::domain::history::HistoricalEntry;
use crate::domain::metrics::{NarrativeInputs, RawLocalityMetrics, RawPeriodMetrics};
use crate::domain::period::ReportPeriod;
use crate::engine::presentation::spanish_month_name;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::source_trait::{HistorySource, LocalitySource, MetricsSource, NarrativeSource};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ===== 夹具文件结构 =====

#[derive(Debug, Default, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    disponibilidad_mes: Option<FixtureHours>,
    #[serde(flatten)]
    top_level: FixtureHours,
    #[serde(default)]
    disponibilidad_por_localidad: Vec<FixtureLocality>,
    #[serde(default)]
    historico_ans: Vec<FixtureHistory>,
    #[serde(default)]
    causas_incumplimiento: Vec<String>,
    #[serde(default)]
    acciones_correctivas: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FixtureHours {
    #[serde(default)]
    horas_totales_mes: Option<f64>,
    #[serde(default)]
    horas_operativas: Option<f64>,
    #[serde(default)]
    horas_no_operativas: Option<f64>,
}

impl FixtureHours {
    fn has_hours(&self) -> bool {
        self.horas_operativas.is_some() || self.horas_no_operativas.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct FixtureLocality {
    localidad: String,
    #[serde(default)]
    total_camaras: u32,
    #[serde(default)]
    horas_operativas: f64,
    #[serde(default)]
    horas_no_operativas: f64,
}

#[derive(Debug, Deserialize)]
struct FixtureHistory {
    mes: String,
    disponibilidad: f64,
    #[serde(default)]
    observaciones: String,
}

// ==========================================
// JsonFixtureSource - JSON 夹具数据源
// ==========================================
#[derive(Debug, Clone)]
pub struct JsonFixtureSource {
    dir: PathBuf,
}

impl JsonFixtureSource {
    /// 构造函数
    ///
    /// # 参数
    /// - `dir`: 夹具目录
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// 期间对应的夹具文件 (按优先级查找)
    pub fn fixture_path(&self, period: ReportPeriod) -> Option<PathBuf> {
        let numeric = self
            .dir
            .join(format!("ans_{}_{}.json", period.month, period.year));
        if numeric.is_file() {
            return Some(numeric);
        }

        let named = self.dir.join(format!(
            "ans_{}_{}.json",
            spanish_month_name(period.month).to_lowercase(),
            period.year
        ));
        if named.is_file() {
            return Some(named);
        }

        None
    }

    /// 读取并解析夹具,文件不存在返回 None
    fn load(&self, period: ReportPeriod) -> ImportResult<Option<FixtureFile>> {
        let path = match self.fixture_path(period) {
            Some(path) => path,
            None => {
                tracing::debug!(period = %period, dir = %self.dir.display(), "未找到 JSON 夹具");
                return Ok(None);
            }
        };

        let content = std::fs::read_to_string(&path)?;
        let fixture = serde_json::from_str::<FixtureFile>(&content).map_err(|e| {
            ImportError::JsonParseError {
                file: path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Some(fixture))
    }
}

impl MetricsSource for JsonFixtureSource {
    fn period_metrics(&self, period: ReportPeriod) -> ImportResult<Option<RawPeriodMetrics>> {
        let fixture = match self.load(period)? {
            Some(fixture) => fixture,
            None => return Ok(None),
        };

        // 嵌套块优先,其次顶层字段
        let hours = match fixture.disponibilidad_mes {
            Some(nested) if nested.has_hours() => nested,
            _ if fixture.top_level.has_hours() => fixture.top_level,
            _ => return Ok(None),
        };

        let total_hours = match hours.horas_totales_mes {
            None => None,
            Some(h) if h.is_finite() && h >= 0.0 && h.fract() == 0.0 => Some(h as u64),
            Some(h) => {
                return Err(ImportError::TypeConversionError {
                    row: 0,
                    field: "horas_totales_mes".to_string(),
                    message: format!("总小时数必须为非负整数: {}", h),
                })
            }
        };

        Ok(Some(RawPeriodMetrics {
            total_hours,
            operative_hours: hours.horas_operativas.unwrap_or(0.0),
            non_operative_hours: hours.horas_no_operativas.unwrap_or(0.0),
            camera_count: None,
        }))
    }
}

impl LocalitySource for JsonFixtureSource {
    fn locality_metrics(&self, period: ReportPeriod) -> ImportResult<Vec<RawLocalityMetrics>> {
        let fixture = match self.load(period)? {
            Some(fixture) => fixture,
            None => return Ok(Vec::new()),
        };

        Ok(fixture
            .disponibilidad_por_localidad
            .into_iter()
            .map(|loc| RawLocalityMetrics {
                locality: loc.localidad,
                camera_count: loc.total_camaras,
                operative_hours: loc.horas_operativas,
                non_operative_hours: loc.horas_no_operativas,
                total_hours: None,
            })
            .collect())
    }
}

impl HistorySource for JsonFixtureSource {
    /// 夹具中的历史已按时间顺序排列,取最后 `months_back` 条
    fn history(&self, period: ReportPeriod, months_back: u32) -> ImportResult<Vec<HistoricalEntry>> {
        let fixture = match self.load(period)? {
            Some(fixture) => fixture,
            None => return Ok(Vec::new()),
        };

        let entries = fixture.historico_ans;
        let skip = entries.len().saturating_sub(months_back as usize);

        Ok(entries
            .into_iter()
            .skip(skip)
            .map(|h| HistoricalEntry {
                period_label: h.mes,
                availability_pct: h.disponibilidad,
                notes: h.observaciones,
            })
            .collect())
    }
}

impl NarrativeSource for JsonFixtureSource {
    fn narrative_inputs(&self, period: ReportPeriod) -> ImportResult<NarrativeInputs> {
        Ok(self
            .load(period)?
            .map(|fixture| NarrativeInputs {
                causes: fixture.causas_incumplimiento,
                corrective_actions: fixture.acciones_correctivas,
            })
            .unwrap_or_default())
    }
}

// ==========================================
// ANS 合规报告 - 字段映射器实现
// ==========================================
// 职责: 表格原始行 → RawLocalityMetrics / HistoricalEntry
// 表头匹配: 忽略大小写、重音、首尾空白与结尾句点
// 数字格式: "99,05%" / "99.05" / "1.440,5" 均可
// 可用率刻度按整列判定 (见 detect_availability_scale),不逐格猜测
// ==========================================

use crate::domain::history::HistoricalEntry;
use crate::domain::metrics::RawLocalityMetrics;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;

/// 汇总行标签,不作为 localidad
const TOTAL_LABELS: [&str; 3] = ["TOTAL", "TOTAL GENERAL", "TOTALES"];

/// 可用率列的刻度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentScale {
    /// 单元格为百分数: 99.05 / "99,05%"
    Percent,
    /// 单元格为比例 (Excel 百分比格式读出的原值): 0.9905
    Fraction,
}

pub struct FieldMapper;

impl FieldMapper {
    /// 映射 localidad 行
    ///
    /// # 返回
    /// - Ok(Some): 有效行
    /// - Ok(None): 汇总行或 localidad 为空
    pub fn map_locality_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<Option<RawLocalityMetrics>> {
        let row = normalize_row(row);

        let locality = match self.get_string(&row, "LOCALIDAD") {
            Some(v) => v,
            None => return Ok(None),
        };
        if TOTAL_LABELS.contains(&normalize_header(&locality).as_str()) {
            return Ok(None);
        }

        let camera_count = self.parse_count(&row, "CAMARAS", row_number)?.unwrap_or(0);
        let operative_hours = self
            .parse_number(&row, "HRS OPERATIVAS", row_number)?
            .unwrap_or(0.0);
        let non_operative_hours = self
            .parse_number(&row, "HRS NO OPER", row_number)?
            .unwrap_or(0.0);

        Ok(Some(RawLocalityMetrics {
            locality,
            camera_count,
            operative_hours,
            non_operative_hours,
            total_hours: None,
        }))
    }

    /// 映射历史行
    ///
    /// # 返回
    /// - Ok(None): 期间标签为空
    /// - Err: 可用率缺失或无法解析
    pub fn map_history_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
        scale: PercentScale,
    ) -> ImportResult<Option<HistoricalEntry>> {
        let row = normalize_row(row);

        let period_label = match self.get_string(&row, "MES") {
            Some(v) => v,
            None => return Ok(None),
        };

        let availability_pct = self
            .parse_pct(&row, "DISPONIBILIDAD", row_number, scale)?
            .ok_or_else(|| ImportError::FieldMappingError {
                row: row_number,
                message: format!("{}: 缺少 DISPONIBILIDAD", period_label),
            })?;

        Ok(Some(HistoricalEntry {
            period_label,
            availability_pct,
            notes: self.get_string(&row, "OBSERVACIONES").unwrap_or_default(),
        }))
    }

    /// 判定历史表 DISPONIBILIDAD 列的刻度
    ///
    /// 整列均不带 % 且都在 [0, 1] 内 → Fraction (Excel 百分比单元格);
    /// 否则 → Percent,此时单独的 0.8 就是 0.8%
    pub fn detect_availability_scale(&self, records: &[HashMap<String, String>]) -> PercentScale {
        let mut seen = false;
        for record in records {
            let row = normalize_row(record);
            let value = match self.get_string(&row, "DISPONIBILIDAD") {
                Some(v) => v,
                None => continue,
            };
            if value.trim().ends_with('%') {
                return PercentScale::Percent;
            }
            match parse_decimal_number(&value) {
                Some(v) if (0.0..=1.0).contains(&v) => seen = true,
                Some(_) => return PercentScale::Percent,
                // 无法解析的单元格在映射时报错
                None => {}
            }
        }

        if seen {
            PercentScale::Fraction
        } else {
            PercentScale::Percent
        }
    }

    /// 提取字符串字段,支持多个可能的列名(别名)
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        let aliases: &[&str] = match key {
            "LOCALIDAD" => &["LOCALIDAD", "LOCALIDADES"],
            "CAMARAS" => &["CAMARAS", "TOTAL CAMARAS", "N CAMARAS", "NO CAMARAS"],
            "HRS OPERATIVAS" => &["HRS OPERATIVAS", "HORAS OPERATIVAS"],
            "HRS NO OPER" => &[
                "HRS NO OPER",
                "HRS NO OPERATIVAS",
                "HORAS NO OPERATIVAS",
            ],
            "MES" => &["MES", "PERIODO"],
            "OBSERVACIONES" => &["OBSERVACIONES", "NOTAS"],
            _ => &[],
        };

        std::iter::once(key)
            .chain(aliases.iter().copied())
            .filter_map(|alias| row.get(alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(|v| v.to_string())
    }

    /// 解析小时数
    fn parse_number(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => parse_decimal_number(&value).map(Some).ok_or_else(|| {
                ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为数字: {}", value),
                }
            }),
        }
    }

    /// 解析摄像头数量
    fn parse_count(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<u32>> {
        match self.parse_number(row, key, row_number)? {
            None => Ok(None),
            Some(value) if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 => {
                Ok(Some(value as u32))
            }
            Some(value) => Err(ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("摄像头数量必须为非负整数: {}", value),
            }),
        }
    }

    /// 解析百分比
    fn parse_pct(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
        scale: PercentScale,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => {
                let pct = parse_percentage(&value).ok_or_else(|| {
                    ImportError::TypeConversionError {
                        row: row_number,
                        field: key.to_string(),
                        message: format!("无法解析为百分比: {}", value),
                    }
                })?;
                match scale {
                    PercentScale::Fraction if !value.ends_with('%') => Ok(Some(pct * 100.0)),
                    _ => Ok(Some(pct)),
                }
            }
        }
    }
}

/// 表头规范化: 大写、去重音、合并空白、去结尾句点
pub fn normalize_header(header: &str) -> String {
    let folded: String = header
        .trim_start_matches('\u{feff}')
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'A',
            'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'E',
            'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
            'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
            'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
            'ñ' | 'Ñ' => 'N',
            '°' | 'º' => ' ',
            _ => c.to_ascii_uppercase(),
        })
        .collect();

    folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches('.')
        .trim()
        .to_string()
}

/// 规范化整行的表头
fn normalize_row(row: &HashMap<String, String>) -> HashMap<String, String> {
    row.iter()
        .map(|(k, v)| (normalize_header(k), v.clone()))
        .collect()
}

/// 解析数字,兼容小数逗号与千分位点
///
/// - "1.440,5" → 1440.5 (同时出现时,点为千分位)
/// - "99,05" → 99.05
/// - "137980.25" → 137980.25
pub fn parse_decimal_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned.replace(',', ".")
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 解析百分数: "99,05%" / "99.05" → 99.05, "0.8" → 0.8
///
/// 比例换算由列刻度决定,见 FieldMapper::detect_availability_scale
pub fn parse_percentage(raw: &str) -> Option<f64> {
    parse_decimal_number(raw.trim().trim_end_matches('%'))
}

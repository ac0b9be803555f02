// ==========================================
// ANS 合规报告 - 数据源 Trait 定义
// ==========================================
// 职责: 定义报告所需的外部数据接口(不包含实现)
// 约定:
// - "无数据" 用 Ok(None) / 空集合表达,不是错误
// - 数据损坏 (格式错误、查询失败) 用 Err 表达,不隐藏
// ==========================================

use crate::domain::history::HistoricalEntry;
use crate::domain::metrics::{NarrativeInputs, RawLocalityMetrics, RawPeriodMetrics};
use crate::domain::period::ReportPeriod;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// MetricsSource - 系统级小时数
// ==========================================
pub trait MetricsSource: Send + Sync {
    /// 获取期间系统级小时数
    ///
    /// # 返回
    /// - Ok(Some): 有记录
    /// - Ok(None): 数据源无该期间记录
    fn period_metrics(&self, period: ReportPeriod) -> ImportResult<Option<RawPeriodMetrics>>;
}

// ==========================================
// LocalitySource - localidad 小时数
// ==========================================
pub trait LocalitySource: Send + Sync {
    /// 获取期间各 localidad 小时数 (按展示顺序)
    fn locality_metrics(&self, period: ReportPeriod) -> ImportResult<Vec<RawLocalityMetrics>>;
}

// ==========================================
// HistorySource - 历史可用率
// ==========================================
pub trait HistorySource: Send + Sync {
    /// 获取截至 `period` (含) 的最近 `months_back` 个月历史,按时间顺序
    fn history(&self, period: ReportPeriod, months_back: u32)
        -> ImportResult<Vec<HistoricalEntry>>;
}

// ==========================================
// NarrativeSource - 原因与纠正措施
// ==========================================
pub trait NarrativeSource: Send + Sync {
    fn narrative_inputs(&self, period: ReportPeriod) -> ImportResult<NarrativeInputs>;
}

// ==========================================
// FileParser - 表格文件解析
// ==========================================
pub trait FileParser {
    /// 解析为原始记录 (表头 → 单元格文本)
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// EmptyNarrativeSource - 无说明素材
// ==========================================
// 数据源不维护原因/措施时使用,文字段落回退为占位条目
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyNarrativeSource;

impl NarrativeSource for EmptyNarrativeSource {
    fn narrative_inputs(&self, _period: ReportPeriod) -> ImportResult<NarrativeInputs> {
        Ok(NarrativeInputs::default())
    }
}

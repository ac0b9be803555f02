// ==========================================
// ANS 合规报告 - 数据源层
// ==========================================
// 职责: 外部数据读取,交给引擎层的是已抽取的原始记录
// 支持: JSON 夹具, SQLite 监控库, Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod json_source;
pub mod monitoring_store;
pub mod source_trait;
pub mod spreadsheet_source;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, PercentScale};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use json_source::JsonFixtureSource;
pub use monitoring_store::{DailyAvailability, MonitoringStore};
pub use spreadsheet_source::SpreadsheetSource;

// 重导出 Trait 接口
pub use source_trait::{
    EmptyNarrativeSource, FileParser, HistorySource, LocalitySource, MetricsSource,
    NarrativeSource,
};

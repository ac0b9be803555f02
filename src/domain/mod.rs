// ==========================================
// ANS 合规报告 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod availability;
pub mod history;
pub mod metrics;
pub mod penalty;
pub mod period;
pub mod report;
pub mod types;

// 重导出核心类型
pub use availability::UnitAvailability;
pub use history::{HistoricalEntry, HistoricalRow, HistoricalSummary};
pub use metrics::{NarrativeInputs, PeriodMetrics, RawLocalityMetrics, RawPeriodMetrics};
pub use penalty::PenaltyResult;
pub use period::ReportPeriod;
pub use report::{DisplayFigures, LocalityDisplayRow, PeriodInfo, ReportNarrative, ReportPayload};
pub use types::{ComplianceStatus, LoadPolicy};

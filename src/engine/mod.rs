// ==========================================
// ANS 合规报告 - 引擎层
// ==========================================
// 职责: 纯计算组件 (加载 / 可用率 / 分类 / 罚金 / 历史 / 组装)
// 红线: 不做 I/O,不持有全局状态,错误不吞
// ==========================================

pub mod assembler;
pub mod availability;
pub mod classification;
pub mod error;
pub mod history;
pub mod metrics_loader;
pub mod narrative;
pub mod penalty;
pub mod presentation;

// 重导出核心引擎
pub use assembler::{report_period, ReportAssembler, ReportInputs};
pub use availability::AvailabilityCalculator;
pub use classification::ClassificationEngine;
pub use error::{AnsError, AnsResult};
pub use history::HistoricalAggregator;
pub use metrics_loader::PeriodMetricsLoader;
pub use narrative::{NarrativeBuilder, NarrativeContext};
pub use penalty::{PenaltyCalculator, PenaltyTier, TierSchedule};

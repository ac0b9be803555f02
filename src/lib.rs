// ==========================================
// ANS 合规报告 - 核心库
// ==========================================
// 合同: SCJ-1809-2024 视频监控维保
// 职责: 月度 ANS 可用率、分类、罚金、历史汇总 → ReportPayload
// 系统定位: 计算核心,文档渲染由协作方完成
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 纯计算
pub mod engine;

// 数据源层 - 外部数据
pub mod importer;

// 配置层 - 合同参数
pub mod config;

// 数据库基础设施(连接初始化/PRAGMA 统一)
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 报告接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ComplianceStatus, LoadPolicy};

// 领域实体
pub use domain::{
    HistoricalEntry, HistoricalSummary, PenaltyResult, PeriodMetrics, ReportPayload,
    ReportPeriod, UnitAvailability,
};

// 引擎
pub use engine::{
    AnsError, AnsResult, AvailabilityCalculator, ClassificationEngine, HistoricalAggregator,
    PenaltyCalculator, PeriodMetricsLoader, ReportAssembler, TierSchedule,
};

// 配置
pub use config::{AnsConfig, AnsConfigReader, ConfigManager, StaticConfigReader};

// API
pub use api::{ApiError, ApiResult, ReportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "ANS Compliance Report";

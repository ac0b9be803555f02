// ==========================================
// ANS 合规报告 - API 层
// ==========================================
// 职责: 对外提供报告生成接口,供命令行与渲染协作方调用
// ==========================================

pub mod error;
pub mod report_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use report_api::ReportApi;

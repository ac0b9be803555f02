// ==========================================
// ANS 合规报告 - 报告 API
// ==========================================
// 职责: 读取配置与数据源,调用 ReportAssembler 生成 ReportPayload
// 架构: API 层 → 数据源 (Trait) + 配置读取 (Trait) → 引擎层
// 依赖注入: 所有协作方由构造函数传入,不持有全局单例
// ==========================================

use std::path::Path;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::config::config_reader::AnsConfigReader;
use crate::domain::report::ReportPayload;
use crate::engine::assembler::{report_period, ReportAssembler, ReportInputs};
use crate::importer::json_source::JsonFixtureSource;
use crate::importer::monitoring_store::MonitoringStore;
use crate::importer::source_trait::{
    EmptyNarrativeSource, HistorySource, LocalitySource, MetricsSource, NarrativeSource,
};
use crate::importer::spreadsheet_source::SpreadsheetSource;

// ==========================================
// ReportApi - 报告 API
// ==========================================
pub struct ReportApi {
    config_reader: Arc<dyn AnsConfigReader>,
    metrics: Arc<dyn MetricsSource>,
    localities: Arc<dyn LocalitySource>,
    history: Arc<dyn HistorySource>,
    narrative: Arc<dyn NarrativeSource>,
}

impl ReportApi {
    /// 创建新的 ReportApi 实例
    ///
    /// # 参数
    /// - config_reader: 合同参数读取
    /// - metrics: 系统级小时数
    /// - localities: localidad 小时数
    /// - history: 历史可用率
    /// - narrative: 原因与纠正措施
    pub fn new(
        config_reader: Arc<dyn AnsConfigReader>,
        metrics: Arc<dyn MetricsSource>,
        localities: Arc<dyn LocalitySource>,
        history: Arc<dyn HistorySource>,
        narrative: Arc<dyn NarrativeSource>,
    ) -> Self {
        Self {
            config_reader,
            metrics,
            localities,
            history,
            narrative,
        }
    }

    /// 全部数据取自 JSON 夹具目录
    pub fn with_fixtures<P: AsRef<Path>>(
        config_reader: Arc<dyn AnsConfigReader>,
        fixtures_dir: P,
    ) -> Self {
        let source = Arc::new(JsonFixtureSource::new(fixtures_dir));
        Self::new(
            config_reader,
            source.clone(),
            source.clone(),
            source.clone(),
            source,
        )
    }

    /// 数据取自监控库,无原因/措施素材
    pub fn with_monitoring_store(
        config_reader: Arc<dyn AnsConfigReader>,
        store: Arc<MonitoringStore>,
    ) -> Self {
        Self::new(
            config_reader,
            store.clone(),
            store.clone(),
            store,
            Arc::new(EmptyNarrativeSource),
        )
    }

    /// 数据取自 Excel/CSV 抽取目录,无原因/措施素材
    pub fn with_spreadsheets<P: AsRef<Path>>(
        config_reader: Arc<dyn AnsConfigReader>,
        extracts_dir: P,
    ) -> Self {
        let source = Arc::new(SpreadsheetSource::new(extracts_dir));
        Self::new(
            config_reader,
            source.clone(),
            source.clone(),
            source,
            Arc::new(EmptyNarrativeSource),
        )
    }

    /// 生成报告载荷
    ///
    /// # 参数
    /// - year: 1-9999
    /// - month: 1-12
    ///
    /// # 返回
    /// - Ok(ReportPayload): 报告载荷
    /// - Err(ApiError): 期间非法 / 配置非法 / 数据源读取失败 / 严格模式无数据
    ///
    /// # 回退
    /// - 历史读取失败 → 告警并按"无历史"处理
    pub fn generate_report(&self, year: i32, month: u32) -> ApiResult<ReportPayload> {
        let period = report_period(year, month)?;
        let config = self.config_reader.load_ans_config()?;
        let history_months = config.history_months;
        let assembler = ReportAssembler::new(config)?;

        tracing::info!(period = %period, "开始生成 ANS 报告");

        let raw_metrics = self.metrics.period_metrics(period)?;
        let raw_localities = self.localities.locality_metrics(period)?;
        let narrative_inputs = self.narrative.narrative_inputs(period)?;

        let history = match self.history.history(period, history_months) {
            Ok(entries) => Some(entries),
            Err(e) => {
                tracing::warn!(period = %period, error = %e, "历史数据读取失败,按无历史处理");
                None
            }
        };

        let inputs = ReportInputs {
            period,
            raw_metrics,
            raw_localities,
            history,
            narrative_inputs,
        };

        Ok(assembler.assemble(&inputs)?)
    }

    /// 生成报告载荷 (格式化 JSON)
    pub fn generate_report_json(&self, year: i32, month: u32) -> ApiResult<String> {
        let payload = self.generate_report(year, month)?;
        Ok(serde_json::to_string_pretty(&payload)?)
    }
}

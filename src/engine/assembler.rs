// ==========================================
// ANS 合规报告 - 报告组装器
// ==========================================
// 职责: 组合各引擎输出 → ReportPayload
// 流程: 加载 → 可用率 → {分类, 罚金} → 组装 ← 历史汇总
// 红线: 纯组合,不做 I/O,下层错误原样上抛
// 回退: 历史缺失 → 空汇总 (非错误)
// ==========================================

use crate::config::ans_config::AnsConfig;
use crate::domain::availability::UnitAvailability;
use crate::domain::history::{HistoricalEntry, HistoricalRow, HistoricalSummary};
use crate::domain::metrics::{NarrativeInputs, RawLocalityMetrics, RawPeriodMetrics};
use crate::domain::penalty::PenaltyResult;
use crate::domain::period::ReportPeriod;
use crate::domain::report::{DisplayFigures, LocalityDisplayRow, PeriodInfo, ReportPayload};
use crate::engine::availability::AvailabilityCalculator;
use crate::engine::classification::ClassificationEngine;
use crate::engine::error::{AnsError, AnsResult};
use crate::engine::history::HistoricalAggregator;
use crate::engine::metrics_loader::PeriodMetricsLoader;
use crate::engine::narrative::{NarrativeBuilder, NarrativeContext};
use crate::engine::penalty::PenaltyCalculator;
use crate::engine::presentation::{
    format_cop, format_hours, format_pct, format_pct_1, format_threshold,
};
use crate::i18n::t;
use tracing::info;

// ==========================================
// ReportInputs - 已抽取的原始输入
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInputs {
    pub period: ReportPeriod,
    pub raw_metrics: Option<RawPeriodMetrics>,     // None = 数据源无记录
    pub raw_localities: Vec<RawLocalityMetrics>,
    pub history: Option<Vec<HistoricalEntry>>,     // None = 历史不可用
    pub narrative_inputs: NarrativeInputs,
}

impl ReportInputs {
    /// 构造空输入 (全部走回退)
    pub fn new(period: ReportPeriod) -> Self {
        Self {
            period,
            raw_metrics: None,
            raw_localities: Vec::new(),
            history: None,
            narrative_inputs: NarrativeInputs::default(),
        }
    }
}

/// 校验报告期间
///
/// # 错误
/// - 年份不在 1-9999 或月份不在 1-12 → InvalidPeriod
pub fn report_period(year: i32, month: u32) -> AnsResult<ReportPeriod> {
    ReportPeriod::new(year, month).ok_or(AnsError::InvalidPeriod { year, month })
}

// ==========================================
// ReportAssembler - 报告组装器
// ==========================================
pub struct ReportAssembler {
    config: AnsConfig,
    loader: PeriodMetricsLoader,
    calculator: AvailabilityCalculator,
    classifier: ClassificationEngine,
    penalty: PenaltyCalculator,
    aggregator: HistoricalAggregator,
    narrative: NarrativeBuilder,
}

impl ReportAssembler {
    /// 构造函数
    ///
    /// # 参数
    /// - `config`: 合同参数,构造时校验
    ///
    /// # 错误
    /// - 配置不可能成立 → InvalidConfiguration
    pub fn new(config: AnsConfig) -> AnsResult<Self> {
        config.validate()?;

        Ok(Self {
            loader: PeriodMetricsLoader::new(config.load_policy),
            calculator: AvailabilityCalculator::new(),
            classifier: ClassificationEngine::new(config.threshold_pct, config.warning_margin_pct),
            penalty: PenaltyCalculator::new(config.tier_schedule.clone(), config.currency_scale),
            aggregator: HistoricalAggregator::new(config.threshold_pct, config.warning_margin_pct),
            narrative: NarrativeBuilder::new(&config.locale, &config.contract_number),
            config,
        })
    }

    pub fn config(&self) -> &AnsConfig {
        &self.config
    }

    /// 组装报告载荷
    ///
    /// # 参数
    /// - `inputs`: 已抽取的原始数据
    ///
    /// # 返回
    /// - Ok(ReportPayload): 每次调用新建,相同输入结果一致
    /// - Err: DataNotFound (Strict) / 数据质量错误 / 配置错误
    pub fn assemble(&self, inputs: &ReportInputs) -> AnsResult<ReportPayload> {
        let period = inputs.period;
        let system_name = self.config.system_name.as_str();

        // ===== 1. 系统级指标 =====
        let period_metrics =
            self.loader
                .load(period, system_name, inputs.raw_metrics.as_ref())?;
        let data_available = period_metrics.has_data;

        let camera_count = inputs
            .raw_metrics
            .as_ref()
            .and_then(|raw| raw.camera_count)
            .unwrap_or_else(|| inputs.raw_localities.iter().map(|l| l.camera_count).sum());

        let system_availability = self.calculator.evaluate_unit(
            system_name,
            camera_count,
            period_metrics.clone(),
            &self.classifier,
        );

        // ===== 2. localidad 指标 (独立分类) =====
        let locality_availabilities = inputs
            .raw_localities
            .iter()
            .map(|raw| {
                let metrics = self.loader.load_locality(period, raw)?;
                Ok(self.calculator.evaluate_unit(
                    &raw.locality,
                    raw.camera_count,
                    metrics,
                    &self.classifier,
                ))
            })
            .collect::<AnsResult<Vec<_>>>()?;

        // ===== 3. 罚金 =====
        let penalty_result = self.penalty.compute_penalty(
            system_availability.availability_pct,
            self.config.threshold_pct,
            self.config.monthly_contract_value,
        )?;

        // ===== 4. 历史汇总 =====
        let (historical_summary, historical_entries) = match &inputs.history {
            Some(entries) => (
                self.aggregator.aggregate(entries),
                self.aggregator.rows(entries),
            ),
            None => (HistoricalSummary::empty(), Vec::<HistoricalRow>::new()),
        };

        // ===== 5. 文字与展示 =====
        let narrative = self.narrative.build(&NarrativeContext {
            period,
            threshold_pct: self.config.threshold_pct,
            system: &system_availability,
            penalty: &penalty_result,
            inputs: &inputs.narrative_inputs,
            currency_scale: self.config.currency_scale,
        });

        let display = self.display_figures(
            &system_availability,
            &locality_availabilities,
            &penalty_result,
            &historical_summary,
        );

        info!(
            period = %period,
            data_available,
            availability_pct = system_availability.availability_pct,
            status = %system_availability.status,
            penalty_applies = penalty_result.applies,
            penalty_value = %penalty_result.penalty_value,
            localities = locality_availabilities.len(),
            history_periods = historical_summary.total_periods,
            "ANS 报告组装完成"
        );

        Ok(ReportPayload {
            period: PeriodInfo {
                year: period.year,
                month: period.month,
                label: self.narrative.period_label(period),
            },
            contract_number: self.config.contract_number.clone(),
            threshold_pct: self.config.threshold_pct,
            warning_margin_pct: self.config.warning_margin_pct,
            monthly_contract_value: self.config.monthly_contract_value,
            data_available,
            period_metrics,
            system_availability,
            locality_availabilities,
            penalty_result,
            historical_summary,
            historical_entries,
            narrative,
            display,
        })
    }

    /// 展示用数值 (唯一取整位置)
    fn display_figures(
        &self,
        system: &UnitAvailability,
        localities: &[UnitAvailability],
        penalty: &PenaltyResult,
        summary: &HistoricalSummary,
    ) -> DisplayFigures {
        let locale = self.narrative.locale();
        let not_available = t(locale, "common.not_available");
        let metrics = &system.metrics;

        // 无测量时可用率与罚金均不可确定,不输出数字
        let (availability, deficit, penalty_rate, penalty_value) = if system.has_data() {
            (
                format_pct(system.availability_pct),
                format_pct(penalty.deficit_pct),
                format!("{:.2}%", penalty.penalty_rate_pct),
                format_cop(penalty.penalty_value, self.config.currency_scale),
            )
        } else {
            (
                not_available.clone(),
                not_available.clone(),
                not_available.clone(),
                not_available.clone(),
            )
        };

        let average_availability = if summary.total_periods > 0 {
            format_pct(summary.average_availability_pct)
        } else {
            not_available.clone()
        };

        let compliance_rate = summary
            .compliance_rate_pct
            .map(format_pct_1)
            .unwrap_or_else(|| not_available.clone());

        let localities = localities
            .iter()
            .map(|unit| LocalityDisplayRow {
                locality: unit.unit_name.clone(),
                cameras: unit.camera_count.to_string(),
                operative_hours: format_hours(unit.metrics.operative_hours),
                non_operative_hours: format_hours(unit.metrics.non_operative_hours),
                availability: format_pct(unit.availability_pct),
                fill_color: unit.status.fill_color_hex().to_string(),
            })
            .collect();

        DisplayFigures {
            total_hours: format_hours(metrics.total_hours as f64),
            operative_hours: format_hours(metrics.operative_hours),
            non_operative_hours: format_hours(metrics.non_operative_hours),
            availability,
            threshold: format_threshold(self.config.threshold_pct),
            deficit,
            penalty_rate,
            penalty_value,
            average_availability,
            compliance_rate,
            localities,
        }
    }
}

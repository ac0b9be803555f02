// ==========================================
// ANS 合规报告 - 文字占位生成器
// ==========================================
// 职责: 计算结果 → 渲染层使用的段落文字
// 文案来源: locales/*.yml (rust-i18n)
// 红线: 无测量时不输出 0% 结论,改为"无数据"说明
// ==========================================

use crate::domain::availability::UnitAvailability;
use crate::domain::metrics::NarrativeInputs;
use crate::domain::penalty::PenaltyResult;
use crate::domain::period::ReportPeriod;
use crate::domain::report::ReportNarrative;
use crate::engine::presentation::{format_cop, format_pct, format_threshold, round_pct};
use crate::i18n::{month_name, normalize_locale, t, t_with_args};

// ==========================================
// NarrativeBuilder - 文字占位生成器
// ==========================================
#[derive(Debug, Clone)]
pub struct NarrativeBuilder {
    locale: &'static str,
    contract_number: String,
}

/// 生成段落所需的计算结果
pub struct NarrativeContext<'a> {
    pub period: ReportPeriod,
    pub threshold_pct: f64,
    pub system: &'a UnitAvailability,
    pub penalty: &'a PenaltyResult,
    pub inputs: &'a NarrativeInputs,
    /// 金额小数位
    pub currency_scale: u32,
}

impl NarrativeBuilder {
    /// 构造函数
    ///
    /// # 参数
    /// - `locale`: 语言代码,不支持的回退到 "es"
    /// - `contract_number`: 合同编号
    pub fn new(locale: &str, contract_number: &str) -> Self {
        Self {
            locale: normalize_locale(locale),
            contract_number: contract_number.to_string(),
        }
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    /// 期间标签: "Septiembre de 2025"
    pub fn period_label(&self, period: ReportPeriod) -> String {
        let month = month_name(self.locale, period.month);
        t_with_args(
            self.locale,
            "period.label",
            &[("month", &month), ("year", &period.year.to_string())],
        )
    }

    /// 生成全部段落
    pub fn build(&self, ctx: &NarrativeContext<'_>) -> ReportNarrative {
        let period_label = self.period_label(ctx.period);
        let threshold = format_threshold(ctx.threshold_pct);
        let availability = format_pct(ctx.system.availability_pct);
        let has_data = ctx.system.has_data();

        let intro = t_with_args(
            self.locale,
            "ans.intro",
            &[
                ("contract", &self.contract_number),
                ("threshold", &threshold),
                ("period", &period_label),
            ],
        );

        let result_line = if !has_data {
            t_with_args(self.locale, "ans.result.no_data", &[("period", &period_label)])
        } else if ctx.system.status.is_compliant() {
            t_with_args(
                self.locale,
                "ans.result.compliant",
                &[("availability", &availability), ("threshold", &threshold)],
            )
        } else {
            t_with_args(
                self.locale,
                "ans.result.non_compliant",
                &[("availability", &availability), ("threshold", &threshold)],
            )
        };

        ReportNarrative {
            section_title: t(self.locale, "ans.section_title"),
            intro,
            formula: t(self.locale, "ans.formula"),
            result_line,
            compliance_analysis: self.compliance_analysis(ctx, &period_label, &threshold),
            penalty_statement: self.penalty_statement(ctx),
            history_intro: t(self.locale, "ans.history.intro"),
        }
    }

    /// 合规分析段落
    fn compliance_analysis(
        &self,
        ctx: &NarrativeContext<'_>,
        period_label: &str,
        threshold: &str,
    ) -> String {
        if !ctx.system.has_data() {
            return t_with_args(self.locale, "ans.analysis.no_data", &[("period", period_label)]);
        }

        let availability = format_pct(ctx.system.availability_pct);

        if ctx.system.status.is_compliant() {
            let surplus = format!(
                "{:.2}",
                round_pct(ctx.system.availability_pct - ctx.threshold_pct)
            );
            return t_with_args(
                self.locale,
                "ans.analysis.compliant",
                &[
                    ("period", period_label),
                    ("availability", &availability),
                    ("threshold", threshold),
                    ("contract", &self.contract_number),
                    ("surplus", &surplus),
                ],
            );
        }

        let deficit = format!(
            "{:.2}",
            round_pct(ctx.threshold_pct - ctx.system.availability_pct)
        );
        let causes = self.bullets(&ctx.inputs.causes, "ans.analysis.causes_pending");
        let actions = self.bullets(
            &ctx.inputs.corrective_actions,
            "ans.analysis.actions_pending",
        );

        t_with_args(
            self.locale,
            "ans.analysis.non_compliant",
            &[
                ("period", period_label),
                ("availability", &availability),
                ("threshold", threshold),
                ("contract", &self.contract_number),
                ("deficit", &deficit),
                ("causes", &causes),
                ("actions", &actions),
            ],
        )
    }

    /// 罚金说明
    fn penalty_statement(&self, ctx: &NarrativeContext<'_>) -> String {
        if !ctx.system.has_data() {
            return t(self.locale, "ans.penalty.no_data");
        }
        if !ctx.penalty.applies {
            return t(self.locale, "ans.penalty.not_applicable");
        }

        t_with_args(
            self.locale,
            "ans.penalty.applies",
            &[
                ("deficit", &format_pct(ctx.penalty.deficit_pct)),
                ("rate", &format!("{:.2}%", ctx.penalty.penalty_rate_pct)),
                ("value", &format_cop(ctx.penalty.penalty_value, ctx.currency_scale)),
            ],
        )
    }

    /// 项目符号列表,空列表使用占位文案
    fn bullets(&self, items: &[String], pending_key: &str) -> String {
        let items: Vec<&str> = items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        if items.is_empty() {
            return format!("• {}", t(self.locale, pending_key));
        }

        items
            .iter()
            .map(|item| format!("• {}", item))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

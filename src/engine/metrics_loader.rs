// ==========================================
// ANS 合规报告 - 期间指标加载器
// ==========================================
// 职责: 外部抽取结果 → 规范化 PeriodMetrics
// 输入: (year, month) + 已抽取的原始小时数
// 输出: PeriodMetrics (含 has_data 标记)
// 红线: 纯转换,不做 I/O,不修正越界数据
// ==========================================

use crate::domain::metrics::{PeriodMetrics, RawLocalityMetrics, RawPeriodMetrics};
use crate::domain::period::ReportPeriod;
use crate::domain::types::LoadPolicy;
use crate::engine::error::{AnsError, AnsResult};

/// 浮点累加误差容忍 (小时)
const HOURS_EPSILON: f64 = 1e-6;

// ==========================================
// PeriodMetricsLoader - 期间指标加载器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodMetricsLoader {
    policy: LoadPolicy,
}

impl PeriodMetricsLoader {
    /// 构造函数
    ///
    /// # 参数
    /// - `policy`: 无数据时的处理策略
    pub fn new(policy: LoadPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    /// 加载系统级期间指标
    ///
    /// # 参数
    /// - `period`: 报告期间
    /// - `unit_name`: 单元名称 (用于错误信息)
    /// - `raw`: 外部抽取结果,None 表示数据源无记录
    ///
    /// # 返回
    /// - 有数据: 校验后的 PeriodMetrics (has_data = true)
    /// - 无数据 + Permissive: 零值 PeriodMetrics (has_data = false)
    /// - 无数据 + Strict: AnsError::DataNotFound
    pub fn load(
        &self,
        period: ReportPeriod,
        unit_name: &str,
        raw: Option<&RawPeriodMetrics>,
    ) -> AnsResult<PeriodMetrics> {
        let raw = match raw {
            Some(raw) => raw,
            None => return self.fallback(period, unit_name),
        };

        let total_hours = match raw.total_hours {
            Some(hours) => hours,
            None => derive_total_hours(period, raw.camera_count),
        };

        build_metrics(
            unit_name,
            total_hours,
            raw.operative_hours,
            raw.non_operative_hours,
        )
    }

    /// 加载 localidad 期间指标
    ///
    /// 小时数按摄像头累加,总小时缺省为 日历小时 × 摄像头数
    pub fn load_locality(
        &self,
        period: ReportPeriod,
        raw: &RawLocalityMetrics,
    ) -> AnsResult<PeriodMetrics> {
        let total_hours = match raw.total_hours {
            Some(hours) => hours,
            None => derive_total_hours(period, Some(raw.camera_count)),
        };

        build_metrics(
            &raw.locality,
            total_hours,
            raw.operative_hours,
            raw.non_operative_hours,
        )
    }

    /// 无数据回退
    fn fallback(&self, period: ReportPeriod, unit_name: &str) -> AnsResult<PeriodMetrics> {
        match self.policy {
            LoadPolicy::Strict => Err(AnsError::DataNotFound {
                year: period.year,
                month: period.month,
            }),
            LoadPolicy::Permissive => {
                tracing::warn!(
                    period = %period,
                    unit = unit_name,
                    "期间无运行数据,回退为零值 (no data)"
                );
                Ok(PeriodMetrics {
                    total_hours: period.calendar_hours(),
                    operative_hours: 0.0,
                    non_operative_hours: 0.0,
                    has_data: false,
                })
            }
        }
    }
}

/// 推导总小时数: 日历小时 × max(摄像头数, 1)
fn derive_total_hours(period: ReportPeriod, camera_count: Option<u32>) -> u64 {
    let cameras = u64::from(camera_count.unwrap_or(1).max(1));
    period.calendar_hours().saturating_mul(cameras)
}

/// 校验并构造 PeriodMetrics
fn build_metrics(
    unit_name: &str,
    total_hours: u64,
    operative_hours: f64,
    non_operative_hours: f64,
) -> AnsResult<PeriodMetrics> {
    check_measurement(unit_name, "operative_hours", operative_hours)?;
    check_measurement(unit_name, "non_operative_hours", non_operative_hours)?;

    if operative_hours + non_operative_hours > total_hours as f64 + HOURS_EPSILON {
        return Err(AnsError::HoursExceedPeriod {
            unit: unit_name.to_string(),
            operative_hours,
            non_operative_hours,
            total_hours,
        });
    }

    Ok(PeriodMetrics {
        total_hours,
        operative_hours,
        non_operative_hours,
        has_data: true,
    })
}

fn check_measurement(unit_name: &str, field: &str, value: f64) -> AnsResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AnsError::InvalidMeasurement {
            unit: unit_name.to_string(),
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

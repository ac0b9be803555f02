// ==========================================
// ANS 合规报告 - 展示格式化
// ==========================================
// 取整只发生在这里,计算链路上的数值保持原值
// 数字格式: 哥伦比亚习惯 (千分位用点)
// ==========================================

use rust_decimal::{Decimal, RoundingStrategy};

/// 西班牙语月份名
const SPANISH_MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// 月份名 (1-12),越界返回空串
pub fn spanish_month_name(month: u32) -> &'static str {
    match month {
        1..=12 => SPANISH_MONTHS[(month - 1) as usize],
        _ => "",
    }
}

/// 百分比取两位小数 (half away from zero)
pub fn round_pct(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    match Decimal::try_from(value) {
        Ok(d) => d
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .try_into()
            .unwrap_or(value),
        Err(_) => (value * 100.0).round() / 100.0,
    }
}

/// "99.03%"
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", round_pct(value))
}

/// 阈值原样展示: "98.9%"
pub fn format_threshold(value: f64) -> String {
    format!("{}%", value)
}

/// 一位小数百分比: "66.7%"
pub fn format_pct_1(value: f64) -> String {
    format!("{:.1}%", value)
}

/// 整数小时,千分位点分隔: "137.980"
pub fn format_hours(value: f64) -> String {
    let rounded = Decimal::try_from(value)
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO);
    group_thousands(&rounded.trunc().abs().to_string(), rounded < Decimal::ZERO)
}

/// 金额 (比索),按合同币种小数位展示: "$10.000.000" / "$24.691,36"
///
/// # 参数
/// - `value`: 金额
/// - `scale`: 小数位数 (0 为整数比索)
pub fn format_cop(value: Decimal, scale: u32) -> String {
    let rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    let mut magnitude = rounded.abs();
    magnitude.rescale(scale);

    let text = magnitude.to_string();
    let (int_digits, frac_digits) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (text.as_str(), ""),
    };

    let mut body = group_thousands(int_digits, false);
    if !frac_digits.is_empty() {
        body.push(',');
        body.push_str(frac_digits);
    }
    if negative {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// 千分位点分隔
fn group_thousands(digits: &str, negative: bool) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

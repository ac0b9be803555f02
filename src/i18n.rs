// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持西班牙语（默认，报告正文）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 引擎内一律显式传入 locale,不改全局语言
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "es";

/// 已提供翻译的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["es", "en"];

/// 规范化语言代码,不支持的回退到默认语言
pub fn normalize_locale(locale: &str) -> &'static str {
    let lower = locale.trim().to_lowercase();
    let primary = lower.split(['-', '_']).next().unwrap_or("");
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| *l == primary)
        .unwrap_or(DEFAULT_LOCALE)
}

/// 翻译消息（指定语言，无参数）
///
/// # 示例
/// ```no_run
/// use ans_report::i18n::t;
/// let msg = t("es", "ans.section_title");
/// ```
pub fn t(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（指定语言，带参数）
///
/// # 示例
/// ```no_run
/// use ans_report::i18n::t_with_args;
/// let msg = t_with_args("es", "period.label", &[("month", "Septiembre"), ("year", "2025")]);
/// ```
pub fn t_with_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t(locale, key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 月份名称
pub fn month_name(locale: &str, month: u32) -> String {
    t(locale, &format!("months.m{}", month))
}

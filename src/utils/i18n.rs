/// Pick the UI language: saved setting first, then the system locale, then English.
///
/// An empty saved language means "follow the system".
pub fn set_language(saved: Option<&str>) {
    let lang = resolve_language(saved, std::env::var("LANG").ok().as_deref());

    rust_i18n::set_locale(&lang);

    tracing::info!("Language set to: {}", lang);
}

fn resolve_language(saved: Option<&str>, system: Option<&str>) -> String {
    saved
        .and_then(normalize_language)
        .or_else(|| system.and_then(normalize_language))
        .unwrap_or_else(|| "en".to_string())
}

/// Switch the UI language at runtime, returning the locale actually applied
pub fn change_language(lang: &str) -> String {
    let lang = normalize_language(lang).unwrap_or_else(|| "en".to_string());
    rust_i18n::set_locale(&lang);
    tracing::info!("Language changed to: {}", lang);
    lang
}

/// Locale currently applied to string lookups
pub fn current_language() -> String {
    rust_i18n::locale().to_string()
}

/// Map a locale string (e.g. "zh_CN.UTF-8") onto one of the shipped string tables
fn normalize_language(lang: &str) -> Option<String> {
    let lang = lang.trim();
    if lang.is_empty() || lang == "C" || lang == "POSIX" {
        return None;
    }
    if lang.starts_with("zh") {
        Some("zh-CN".to_string())
    } else {
        Some("en".to_string())
    }
}

/// Get available languages
pub fn available_languages() -> Vec<(&'static str, &'static str)> {
    vec![("en", "English"), ("zh-CN", "简体中文")]
}

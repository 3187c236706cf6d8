//! Degree-symbol suffix for the active text encoding.

const UTF8_DEGREES: &str = "°C";
const ASCII_DEGREES: &str = "'C";

/// The codeset-bearing locale, from the first non-empty of `LC_ALL`,
/// `LC_CTYPE` and `LANG`.
fn ctype_locale() -> Option<String> {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}

/// Suffix for temperatures under `locale`: the degree sign when the locale
/// uses UTF-8, an apostrophe otherwise.
pub fn suffix_for(locale: Option<&str>) -> &'static str {
    let Some(locale) = locale else {
        return ASCII_DEGREES;
    };
    let codeset = locale
        .split_once('.')
        .map(|(_, rest)| rest.split('@').next().unwrap_or(rest))
        .unwrap_or("");
    let normalized = codeset.to_ascii_lowercase().replace(['-', '_'], "");
    if normalized == "utf8" {
        UTF8_DEGREES
    } else {
        ASCII_DEGREES
    }
}

pub fn suffix() -> &'static str {
    suffix_for(ctype_locale().as_deref())
}

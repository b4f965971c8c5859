//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Formats a quantity as a count of cups.
///
/// Usage in templates: `{{ item.quantity|cups }}` renders `1 cup` or `3 cups`.
#[askama::filter_fn]
pub fn cups(quantity: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let quantity = quantity.to_string();
    let noun = if quantity == "1" { "cup" } else { "cups" };
    Ok(format!("{quantity} {noun}"))
}

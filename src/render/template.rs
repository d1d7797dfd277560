// src/render/template.rs

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::breakdown::Shares;
use crate::cfr::TitleNumber;

pub const TITLE_BREAKDOWN_TOKEN: &str = "$CFR-BREAKDOWN-JSON$";
pub const CORRECTIONS_BREAKDOWN_TOKEN: &str = "$CORRECTIONS-BREAKDOWN-JSON$";
pub const WORKFORCE_BREAKDOWN_TOKEN: &str = "$WORKFORCE-BREAKDOWN-JSON$";

static LEFTOVER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$[A-Z][A-Z0-9-]*\$").expect("token pattern should compile"));

pub fn title_token(identifier: TitleNumber) -> String {
    format!("$CFR-BREAKDOWN-TITLE{}$", identifier)
}

/// JSON with a four-space indent.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .context("serializing breakdown to JSON")?;
    Ok(String::from_utf8(buf)?)
}

/// `<script>var NAME = JSON;</script>`
pub fn script_tag<T: Serialize>(var: &str, value: &T) -> Result<String> {
    Ok(format!("<script>var {} = {};</script>", var, to_json_pretty(value)?))
}

/// `share` as a percentage, cut (not rounded) to three decimals.
pub fn truncated_percent(share: f64) -> f64 {
    (share * 100.0 * 1000.0).trunc() / 1000.0
}

/// Bold title label followed by one line per agency with its share.
pub fn title_fragment(label: &str, agencies: &Shares<String>) -> String {
    let mut lines = String::new();
    for (agency, share) in agencies.iter() {
        lines.push_str(&format!(
            "{} <small class=\"text-muted\">{:.3}% makeup</small><br>",
            agency,
            truncated_percent(*share)
        ));
    }
    format!("<b>{}</b><div class=\"container\">{}</div>", label, lines)
}

/// Literal replacement of each `(token, value)` pair, in order. Anything
/// that isn't one of the tokens stays as it was.
pub fn substitute(content: &str, replacements: &[(String, String)]) -> String {
    let mut out = content.to_string();
    for (token, value) in replacements {
        if out.contains(token.as_str()) {
            out = out.replace(token.as_str(), value);
        }
    }
    out
}

/// `$WORD$` markers still present after substitution.
pub fn leftover_tokens(content: &str) -> Vec<&str> {
    LEFTOVER_TOKEN.find_iter(content).map(|m| m.as_str()).collect()
}

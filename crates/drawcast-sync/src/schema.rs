//! Upstream history-page schema.
//!
//! The upstream body looks like
//! `{ "data": { "list": [ { "number": "5", "issueNumber": "2025...", "drawTime": "..." } ] } }`
//! with the newest draw first. `number` arrives as either a string or an
//! integer. Anything that does not fit is rejected here so later stages only
//! ever see well-formed [`DrawResult`]s.

use drawcast_core::DrawResult;
use serde::Deserialize;

use crate::FetchError;

#[derive(Deserialize)]
struct HistoryPage {
    data: Option<HistoryData>,
}

#[derive(Deserialize)]
struct HistoryData {
    list: Option<Vec<RawDraw>>,
}

#[derive(Deserialize)]
struct RawDraw {
    number: RawNumber,
    #[serde(rename = "issueNumber")]
    issue_number: String,
    #[serde(rename = "drawTime", default)]
    draw_time: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Text(String),
}

/// Parse and validate an upstream response body.
pub fn parse_history(body: &str) -> Result<Vec<DrawResult>, FetchError> {
    let page: HistoryPage = serde_json::from_str(body)?;
    let list = page
        .data
        .ok_or_else(|| FetchError::Malformed("missing `data`".into()))?
        .list
        .ok_or_else(|| FetchError::Malformed("missing `data.list`".into()))?;

    list.into_iter()
        .enumerate()
        .map(|(i, raw)| validate(i, raw))
        .collect()
}

fn validate(index: usize, raw: RawDraw) -> Result<DrawResult, FetchError> {
    let period = raw.issue_number.trim();
    if period.is_empty() || !period.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FetchError::Malformed(format!(
            "entry {index}: issueNumber {:?} is not a decimal number",
            raw.issue_number
        )));
    }

    let number = match raw.number {
        RawNumber::Int(n) => i32::try_from(n).ok(),
        RawNumber::Text(s) => s.trim().parse::<i32>().ok(),
    }
    .ok_or_else(|| FetchError::Malformed(format!("entry {index}: number is not an integer")))?;

    Ok(DrawResult {
        period: period.to_string(),
        number,
        draw_time: raw.draw_time,
    })
}

//! Tolerant handling of the forecast endpoint's response body.
//!
//! The upstream generator is an LLM; its JSON sometimes arrives wrapped in
//! markdown code fences, and an error can be smuggled through any status
//! code as `{"error": "..."}`. Everything here is pure text-in, value-out
//! so the edge cases test without a terminal or a network.

use serde_json::Value;

use crate::state::Forecast;

/// Failure taxonomy for one fetch. Application errors display verbatim;
/// the other variants prefix enough context to tell transport from parse.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ForecastError {
    #[error("forecast request failed: {0}")]
    RequestFailed(String),
    #[error("forecast payload was not parsable JSON: {0}")]
    MalformedResponse(String),
    #[error("{0}")]
    ApplicationError(String),
}

/// Strip a leading/trailing markdown code fence from `raw`.
///
/// Tolerates a fence language tag (```` ```json ````) and a missing closing
/// fence. Idempotent: already-clean text comes back unchanged.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = match rest.find('\n') {
            Some(pos) => &rest[pos + 1..],
            // Opening fence with nothing after it on the same line.
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }
    text = text.trim_end();
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text.trim()
}

/// Parse a success-status body into a [`Forecast`].
///
/// A well-formed payload carrying an `error` field is an application error,
/// never a forecast.
pub fn parse_forecast(cleaned: &str) -> Result<Forecast, ForecastError> {
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|err| ForecastError::MalformedResponse(shorten(&err.to_string(), 120)))?;

    if let Some(message) = embedded_error(&value) {
        return Err(ForecastError::ApplicationError(message));
    }

    serde_json::from_value(value)
        .map_err(|err| ForecastError::MalformedResponse(shorten(&err.to_string(), 120)))
}

/// Classify a non-success body: prefer the server's own `error` message,
/// fall back to a generic message embedding the status code.
pub fn failure_for_status(status: u16, cleaned: &str) -> ForecastError {
    let message = serde_json::from_str::<Value>(cleaned)
        .ok()
        .as_ref()
        .and_then(embedded_error)
        .unwrap_or_else(|| format!("forecast service returned status {status}"));
    ForecastError::RequestFailed(message)
}

fn embedded_error(value: &Value) -> Option<String> {
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn shorten(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut out = text.chars().take(max).collect::<String>();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN: &str = r#"{"weather":{"condition":"Sunny","temp":"85F","wind":"5mph"},"tides":{"high":"2:00PM","low":"8:00AM"},"waves":"1-2ft","forecastText":"**Summary**\nGood day."}"#;

    #[test]
    fn stripping_clean_json_is_identity() {
        assert_eq!(strip_code_fences(CLEAN), CLEAN);
    }

    #[test]
    fn stripping_is_idempotent() {
        let fenced = format!("```json\n{CLEAN}\n```");
        let once = strip_code_fences(&fenced).to_string();
        assert_eq!(strip_code_fences(&once), once);
    }

    #[test]
    fn fenced_and_plain_parse_equal() {
        let fenced = format!("```json\n{CLEAN}\n```");
        let bare_fence = format!("```\n{CLEAN}\n```");
        let plain = parse_forecast(CLEAN).expect("plain parses");
        assert_eq!(
            parse_forecast(strip_code_fences(&fenced)).expect("fenced parses"),
            plain
        );
        assert_eq!(
            parse_forecast(strip_code_fences(&bare_fence)).expect("bare fence parses"),
            plain
        );
    }

    #[test]
    fn missing_closing_fence_still_strips() {
        let open_only = format!("```json\n{CLEAN}");
        assert_eq!(strip_code_fences(&open_only), CLEAN);
    }

    #[test]
    fn parsed_fields_arrive_verbatim() {
        let forecast = parse_forecast(CLEAN).expect("parses");
        assert_eq!(forecast.weather.condition, "Sunny");
        assert_eq!(forecast.weather.temp, "85F");
        assert_eq!(forecast.tides.high, "2:00PM");
        assert_eq!(forecast.waves, "1-2ft");
        assert_eq!(forecast.forecast_text, "**Summary**\nGood day.");
    }

    #[test]
    fn embedded_error_on_success_status_is_application_error() {
        let err = parse_forecast(r#"{"error":"no coastal data for that spot"}"#)
            .expect_err("error envelope");
        assert_eq!(
            err,
            ForecastError::ApplicationError("no coastal data for that spot".into())
        );
        // Verbatim display, per the overlay contract.
        assert_eq!(err.to_string(), "no coastal data for that spot");
    }

    #[test]
    fn garbage_is_malformed_not_transport() {
        let err = parse_forecast("The tides are angry today").expect_err("not JSON");
        assert!(matches!(err, ForecastError::MalformedResponse(_)));
        assert!(err.to_string().contains("not parsable"));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let err = parse_forecast(r#"{"weather":"Sunny"}"#).expect_err("shape mismatch");
        assert!(matches!(err, ForecastError::MalformedResponse(_)));
    }

    #[test]
    fn status_failure_prefers_server_message() {
        let err = failure_for_status(500, r#"{"error":"upstream model unavailable"}"#);
        assert_eq!(
            err,
            ForecastError::RequestFailed("upstream model unavailable".into())
        );
    }

    #[test]
    fn status_failure_falls_back_to_code() {
        let err = failure_for_status(503, "<html>Service Unavailable</html>");
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn fence_with_trailing_text_on_open_line() {
        let fenced = "```json".to_string();
        // Degenerate: nothing but the fence line. Must not panic.
        assert_eq!(strip_code_fences(&fenced), "");
    }
}

//! Forecast endpoint client

use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::payload;
pub use crate::payload::ForecastError;
use crate::state::{Forecast, FormState};

/// Where forecasts come from unless `--endpoint`/`FISHCAST_ENDPOINT` says
/// otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://fishcast-api.fly.dev/api/forecast";

/// One submission's captured input, serialized as the JSON request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub location: String,
    pub fishing_date: String,
    pub comments: String,
}

impl ForecastRequest {
    /// Capture the live field values. Built fresh per submission and never
    /// mutated afterwards.
    pub fn capture(form: &FormState) -> Self {
        Self {
            location: form.location.clone(),
            fishing_date: form.fishing_date.clone(),
            comments: form.comments.clone(),
        }
    }
}

/// POST the request and turn whatever comes back into a [`Forecast`] or a
/// classified [`ForecastError`].
///
/// The body is always read as raw text first; the transport's content-type
/// is not trusted, and fences are stripped before any parse. No retries,
/// no timeout beyond the transport's, no cancellation.
pub async fn fetch_forecast(
    endpoint: &str,
    request: &ForecastRequest,
) -> Result<Forecast, ForecastError> {
    let response = http_client()
        .post(endpoint)
        .json(request)
        .send()
        .await
        .map_err(|err| ForecastError::RequestFailed(err.to_string()))?;

    let status = response.status();
    let raw = response
        .text()
        .await
        .map_err(|err| ForecastError::RequestFailed(err.to_string()))?;
    let cleaned = payload::strip_code_fences(&raw);

    if !status.is_success() {
        return Err(payload::failure_for_status(status.as_u16(), cleaned));
    }
    payload::parse_forecast(cleaned)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

//! Effects - side effects declared by the reducer

use crate::api::ForecastRequest;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch a forecast for the captured form input
    FetchForecast { request: ForecastRequest },
}

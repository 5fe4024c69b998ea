use std::collections::HashMap;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    application::ports::DashboardApi,
    config::{DashboardConfig, Endpoint},
    domain::{
        analytics::{CorrelationMap, HistoricalSeries, PriceAnalysis},
        errors::AppError,
        logging::{LogComponent, LogLevel, get_logger},
        prediction::{PredictionRequest, PredictionResult, interpret_prediction_response},
    },
};

/// gloo-based JSON client for WASM
#[derive(Clone)]
pub struct GlooHttpClient {
    default_headers: HashMap<String, String>,
}

impl Default for GlooHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GlooHttpClient {
    pub fn new() -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        Self { default_headers }
    }

    fn with_headers(&self, mut request: RequestBuilder) -> RequestBuilder {
        for (key, value) in &self.default_headers {
            request = request.header(key, value);
        }
        request
    }

    /// GET with a 2xx check and JSON decoding into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("🌐 GET JSON: {}", url));

        let response = self
            .with_headers(Request::get(url))
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Request failed: {}", e)))?;

        if !response.ok() {
            let error = AppError::Http {
                status: response.status(),
                status_text: response.status_text(),
            };
            get_logger().error(LogComponent::Infrastructure("HTTP"), &format!("{} ({})", error, url));
            return Err(error);
        }

        let data = response
            .json::<T>()
            .await
            .map_err(|e| AppError::Parse(format!("Failed to parse JSON: {}", e)))?;

        get_logger().debug(
            LogComponent::Infrastructure("HTTP"),
            "✅ GET JSON response parsed successfully",
        );
        Ok(data)
    }

    /// POST `body` as JSON and return the decoded response body whatever the
    /// status; error payloads travel in the body.
    pub async fn post_json<T: Serialize>(&self, url: &str, body: &T) -> Result<Value, AppError> {
        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("🌐 POST JSON: {}", url));

        let response = self
            .with_headers(Request::post(url))
            .json(body)
            .map_err(|e| AppError::Parse(format!("Failed to serialize body: {}", e)))?
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Request failed: {}", e)))?;

        log_status(url, &response);

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Parse(format!("Failed to parse JSON response: {}", e)))
    }
}

fn log_status(url: &str, response: &Response) {
    let level = if response.ok() { LogLevel::Debug } else { LogLevel::Warn };
    get_logger().log_with_metadata(
        level,
        LogComponent::Infrastructure("HTTP"),
        &format!("POST response {}", response.status()),
        url,
    );
}

/// [`DashboardApi`] over the configured backend endpoints.
#[derive(Clone)]
pub struct HttpDashboardApi {
    client: GlooHttpClient,
    config: DashboardConfig,
}

impl HttpDashboardApi {
    pub fn new(config: DashboardConfig) -> Self {
        Self { client: GlooHttpClient::new(), config }
    }

    fn url(&self, endpoint: Endpoint) -> String {
        self.config.endpoint_url(endpoint)
    }
}

impl DashboardApi for HttpDashboardApi {
    async fn historical_data(&self) -> Result<HistoricalSeries, AppError> {
        let series: HistoricalSeries =
            self.client.get_json(&self.url(Endpoint::HistoricalData)).await?;
        get_logger().info(
            LogComponent::Infrastructure("DashboardApi"),
            &format!("📈 Loaded {} historical points", series.prices.len()),
        );
        Ok(series)
    }

    async fn correlation_data(&self) -> Result<CorrelationMap, AppError> {
        self.client.get_json(&self.url(Endpoint::CorrelationData)).await
    }

    async fn price_analysis(&self) -> Result<PriceAnalysis, AppError> {
        self.client.get_json(&self.url(Endpoint::PriceAnalysis)).await
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, AppError> {
        let body = self.client.post_json(&self.url(Endpoint::Predict), request).await?;
        interpret_prediction_response(body)
    }
}

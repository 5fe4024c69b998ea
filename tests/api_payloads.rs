use gold_dashboard_wasm::config::{DashboardConfig, Endpoint};
use gold_dashboard_wasm::domain::analytics::{HistoricalSeries, PriceAnalysis, PriceOverview, Trend};
use gold_dashboard_wasm::domain::errors::AppError;
use gold_dashboard_wasm::domain::prediction::{
    FormField, PredictionForm, interpret_prediction_response,
};
use serde_json::json;

#[test]
fn historical_payload() {
    let series: HistoricalSeries = serde_json::from_value(json!({
        "dates": ["2024-01-01", "2024-01-02"],
        "prices": [2063.7, 2071.25],
        "volume": [151234.0, 162001.0]
    }))
    .expect("historical payload");
    assert_eq!(series.prices, vec![2063.7, 2071.25]);
    assert_eq!(series.price_window(1).0, vec!["2024-01-02".to_string()]);
}

#[test]
fn price_analysis_to_cards() {
    let analysis: PriceAnalysis = serde_json::from_value(json!({
        "current_price": 2034.5,
        "price_change_24h": -12.25,
        "volatility": 1.234,
        "avg_price_30d": 2021.0
    }))
    .expect("analysis payload");
    let overview = PriceOverview::from(&analysis);

    assert_eq!(overview.current_price, "$2,034.50");
    assert_eq!(overview.price_change_24h, "-$12.25");
    assert_eq!(overview.volatility, "1.23");
    assert_eq!(overview.avg_price_30d, "$2,021.00");
    assert_eq!(overview.trend, Trend::Down);
    assert_eq!(overview.trend.card_class(), "info-card bg-danger");
    assert_eq!(overview.range_30d, None);
}

#[test]
fn request_body_omits_blank_fields() {
    let mut form = PredictionForm::with_sample_data();
    form.set(FormField::Open, "1800");
    form.set(FormField::High, " 1850 ");
    form.set(FormField::Low, "");
    form.set(FormField::Cad, "n/a");

    let body = serde_json::to_value(form.to_request()).expect("serializable");
    assert_eq!(
        body,
        json!({ "open": 1800.0, "high": 1850.0, "eur": 0.85, "gbp": 0.73, "jpy": 148.5 })
    );
}

#[test]
fn error_field_wins_over_result_fields() {
    let body = json!({
        "error": "Model not trained",
        "prediction": 1800.0,
        "confidence_lower": 1750.0,
        "confidence_upper": 1850.0,
        "model": "Random Forest",
        "timestamp": "2024-01-15T14:30:00"
    });
    assert_eq!(
        interpret_prediction_response(body),
        Err(AppError::Api("Model not trained".into()))
    );
}

#[test]
fn incomplete_prediction_is_a_parse_error() {
    let result = interpret_prediction_response(json!({ "prediction": 1800.0 }));
    assert!(matches!(result, Err(AppError::Parse(_))));
}

#[test]
fn endpoints_resolve_against_base_url() {
    let config = DashboardConfig::default().with_base_url("https://gold.example.com/");
    assert_eq!(
        config.endpoint_url(Endpoint::Predict),
        "https://gold.example.com/api/predict"
    );
    assert_eq!(DashboardConfig::default().endpoint_url(Endpoint::HistoricalData), "/api/historical-data");
}

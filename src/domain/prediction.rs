//! Prediction form model, request/response payloads and the form phase machine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use super::errors::{AppError, ValidationError};
use super::formatting::format_currency;
use crate::time_utils::format_time_of_day;

/// Form inputs. The serialized names double as the input `name`/`id` attributes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum FormField {
    Open,
    High,
    Low,
    Eur,
    Gbp,
    Jpy,
    Cad,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Open => "Open Price (USD)",
            FormField::High => "High Price (USD)",
            FormField::Low => "Low Price (USD)",
            FormField::Eur => "EUR Rate",
            FormField::Gbp => "GBP Rate",
            FormField::Jpy => "JPY Rate",
            FormField::Cad => "CAD Rate",
        }
    }
}

/// Parse a raw input value. Blank, malformed and non-finite text yields `None`.
pub fn parse_field(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Per-field visual validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldValidity {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

impl FieldValidity {
    /// Bootstrap-style class toggled on the input element.
    pub fn css_class(self) -> &'static str {
        match self {
            FieldValidity::Untouched => "",
            FieldValidity::Valid => "is-valid",
            FieldValidity::Invalid => "is-invalid",
        }
    }
}

/// Non-blank input that is unparseable or not strictly positive is invalid;
/// blank input counts as valid.
pub fn validate_field(raw: &str) -> FieldValidity {
    if raw.trim().is_empty() {
        return FieldValidity::Valid;
    }
    match parse_field(raw) {
        Some(value) if value > 0.0 => FieldValidity::Valid,
        _ => FieldValidity::Invalid,
    }
}

/// Raw text of every form input, keyed by field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionForm {
    values: BTreeMap<FormField, String>,
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo exchange rates filled in on page load.
    pub fn with_sample_data() -> Self {
        let mut form = Self::new();
        form.fill_sample_data();
        form
    }

    pub fn fill_sample_data(&mut self) {
        self.set(FormField::Eur, "0.85");
        self.set(FormField::Gbp, "0.73");
        self.set(FormField::Jpy, "148.50");
        self.set(FormField::Cad, "1.37");
    }

    pub fn set(&mut self, field: FormField, raw: impl Into<String>) {
        self.values.insert(field, raw.into());
    }

    pub fn get(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn value(&self, field: FormField) -> Option<f64> {
        parse_field(self.get(field))
    }

    /// Submit guard: `low <= high` and `low <= open <= high`.
    ///
    /// Only comparisons between values that are present and numeric can fail;
    /// blank fields are left for the backend to fill in.
    pub fn check_price_order(&self) -> Result<(), ValidationError> {
        let open = self.value(FormField::Open);
        let high = self.value(FormField::High);
        let low = self.value(FormField::Low);

        if let (Some(low), Some(high)) = (low, high) {
            if low > high {
                return Err(ValidationError::LowAboveHigh);
            }
        }
        if let Some(open) = open {
            let above_high = high.is_some_and(|high| open > high);
            let below_low = low.is_some_and(|low| open < low);
            if above_high || below_low {
                return Err(ValidationError::OpenOutsideRange);
            }
        }
        Ok(())
    }

    /// Serialize numeric fields; blank and malformed inputs are omitted.
    pub fn to_request(&self) -> PredictionRequest {
        let mut request = PredictionRequest::default();
        for field in FormField::iter() {
            let slot = match field {
                FormField::Open => &mut request.open,
                FormField::High => &mut request.high,
                FormField::Low => &mut request.low,
                FormField::Eur => &mut request.eur,
                FormField::Gbp => &mut request.gbp,
                FormField::Jpy => &mut request.jpy,
                FormField::Cad => &mut request.cad,
            };
            *slot = self.value(field);
        }
        request
    }
}

/// `POST /api/predict` body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gbp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jpy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cad: Option<f64>,
}

/// Successful `POST /api/predict` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: f64,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
    pub model: String,
    pub timestamp: String,
}

/// Classify a prediction response body. A truthy `error` field wins over
/// everything else; otherwise the body must be a full `PredictionResult`.
pub fn interpret_prediction_response(body: Value) -> Result<PredictionResult, AppError> {
    if let Some(error) = body.get("error") {
        let message = match error {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };
        if let Some(message) = message {
            return Err(AppError::Api(message));
        }
    }
    Ok(serde_json::from_value(body)?)
}

/// Result text bound to the results panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDisplay {
    pub predicted_price: String,
    pub confidence_lower: String,
    pub confidence_upper: String,
    pub model: String,
    pub prediction_time: String,
}

impl From<&PredictionResult> for PredictionDisplay {
    fn from(result: &PredictionResult) -> Self {
        Self {
            predicted_price: format_currency(result.prediction),
            confidence_lower: format_currency(result.confidence_lower),
            confidence_upper: format_currency(result.confidence_upper),
            model: result.model.clone(),
            prediction_time: format_time_of_day(&result.timestamp),
        }
    }
}

/// Lifecycle of the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

impl FormPhase {
    pub fn can_transition(self, next: FormPhase) -> bool {
        use FormPhase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Validating)
                | (Idle, Submitting)
                | (Validating, Submitting)
                | (Validating, Idle)
                | (Submitting, Success)
                | (Submitting, Failed)
                | (Success, Idle)
                | (Failed, Idle)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_match_input_names() {
        let names: Vec<String> = FormField::iter().map(|f| f.to_string()).collect();
        assert_eq!(names, ["open", "high", "low", "eur", "gbp", "jpy", "cad"]);
        assert_eq!("jpy".parse::<FormField>().unwrap(), FormField::Jpy);
    }

    #[test]
    fn phase_machine_rejects_skipping_submission() {
        assert!(FormPhase::Idle.can_transition(FormPhase::Submitting));
        assert!(!FormPhase::Idle.can_transition(FormPhase::Success));
        assert!(!FormPhase::Success.can_transition(FormPhase::Submitting));
    }
}

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use strum::IntoEnumIterator;

use crate::{
    application::ports::{DashboardApi, Notifier, SurfaceFactory},
    domain::{
        chart::{ChartHandle, ChartName, ChartSpec, presets},
        errors::{AppError, ValidationError},
        logging::{LogComponent, get_logger},
        notifications::AlertLevel,
        prediction::{
            FieldValidity, FormField, FormPhase, PredictionDisplay, PredictionForm,
            PredictionResult, validate_field,
        },
    },
};

pub const PREDICTION_SUCCEEDED: &str = "Prediction completed successfully!";

/// Everything the prediction panel renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionViewModel {
    pub phase: FormPhase,
    pub form: PredictionForm,
    pub field_states: BTreeMap<FormField, FieldValidity>,
    pub loading: bool,
    pub results_visible: bool,
    pub result: Option<PredictionDisplay>,
    /// Bumped on every successful prediction so the view can scroll to it.
    pub results_revision: u64,
}

impl PredictionViewModel {
    pub fn validity(&self, field: FormField) -> FieldValidity {
        self.field_states.get(&field).copied().unwrap_or_default()
    }
}

/// How a submit attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Guard rejected the form; no request was sent.
    Blocked(ValidationError),
    Succeeded(PredictionResult),
    Failed(AppError),
}

type Listener = Box<dyn Fn(&PredictionViewModel)>;

/// Prediction form lifecycle: `Idle → Validating → Submitting → {Success, Failed} → Idle`.
pub struct PredictionFlow<A, N> {
    api: Rc<A>,
    notifier: Rc<N>,
    surfaces: Rc<dyn SurfaceFactory>,
    state: RefCell<PredictionViewModel>,
    chart: RefCell<Option<ChartHandle>>,
    listener: RefCell<Option<Listener>>,
}

impl<A: DashboardApi, N: Notifier> PredictionFlow<A, N> {
    /// Starts `Idle` with the sample exchange rates filled in.
    pub fn new(api: Rc<A>, notifier: Rc<N>, surfaces: Rc<dyn SurfaceFactory>) -> Self {
        let flow = Self {
            api,
            notifier,
            surfaces,
            state: RefCell::new(PredictionViewModel::default()),
            chart: RefCell::new(None),
            listener: RefCell::new(None),
        };
        flow.use_sample_data();
        flow
    }

    /// Called with a snapshot after every state change.
    pub fn subscribe(&self, listener: impl Fn(&PredictionViewModel) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
        self.emit();
    }

    pub fn view(&self) -> PredictionViewModel {
        self.state.borrow().clone()
    }

    pub fn use_sample_data(&self) {
        self.state.borrow_mut().form.fill_sample_data();
        self.emit();
    }

    /// Per-field feedback; never blocks submission.
    pub fn on_input(&self, field: FormField, raw: &str) -> FieldValidity {
        let validity = validate_field(raw);
        {
            let mut state = self.state.borrow_mut();
            state.form.set(field, raw);
            state.field_states.insert(field, validity);
            if state.phase != FormPhase::Submitting {
                Self::transition(&mut state, FormPhase::Validating);
            }
        }
        self.emit();
        validity
    }

    /// Guard, POST, then render the result or report the failure.
    /// The loading indicator is hidden whichever way it ends.
    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let mut state = self.state.borrow_mut();
            if let Err(violation) = state.form.check_price_order() {
                if state.phase != FormPhase::Idle {
                    Self::transition(&mut state, FormPhase::Idle);
                }
                drop(state);
                self.emit();
                get_logger().info(
                    LogComponent::Application("PredictionFlow"),
                    &format!("Submission blocked: {}", violation),
                );
                self.notifier.alert(&violation.to_string());
                return SubmitOutcome::Blocked(violation);
            }
            Self::transition(&mut state, FormPhase::Submitting);
            state.loading = true;
            state.results_visible = false;
            state.form.to_request()
        };
        self.emit();

        get_logger().info(
            LogComponent::Application("PredictionFlow"),
            &format!("🔮 Requesting prediction: {:?}", request),
        );

        let outcome = match self.api.predict(&request).await {
            Ok(result) => {
                self.show_result(&result);
                SubmitOutcome::Succeeded(result)
            }
            Err(e) => {
                get_logger().error(
                    LogComponent::Application("PredictionFlow"),
                    &format!("❌ Prediction error: {}", e),
                );
                {
                    let mut state = self.state.borrow_mut();
                    Self::transition(&mut state, FormPhase::Failed);
                }
                self.notifier.notify(
                    AlertLevel::Danger,
                    &format!("Error making prediction: {}", e.detail()),
                );
                SubmitOutcome::Failed(e)
            }
        };

        {
            let mut state = self.state.borrow_mut();
            state.loading = false;
            Self::transition(&mut state, FormPhase::Idle);
        }
        self.emit();
        outcome
    }

    fn show_result(&self, result: &PredictionResult) {
        {
            let mut state = self.state.borrow_mut();
            state.result = Some(PredictionDisplay::from(result));
            state.results_visible = true;
            state.results_revision += 1;
            Self::transition(&mut state, FormPhase::Success);
        }
        self.emit();

        if let Err(e) = self.rebuild_chart(result) {
            get_logger().error(
                LogComponent::Application("PredictionFlow"),
                &format!("Cannot draw prediction chart: {}", e),
            );
        }
        self.notifier.notify(AlertLevel::Success, PREDICTION_SUCCEEDED);
    }

    /// Destroy the previous range chart before creating the new one.
    fn rebuild_chart(&self, result: &PredictionResult) -> Result<(), AppError> {
        if let Some(previous) = self.chart.borrow_mut().take() {
            previous.destroy();
        }
        let surface = self.surfaces.surface(ChartName::Prediction)?;
        let handle =
            ChartHandle::create(ChartName::Prediction, presets::prediction_range(result), surface)?;
        *self.chart.borrow_mut() = Some(handle);
        Ok(())
    }

    /// Current range chart data, if one has been drawn.
    pub fn chart_values(&self) -> Option<Vec<f64>> {
        self.chart.borrow().as_ref().map(|handle| handle.spec().dataset.values.clone())
    }

    pub fn chart_spec(&self) -> Option<ChartSpec> {
        self.chart.borrow().as_ref().map(|handle| handle.spec().clone())
    }

    pub fn chart_tooltip(&self, index: usize) -> Option<String> {
        self.chart.borrow().as_ref().and_then(|handle| handle.spec().tooltip(index))
    }

    fn transition(state: &mut PredictionViewModel, next: FormPhase) {
        if !state.phase.can_transition(next) {
            get_logger().warn(
                LogComponent::Application("PredictionFlow"),
                &format!("Unexpected phase change {} -> {}", state.phase, next),
            );
        }
        state.phase = next;
    }

    fn emit(&self) {
        let snapshot = self.state.borrow().clone();
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(&snapshot);
        }
    }
}

/// Fields shown in the form, in display order.
pub fn form_fields() -> Vec<FormField> {
    FormField::iter().collect()
}

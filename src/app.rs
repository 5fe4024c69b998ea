use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::{
    application::{
        ChartController, PredictionFlow, PredictionViewModel, SurfaceFactory, form_fields,
        load_price_analysis,
    },
    config::DashboardConfig,
    domain::{
        analytics::PriceOverview,
        chart::{ChartName, ChartSpec},
        logging::{LogComponent, get_logger},
        prediction::{FormField, PredictionDisplay},
    },
    infrastructure::{http::HttpDashboardApi, rendering::layout},
    presentation::{LeptosNotifier, canvas_surface},
};

type Controller = ChartController<HttpDashboardApi, LeptosNotifier>;
type Flow = PredictionFlow<HttpDashboardApi, LeptosNotifier>;

const PLACEHOLDER: &str = "--";
const CHART_WIDTH: u32 = 600;
const CHART_HEIGHT: u32 = 300;

/// Mount the dashboard into `<body>`.
pub fn mount(config: DashboardConfig) {
    mount_to_body(move || view! { <App config=config /> });
}

/// 🥇 Gold price dashboard: overview cards, four charts and the prediction form
#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let notifier = LeptosNotifier::new(config.toast_ttl_ms);
    let api = store_value(Rc::new(HttpDashboardApi::new(config.clone())));
    let config = store_value(config);

    view! {
        <style>
            {r#"
            .gold-dashboard {
                font-family: 'Segoe UI', -apple-system, BlinkMacSystemFont, sans-serif;
                background: #f5f6fa;
                min-height: 100vh;
                padding: 20px;
                color: #333;
            }

            .info-cards {
                display: flex;
                gap: 16px;
                margin-bottom: 20px;
            }

            .info-card {
                flex: 1;
                padding: 16px;
                border-radius: 10px;
                background: white;
                box-shadow: 0 2px 8px rgba(0, 0, 0, 0.08);
            }

            .info-card.bg-success { background: #d4edda; }
            .info-card.bg-danger { background: #f8d7da; }

            .card-value {
                font-size: 22px;
                font-weight: 700;
            }

            .card-label {
                font-size: 12px;
                color: #777;
                margin-top: 4px;
            }

            .charts-grid {
                display: grid;
                grid-template-columns: repeat(2, auto);
                gap: 20px;
                margin-bottom: 20px;
            }

            .chart-wrapper {
                position: relative;
                display: inline-block;
                background: white;
                border-radius: 10px;
            }

            .chart-tooltip {
                position: absolute;
                background: rgba(0, 0, 0, 0.85);
                color: white;
                padding: 6px 10px;
                border-radius: 6px;
                font-size: 12px;
                pointer-events: none;
                white-space: nowrap;
                transform: translate(10px, -100%);
            }

            .period-buttons .btn.active {
                background: #ffd700;
                color: #333;
            }

            .form-control.is-invalid { border-color: #dc3545; }
            .form-control.is-valid { border-color: #28a745; }

            .toast-container {
                position: fixed;
                top: 20px;
                right: 20px;
                z-index: 1000;
                min-width: 280px;
            }
            "#}
        </style>
        <div class="gold-dashboard">
            <ToastContainer notifier=notifier />
            <PriceCards api=api />
            <DashboardCharts config=config api=api notifier=notifier />
            <PredictionPanel api=api notifier=notifier />
        </div>
    }
}

/// Transient notifications, newest on top
#[component]
fn ToastContainer(notifier: LeptosNotifier) -> impl IntoView {
    let toasts = notifier.toasts();

    view! {
        <div class="toast-container">
            <For
                each=move || toasts.with(|queue| queue.toasts().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = toast.css_class();
                    view! {
                        <div class=class role="alert">
                            {toast.message}
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                on:click=move |_| notifier.dismiss(id)
                            ></button>
                        </div>
                    }
                }
            />
        </div>
    }
}

/// 📊 Overview cards fed by the price analysis endpoint
#[component]
fn PriceCards(api: StoredValue<Rc<HttpDashboardApi>>) -> impl IntoView {
    let overview = create_rw_signal::<Option<PriceOverview>>(None);

    spawn_local(async move {
        let api = api.get_value();
        if let Ok(loaded) = load_price_analysis(api.as_ref()).await {
            overview.set(Some(loaded));
        }
    });

    let text = move |pick: fn(&PriceOverview) -> String| {
        overview.with(|o| o.as_ref().map(pick).unwrap_or_else(|| PLACEHOLDER.to_string()))
    };
    let change_class = move || {
        overview.with(|o| o.as_ref().map(|o| o.trend.card_class()).unwrap_or("info-card"))
    };

    view! {
        <div class="info-cards">
            <div class="info-card">
                <div class="card-value" id="currentPriceCard">
                    {move || text(|o| o.current_price.clone())}
                </div>
                <div class="card-label">"Current Price"</div>
            </div>
            <div class=change_class>
                <div class="card-value" id="priceChange24h">
                    {move || text(|o| o.price_change_24h.clone())}
                </div>
                <div class="card-label">"24h Change"</div>
            </div>
            <div class="info-card">
                <div class="card-value" id="volatility">
                    {move || text(|o| o.volatility.clone())}
                </div>
                <div class="card-label">"Volatility"</div>
            </div>
            <div class="info-card">
                <div class="card-value" id="avgPrice30d">
                    {move || text(|o| o.avg_price_30d.clone())}
                </div>
                <div class="card-label">
                    {move || {
                        overview
                            .with(|o| o.as_ref().and_then(|o| o.range_30d.clone()))
                            .map(|range| format!("30d Average ({})", range))
                            .unwrap_or_else(|| "30d Average".to_string())
                    }}
                </div>
            </div>
        </div>
    }
}

/// 🎨 The four dashboard charts plus the period selector
#[component]
fn DashboardCharts(
    config: StoredValue<DashboardConfig>,
    api: StoredValue<Rc<HttpDashboardApi>>,
    notifier: LeptosNotifier,
) -> impl IntoView {
    let controller = store_value::<Option<Controller>>(None);
    let active_period = create_rw_signal(config.with_value(|c| c.price_window));
    let grid_ref = create_node_ref::<html::Div>();

    // Charts are created once the canvases are in the document
    create_effect(move |initialized: Option<bool>| {
        if initialized == Some(true) {
            return true;
        }
        if grid_ref.get().is_none() {
            return false;
        }
        spawn_local(async move {
            let config = config.get_value();
            match ChartController::initialize(&config, api.get_value(), Rc::new(notifier), &canvas_surface)
                .await
            {
                Ok(ready) => controller.set_value(Some(ready)),
                Err(e) => get_logger().error(
                    LogComponent::Presentation("DashboardCharts"),
                    &format!("❌ Chart initialization failed: {}", e),
                ),
            }
        });
        true
    });

    let select_period = move |days: usize| {
        active_period.set(days);
        match controller.get_value() {
            Some(ready) => spawn_local(async move {
                let _ = ready.update_period(days).await;
            }),
            None => get_logger().debug(
                LogComponent::Presentation("DashboardCharts"),
                "Period change ignored: charts not ready",
            ),
        }
    };

    let spec_of = move |name: ChartName| {
        Callback::new(move |_: ()| {
            controller.with_value(|c| c.as_ref().and_then(|ready| ready.chart_spec(name)))
        })
    };

    let period_buttons = config
        .with_value(|c| c.periods.clone())
        .into_iter()
        .map(|days| {
            view! {
                <button
                    type="button"
                    class="btn btn-outline-warning btn-sm"
                    class:active=move || active_period.get() == days
                    data-period=days.to_string()
                    on:click=move |_| select_period(days)
                >
                    {format!("{}D", days)}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="period-buttons">{period_buttons}</div>
        <div class="charts-grid" node_ref=grid_ref>
            <ChartCanvas name=ChartName::Price spec=spec_of(ChartName::Price) />
            <ChartCanvas name=ChartName::Correlation spec=spec_of(ChartName::Correlation) />
            <ChartCanvas name=ChartName::Volume spec=spec_of(ChartName::Volume) />
            <ChartCanvas name=ChartName::Distribution spec=spec_of(ChartName::Distribution) />
        </div>
    }
}

/// Canvas with a hover tooltip for the category under the pointer
#[component]
fn ChartCanvas(
    name: ChartName,
    spec: Callback<(), Option<ChartSpec>>,
    #[prop(default = CHART_WIDTH)] width: u32,
    #[prop(default = CHART_HEIGHT)] height: u32,
) -> impl IntoView {
    let tooltip = create_rw_signal::<Option<(String, f64, f64)>>(None);

    let handle_mouse_move = move |event: web_sys::MouseEvent| {
        let x = event.offset_x() as f64;
        let y = event.offset_y() as f64;
        let text = spec
            .call(())
            .and_then(|spec| layout::tooltip_at(&spec, width as f64, height as f64, x, y));
        tooltip.set(text.map(|text| (text, x, y)));
    };

    view! {
        <div class="chart-wrapper">
            <canvas
                id=name.canvas_id().to_string()
                width=width.to_string()
                height=height.to_string()
                on:mousemove=handle_mouse_move
                on:mouseleave=move |_| tooltip.set(None)
            ></canvas>
            {move || {
                tooltip
                    .get()
                    .map(|(text, x, y)| {
                        view! {
                            <div class="chart-tooltip" style=format!("left: {}px; top: {}px;", x, y)>
                                {text}
                            </div>
                        }
                    })
            }}
        </div>
    }
}

/// 🔮 Prediction form, loading indicator and results panel
#[component]
fn PredictionPanel(api: StoredValue<Rc<HttpDashboardApi>>, notifier: LeptosNotifier) -> impl IntoView {
    let surfaces: Rc<dyn SurfaceFactory> = Rc::new(canvas_surface);
    let flow: Rc<Flow> = Rc::new(PredictionFlow::new(api.get_value(), Rc::new(notifier), surfaces));
    let vm = create_rw_signal(flow.view());
    flow.subscribe(move |snapshot| vm.set(snapshot.clone()));
    let flow = store_value(flow);

    let revision = create_memo(move |_| vm.with(|v| v.results_revision));
    create_effect(move |_| {
        if revision.get() > 0 {
            spawn_local(async {
                // Let the panel become visible before scrolling to it
                TimeoutFuture::new(0).await;
                scroll_into_view("predictionResults");
            });
        }
    });

    let handle_submit = move |event: ev::SubmitEvent| {
        event.prevent_default();
        let flow = flow.get_value();
        spawn_local(async move {
            flow.submit().await;
        });
    };

    let result_text = move |pick: fn(&PredictionDisplay) -> String| {
        vm.with(|v| v.result.as_ref().map(pick).unwrap_or_default())
    };

    let range_spec = Callback::new(move |_: ()| flow.with_value(|f| f.chart_spec()));

    let inputs = form_fields()
        .into_iter()
        .map(|field| field_input(field, vm, flow))
        .collect_view();

    view! {
        <div class="prediction-panel">
            <h3>"Price Prediction"</h3>
            <form id="predictionForm" novalidate=true on:submit=handle_submit>
                {inputs}
                <button
                    type="button"
                    class="btn btn-secondary"
                    on:click=move |_| flow.with_value(|f| f.use_sample_data())
                >
                    "Use Sample Data"
                </button>
                <button
                    type="submit"
                    class="btn btn-warning"
                    prop:disabled=move || vm.with(|v| v.loading)
                >
                    "Predict Price"
                </button>
            </form>

            <div
                id="loadingSpinner"
                class="spinner-border text-warning"
                role="status"
                style:display=move || if vm.with(|v| v.loading) { "block" } else { "none" }
            >
                <span class="visually-hidden">"Loading..."</span>
            </div>

            <div
                id="predictionResults"
                style:display=move || if vm.with(|v| v.results_visible) { "block" } else { "none" }
            >
                <div class="info-cards">
                    <div class="info-card">
                        <div class="card-value" id="predictedPrice">
                            {move || result_text(|r| r.predicted_price.clone())}
                        </div>
                        <div class="card-label">"Predicted Price"</div>
                    </div>
                    <div class="info-card">
                        <div class="card-value" id="confidenceLower">
                            {move || result_text(|r| r.confidence_lower.clone())}
                        </div>
                        <div class="card-label">"Lower Bound"</div>
                    </div>
                    <div class="info-card">
                        <div class="card-value" id="confidenceUpper">
                            {move || result_text(|r| r.confidence_upper.clone())}
                        </div>
                        <div class="card-label">"Upper Bound"</div>
                    </div>
                </div>
                <p>
                    "Model: " <span id="modelAlgorithm">{move || result_text(|r| r.model.clone())}</span>
                    " | Predicted at: "
                    <span id="predictionTime">{move || result_text(|r| r.prediction_time.clone())}</span>
                </p>
                <ChartCanvas name=ChartName::Prediction spec=range_spec />
            </div>
        </div>
    }
}

fn field_input(
    field: FormField,
    vm: RwSignal<PredictionViewModel>,
    flow: StoredValue<Rc<Flow>>,
) -> impl IntoView {
    let id = field.as_ref().to_string();

    view! {
        <div class="form-group">
            <label for=id.clone()>{field.label()}</label>
            <input
                type="number"
                step="any"
                id=id.clone()
                name=id
                class=move || format!("form-control {}", vm.with(|v| v.validity(field).css_class()))
                prop:value=move || vm.with(|v| v.form.get(field).to_string())
                on:input=move |event| {
                    let raw = event_target_value(&event);
                    flow.with_value(|f| f.on_input(field, &raw));
                }
            />
        </div>
    }
}

fn scroll_into_view(element_id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(element_id))
    else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

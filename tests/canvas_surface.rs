use gold_dashboard_wasm::domain::chart::{ChartName, ChartSurface, presets};
use gold_dashboard_wasm::domain::errors::AppError;
use gold_dashboard_wasm::domain::prediction::PredictionResult;
use gold_dashboard_wasm::infrastructure::rendering::CanvasSurface;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas(id: &str) -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    canvas.set_width(400);
    canvas.set_height(300);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn missing_canvas_is_a_rendering_error() {
    assert!(matches!(CanvasSurface::new("noSuchCanvas"), Err(AppError::Rendering(_))));
}

#[wasm_bindgen_test]
fn range_chart_draws_then_clears() {
    let canvas = mount_canvas(ChartName::Prediction.canvas_id());
    let mut surface = CanvasSurface::for_chart(ChartName::Prediction).unwrap();
    let spec = presets::prediction_range(&PredictionResult {
        prediction: 1800.0,
        confidence_lower: 1750.0,
        confidence_upper: 1850.0,
        model: "Random Forest".into(),
        timestamp: "2024-01-15T14:30:00".into(),
    });

    surface.draw(&spec).unwrap();
    let url_after_draw = canvas.to_data_url().unwrap();
    let blank = mount_canvas("blankReference").to_data_url().unwrap();
    assert_ne!(url_after_draw, blank);

    surface.clear();
    assert_eq!(canvas.to_data_url().unwrap(), blank);
}

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{MockApi, RecordingNotifier, SurfaceLog, recording_surfaces, series};
use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;
use gold_dashboard_wasm::application::ChartController;
use gold_dashboard_wasm::config::DashboardConfig;
use gold_dashboard_wasm::domain::analytics::CorrelationMap;
use gold_dashboard_wasm::domain::chart::ChartName;

fn ready_controller(api: Rc<MockApi>) -> ChartController<MockApi, RecordingNotifier> {
    let log = SurfaceLog::default();
    block_on(ChartController::initialize(
        &DashboardConfig::default(),
        api,
        Rc::new(RecordingNotifier::default()),
        &recording_surfaces(&log),
    ))
    .expect("charts created")
}

fn price_len(controller: &ChartController<MockApi, RecordingNotifier>) -> Option<usize> {
    controller.chart_spec(ChartName::Price).map(|spec| spec.dataset.values.len())
}

#[test]
fn each_period_change_fetches_again() {
    let api = Rc::new(
        MockApi::default()
            .with_historical(Ok(series(120)))
            .with_correlation(Ok(CorrelationMap::default()))
            .with_historical(Ok(series(120)))
            .with_historical(Ok(series(120))),
    );
    let controller = ready_controller(Rc::clone(&api));

    assert_eq!(block_on(controller.update_period(7)), Ok(true));
    assert_eq!(price_len(&controller), Some(7));
    assert_eq!(block_on(controller.update_period(30)), Ok(true));
    assert_eq!(price_len(&controller), Some(30));
    assert_eq!(*api.historical_calls.borrow(), 3);
}

#[test]
fn stale_period_response_is_discarded() {
    let api = Rc::new(
        MockApi::default()
            .with_historical(Ok(series(120)))
            .with_correlation(Ok(CorrelationMap::default())),
    );
    let controller = ready_controller(Rc::clone(&api));

    let slow = api.pending_historical();
    let fast = api.pending_historical();

    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut pool = LocalPool::new();
    for days in [7, 30] {
        let controller = controller.clone();
        let outcomes = Rc::clone(&outcomes);
        pool.spawner()
            .spawn_local(async move {
                let applied = controller.update_period(days).await;
                outcomes.borrow_mut().push((days, applied));
            })
            .expect("spawn");
        pool.run_until_stalled();
    }

    // The 30-day request was issued last and answers first
    fast.send(series(120)).expect("receiver alive");
    pool.run_until_stalled();
    assert_eq!(price_len(&controller), Some(30));

    slow.send(series(120)).expect("receiver alive");
    pool.run_until_stalled();

    assert_eq!(price_len(&controller), Some(30));
    assert_eq!(outcomes.borrow().as_slice(), [(30, Ok(true)), (7, Ok(false))]);
}

#[test]
fn failed_refresh_keeps_current_window() {
    let api = Rc::new(
        MockApi::default()
            .with_historical(Ok(series(120)))
            .with_correlation(Ok(CorrelationMap::default())),
    );
    let controller = ready_controller(Rc::clone(&api));

    assert!(block_on(controller.update_period(7)).is_err());
    assert_eq!(price_len(&controller), Some(90));
}

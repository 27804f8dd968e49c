//! tests/pipeline.rs
//!
//! End-to-end checks: producer calls on a connector, through a binding, into
//! a live series and the ranges of its view.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use livechart::producer::{CancellationToken, spawn_sine_wave};
use livechart::series::CategorizedBarSeries;
use livechart::{
    AxisRangeConfig, ConnectorConfig, ConnectorEvent, DataConnector, LiveError, LivePlotView,
    LiveSeries, ManualClock, PointSeries, Range, SeriesBinding, StyleOptions,
};

fn auto_view(title: &str) -> Arc<LivePlotView> {
    Arc::new(LivePlotView::new(title, AxisRangeConfig::default(), AxisRangeConfig::default()).unwrap())
}

#[test]
fn bounded_buffer_keeps_newest_points() {
    let connector = DataConnector::new(ConnectorConfig::bounded(5).unwrap()).unwrap();
    for i in 1..=6 {
        connector.append_point(i as f64 * 10.0, Some(i as f64), StyleOptions::new());
    }
    let (x, y) = connector.snapshot();
    assert_eq!(x, vec![2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(y, vec![20.0, 30.0, 40.0, 50.0, 60.0]);
    assert_eq!(connector.rolling_index(), 6);
}

#[test]
fn update_rate_limits_admission_on_a_manual_clock() {
    let clock = Arc::new(ManualClock::new());
    let config = ConnectorConfig::default()
        .with_update_rate(10.0)
        .with_plot_rate(5.0);
    let connector = DataConnector::with_clock(config, clock.clone()).unwrap();
    let (tx, rx) = mpsc::channel();
    connector.subscribe(Arc::new(tx));

    // one second of attempts every 10 ms
    for i in 0..100 {
        connector.append_point(i as f64, None, StyleOptions::new());
        clock.advance(Duration::from_millis(10));
    }
    assert_eq!(connector.len(), 10);

    let redraws = rx
        .try_iter()
        .filter(|event| matches!(event, ConnectorEvent::DataChanged { .. }))
        .count();
    assert_eq!(redraws, 5);
}

#[test]
fn set_data_replaces_and_validates() {
    let connector = DataConnector::new(ConnectorConfig::default()).unwrap();
    connector
        .append_array(vec![5.0, 6.0], None, StyleOptions::new())
        .unwrap();
    connector
        .set_data(vec![1.0, 2.0, 3.0], None, StyleOptions::new())
        .unwrap();
    let (x, y) = connector.snapshot();
    assert_eq!(x, vec![0.0, 1.0, 2.0]);
    assert_eq!(y, vec![1.0, 2.0, 3.0]);
    assert_eq!(connector.rolling_index(), 3);

    let err = connector
        .set_data(vec![1.0], Some(vec![0.0, 1.0]), StyleOptions::new())
        .unwrap_err();
    assert!(matches!(err, LiveError::LengthMismatch { .. }));
    assert_eq!(connector.len(), 3);
}

#[test]
fn set_data_numbers_kept_points_after_truncation() {
    let view = auto_view("truncated");
    let connector = DataConnector::new(ConnectorConfig::bounded(3).unwrap()).unwrap();
    let series = Arc::new(Mutex::new(PointSeries::line()));
    SeriesBinding::attach(&connector, series.clone(), view.clone());

    connector
        .set_data(vec![1.0, 2.0, 3.0, 4.0], None, StyleOptions::new())
        .unwrap();
    assert_eq!(connector.snapshot(), (vec![0.0, 1.0, 2.0], vec![2.0, 3.0, 4.0]));
    assert_eq!(series.lock().unwrap().x_data(), &[0.0, 1.0, 2.0]);
    assert_eq!(view.x_range(), Some(Range::new(0.0, 2.0)));
}

#[test]
fn append_array_continues_x_run() {
    let connector = DataConnector::new(ConnectorConfig::default()).unwrap();
    connector.append_point(1.0, Some(4.0), StyleOptions::new());
    connector
        .append_array(vec![2.0, 3.0, 4.0], None, StyleOptions::new())
        .unwrap();
    let (x, _) = connector.snapshot();
    assert_eq!(x, vec![4.0, 5.0, 6.0, 7.0]);
}

#[test]
fn two_connectors_share_one_view() {
    let view = auto_view("shared");
    let a = DataConnector::new(ConnectorConfig::default()).unwrap();
    let b = DataConnector::new(ConnectorConfig::default()).unwrap();
    let series_a = Arc::new(Mutex::new(PointSeries::line()));
    let series_b = Arc::new(Mutex::new(PointSeries::line()));
    SeriesBinding::attach(&a, series_a.clone(), view.clone());
    SeriesBinding::attach(&b, series_b.clone(), view.clone());

    for i in 0..=10 {
        a.append_point(i as f64, Some(i as f64), StyleOptions::new());
    }
    for i in 0..=5 {
        b.append_point(i as f64 * 4.0, Some(i as f64), StyleOptions::new());
    }
    assert_eq!(view.x_range(), Some(Range::new(0.0, 10.0)));
    assert_eq!(view.y_range(), Some(Range::new(0.0, 20.0)));

    b.set_visible(false);
    assert_eq!(view.y_range(), Some(Range::new(0.0, 10.0)));

    b.clear();
    b.set_visible(true);
    assert!(series_b.lock().unwrap().is_empty());
    assert_eq!(view.y_range(), Some(Range::new(0.0, 10.0)));
    assert_eq!(series_a.lock().unwrap().len(), 11);
}

#[test]
fn paused_connector_drops_updates() {
    let view = auto_view("paused");
    let connector = DataConnector::new(ConnectorConfig::default()).unwrap();
    let series = Arc::new(Mutex::new(PointSeries::line()));
    SeriesBinding::attach(&connector, series.clone(), view.clone());

    connector.append_point(1.0, None, StyleOptions::new());
    connector.pause();
    connector.append_point(2.0, None, StyleOptions::new());
    assert!(view.is_paused());
    assert_eq!(series.lock().unwrap().len(), 1);

    connector.resume();
    connector.append_point(3.0, None, StyleOptions::new());
    assert_eq!(series.lock().unwrap().values(), &[1.0, 3.0]);
}

#[test]
fn categorized_connector_feeds_category_series() {
    let view = auto_view("states");
    let connector = DataConnector::<Vec<String>>::new(ConnectorConfig::default()).unwrap();
    let series = Arc::new(Mutex::new(
        CategorizedBarSeries::new(vec!["idle".into(), "busy".into()], 0.5).unwrap(),
    ));
    SeriesBinding::attach(&connector, series.clone(), view.clone());

    connector.append_point(vec!["idle".to_string()], None, StyleOptions::new());
    connector.append_point(vec!["busy".to_string()], None, StyleOptions::new());
    let series = series.lock().unwrap();
    assert_eq!(series.len(), 2);
    assert!(series.category_index("busy").is_some());
    assert!(view.y_range().is_some());
}

#[test]
fn producer_thread_feeds_a_connector_until_cancelled() {
    let view = auto_view("sine");
    let connector = Arc::new(DataConnector::new(ConnectorConfig::bounded(1_000).unwrap()).unwrap());
    let series = Arc::new(Mutex::new(PointSeries::line()));
    SeriesBinding::attach(&connector, series.clone(), view.clone());

    let token = CancellationToken::new();
    let handle = spawn_sine_wave(
        vec![connector.clone()],
        Duration::from_millis(1),
        false,
        token.clone(),
    )
    .unwrap();
    thread::sleep(Duration::from_millis(100));
    token.cancel();
    handle.join().unwrap();

    let settled = connector.len();
    assert!(settled > 0);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(connector.len(), settled);

    let y = view.y_range().unwrap();
    assert!(y.low >= -1.0 && y.high <= 1.0);
}

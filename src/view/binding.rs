//! src/view/binding.rs
//!
//! Glue between a connector and the series/view pair it feeds.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::connector::{ConnectorEvent, DataConnector, Subscriber};
use crate::series::LiveSeries;

use super::plot_view::LivePlotView;

/// Applies connector events to one series and the view it is drawn in.
///
/// Runs on the producer's thread while the connector lock is held, so the
/// series and view locks are only ever taken after the connector's.
pub struct SeriesBinding<S> {
    series: Arc<Mutex<S>>,
    view: Arc<LivePlotView>,
    ignore_auto_range: bool,
}

impl<S: LiveSeries + 'static> SeriesBinding<S> {
    pub fn new(series: Arc<Mutex<S>>, view: Arc<LivePlotView>, ignore_auto_range: bool) -> Self {
        Self {
            series,
            view,
            ignore_auto_range,
        }
    }

    /// Bind `series` in `view` to `connector` and subscribe.
    pub fn attach(
        connector: &DataConnector<S::Value>,
        series: Arc<Mutex<S>>,
        view: Arc<LivePlotView>,
    ) -> Arc<Self> {
        let binding = Arc::new(Self::new(series, view, connector.ignore_auto_range()));
        connector.subscribe(binding.clone());
        log::debug!("{} bound to view '{}'", connector.id(), binding.view.title());
        binding
    }

    pub fn series(&self) -> &Arc<Mutex<S>> {
        &self.series
    }

    pub fn view(&self) -> &Arc<LivePlotView> {
        &self.view
    }

    fn lock_series(&self) -> MutexGuard<'_, S> {
        self.series.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl<S: LiveSeries + 'static> Subscriber<S::Value> for SeriesBinding<S> {
    fn notify(&self, event: &ConnectorEvent<S::Value>) {
        match event {
            ConnectorEvent::DataChanged {
                connector,
                x,
                y,
                style,
            } => {
                if let Err(e) = self.lock_series().set_data(x, y, style) {
                    log::warn!("{connector}: series rejected update: {e}");
                }
            }
            ConnectorEvent::RollTick { connector, tick } => {
                if self.ignore_auto_range {
                    return;
                }
                let series = self.lock_series();
                self.view.roll(*connector, &*series, *tick);
            }
            ConnectorEvent::Reset { connector } => self.view.detach(*connector),
            ConnectorEvent::Cleared { connector } => {
                self.lock_series().clear();
                self.view.detach(*connector);
            }
            ConnectorEvent::Toggled { connector, visible } => {
                self.view.set_ignored(*connector, !visible);
            }
            ConnectorEvent::Paused { connector } => {
                self.view.set_paused(true);
                log::info!("view '{}' paused by {connector}", self.view.title());
            }
            ConnectorEvent::Resumed { connector } => {
                self.view.set_paused(false);
                log::info!("view '{}' resumed by {connector}", self.view.title());
            }
        }
    }
}

impl<S> fmt::Debug for SeriesBinding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesBinding")
            .field("view", &self.view.title())
            .field("ignore_auto_range", &self.ignore_auto_range)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{ConnectorConfig, StyleOptions};
    use crate::range::{AxisRangeConfig, Range};
    use crate::series::{CandlestickSeries, Candle, PointSeries};

    fn setup(config: ConnectorConfig) -> (DataConnector, Arc<Mutex<PointSeries>>, Arc<LivePlotView>) {
        let connector = DataConnector::new(config).unwrap();
        let series = Arc::new(Mutex::new(PointSeries::line()));
        let view = Arc::new(
            LivePlotView::new("binding", AxisRangeConfig::default(), AxisRangeConfig::default())
                .unwrap(),
        );
        SeriesBinding::attach(&connector, series.clone(), view.clone());
        (connector, series, view)
    }

    #[test]
    fn appends_reach_series_and_view() {
        let (connector, series, view) = setup(ConnectorConfig::default());
        for i in 0..=10 {
            connector.append_point(i as f64 * 2.0, Some(i as f64), StyleOptions::new());
        }
        assert_eq!(series.lock().unwrap().len(), 11);
        assert_eq!(view.x_range(), Some(Range::new(0.0, 10.0)));
        assert_eq!(view.y_range(), Some(Range::new(0.0, 20.0)));
    }

    #[test]
    fn ignore_auto_range_leaves_view_alone() {
        let config = ConnectorConfig::default().with_ignore_auto_range(true);
        let (connector, series, view) = setup(config);
        connector.append_point(1.0, None, StyleOptions::new());
        assert_eq!(series.lock().unwrap().len(), 1);
        assert_eq!(view.x_range(), None);
    }

    #[test]
    fn clear_empties_series_and_contribution() {
        let (connector, series, view) = setup(ConnectorConfig::default());
        connector.append_array(vec![1.0, 2.0, 3.0], None, StyleOptions::new())
            .unwrap();
        assert!(view.x_range().is_some());

        connector.clear();
        assert!(series.lock().unwrap().is_empty());
        assert_eq!(view.x_range(), None);
    }

    #[test]
    fn hidden_series_stop_shaping_the_view() {
        let (connector, _series, view) = setup(ConnectorConfig::default());
        connector.append_point(5.0, Some(1.0), StyleOptions::new());
        connector.set_visible(false);
        assert_eq!(view.y_range(), None);
        connector.set_visible(true);
        assert!(view.y_range().is_some());
    }

    #[test]
    fn pause_is_mirrored_on_view() {
        let (connector, _series, view) = setup(ConnectorConfig::default());
        connector.pause();
        assert!(view.is_paused());
        connector.resume();
        assert!(!view.is_paused());
    }

    #[test]
    fn candle_connector_drives_candle_series() {
        let connector = DataConnector::<Candle>::new(ConnectorConfig::default()).unwrap();
        let series = Arc::new(Mutex::new(CandlestickSeries::new()));
        let view = Arc::new(
            LivePlotView::new("ohlc", AxisRangeConfig::default(), AxisRangeConfig::default())
                .unwrap(),
        );
        SeriesBinding::attach(&connector, series.clone(), view.clone());
        connector.append_point(Candle::new(1.0, 2.0, 0.0, 4.0), None, StyleOptions::new());
        connector.append_point(Candle::new(2.0, 1.0, -2.0, 3.0), None, StyleOptions::new());
        assert_eq!(series.lock().unwrap().len(), 2);
        assert_eq!(view.y_range(), Some(Range::new(-2.0, 4.0)));
        assert_eq!(view.x_range(), Some(Range::new(0.0, 1.0)));
    }
}

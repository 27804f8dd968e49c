//! src/plot.rs
//!
//! Shared per-plot state of the terminal app: one view and the series drawn
//! in it, each fed by its own connector.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use livechart::{ConnectorConfig, DataConnector, LivePlotView, PointSeries, SeriesBinding};
use ratatui::style::Color;

/// One series of a plot and the connector feeding it.
pub struct SeriesHandle {
    pub name: String,
    pub color: Color,
    pub connector: Arc<DataConnector>,
    pub series: Arc<Mutex<PointSeries>>,
    visible: AtomicBool,
}

impl SeriesHandle {
    /// Lock the series for reading. Never call connector methods while
    /// holding this guard.
    pub fn lock(&self) -> MutexGuard<'_, PointSeries> {
        self.series.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
        self.connector.set_visible(visible);
    }
}

/// The authoritative shared plot object used across threads.
pub struct PlotShared {
    pub view: Arc<LivePlotView>,
    pub series: Vec<SeriesHandle>,
}

impl PlotShared {
    pub fn new(view: LivePlotView) -> Self {
        Self {
            view: Arc::new(view),
            series: Vec::new(),
        }
    }

    /// Create a connector for `series`, bind it to this plot's view and
    /// return the connector for producers.
    pub fn add_series(
        &mut self,
        name: &str,
        color: Color,
        config: ConnectorConfig,
        series: PointSeries,
    ) -> livechart::Result<Arc<DataConnector>> {
        let connector = Arc::new(DataConnector::new(config)?);
        let series = Arc::new(Mutex::new(series));
        SeriesBinding::attach(&connector, series.clone(), self.view.clone());
        self.series.push(SeriesHandle {
            name: name.to_string(),
            color,
            connector: connector.clone(),
            series,
            visible: AtomicBool::new(true),
        });
        Ok(connector)
    }

    pub fn title(&self) -> &str {
        self.view.title()
    }

    pub fn is_paused(&self) -> bool {
        self.view.is_paused()
    }

    pub fn pause(&self) {
        for handle in &self.series {
            handle.connector.pause();
        }
    }

    pub fn resume(&self) {
        for handle in &self.series {
            handle.connector.resume();
        }
    }

    pub fn toggle_pause(&self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn clear(&self) {
        for handle in &self.series {
            handle.connector.clear();
        }
    }

    /// Show or hide series `idx`; `false` if there is no such series.
    pub fn set_series_visible(&self, idx: usize, visible: bool) -> bool {
        match self.series.get(idx) {
            Some(handle) => {
                handle.set_visible(visible);
                true
            }
            None => false,
        }
    }
}

/// Alias: Arc<PlotShared>
pub type SharedPlot = Arc<PlotShared>;

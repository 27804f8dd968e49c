//! src/connector/data_connector.rs
//!
//! Thread-safe ingestion point between producers and one or more views.
//!
//! Producers call the `append_*`/`set_data` methods unconditionally from
//! their own threads. An update is dropped, without any signal to the caller,
//! when the connector is paused, when the update interval has not elapsed, or
//! when another producer is inside the critical section. Accepted updates are
//! announced to subscribers only when the plot interval has elapsed, so a fast
//! producer does not force a redraw per sample.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, TryLockError};
use std::time::Instant;

use super::buffer::SeriesBuffer;
use super::clock::{Clock, SystemClock};
use super::config::ConnectorConfig;
use super::event::{ConnectorEvent, StyleOptions, Subscriber};
use super::gate::RateGate;
use crate::error::{LiveError, Result};

static CONNECTOR_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique connector identity, used as the key of range contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectorId(u64);

impl ConnectorId {
    pub(crate) fn next() -> Self {
        Self(CONNECTOR_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connector#{}", self.0)
    }
}

/// Everything guarded by the connector lock.
#[derive(Debug)]
struct ConnectorState<Y> {
    buffer: SeriesBuffer<Y>,
    gate: RateGate,
    rolling_index: u64,
}

pub struct DataConnector<Y = f64> {
    id: ConnectorId,
    config: ConnectorConfig,
    state: Mutex<ConnectorState<Y>>,
    paused: AtomicBool,
    subscribers: RwLock<Vec<Arc<dyn Subscriber<Y>>>>,
    clock: Arc<dyn Clock>,
}

impl<Y: Clone + Send + 'static> DataConnector<Y> {
    /// Create a connector driven by the system clock.
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a connector reading time from `clock`.
    pub fn with_clock(config: ConnectorConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let id = ConnectorId::next();
        log::debug!(
            "{id} created: max_points={:?} update_rate={} plot_rate={}",
            config.max_points.limit(),
            config.update_rate,
            config.plot_rate
        );
        Ok(Self {
            id,
            state: Mutex::new(ConnectorState {
                buffer: SeriesBuffer::new(config.max_points),
                gate: RateGate::new(config.update_rate, config.plot_rate),
                rolling_index: 0,
            }),
            config,
            paused: AtomicBool::new(false),
            subscribers: RwLock::new(Vec::new()),
            clock,
        })
    }

    pub fn id(&self) -> ConnectorId {
        self.id
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn ignore_auto_range(&self) -> bool {
        self.config.ignore_auto_range
    }

    /// Register a view target.
    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber<Y>>) {
        self.subscribers
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .push(subscriber);
    }

    /// Append one point. A missing `x` continues from the last x (or 0).
    pub fn append_point(&self, y: Y, x: Option<f64>, style: StyleOptions) {
        let Some((mut state, now)) = self.admit() else {
            return;
        };
        let x = x.unwrap_or_else(|| state.buffer.next_x());
        state.buffer.push(x, y);
        state.gate.mark_update(now);

        let tick = state.rolling_index;
        state.rolling_index += 1;
        if state.gate.due_for_plot(now) {
            self.publish(&mut state, now, style);
            self.emit(&ConnectorEvent::RollTick {
                connector: self.id,
                tick,
            });
        }
    }

    /// Append a batch. Missing x values continue as a contiguous integer run.
    ///
    /// Fails only when both arrays are given with different lengths.
    pub fn append_array(
        &self,
        ys: Vec<Y>,
        xs: Option<Vec<f64>>,
        style: StyleOptions,
    ) -> Result<()> {
        check_lengths(xs.as_deref(), ys.len())?;
        if ys.is_empty() {
            return Ok(());
        }
        let Some((mut state, now)) = self.admit() else {
            return Ok(());
        };
        let count = ys.len();
        let xs = xs.unwrap_or_else(|| {
            let start = state.buffer.next_x();
            (0..count).map(|i| start + i as f64).collect()
        });
        state.buffer.extend(xs.into_iter().zip(ys));
        state.gate.mark_update(now);

        let tick = state.rolling_index;
        state.rolling_index += count as u64;
        if state.gate.due_for_plot(now) {
            self.publish(&mut state, now, style);
            self.emit(&ConnectorEvent::RollTick {
                connector: self.id,
                tick,
            });
        }
        Ok(())
    }

    /// Replace the whole dataset. Missing x numbers the kept points `0..len`.
    pub fn set_data(&self, ys: Vec<Y>, xs: Option<Vec<f64>>, style: StyleOptions) -> Result<()> {
        check_lengths(xs.as_deref(), ys.len())?;
        let Some((mut state, now)) = self.admit() else {
            return Ok(());
        };
        state.buffer.replace(xs, ys);
        state.gate.mark_update(now);

        let len = state.buffer.len() as u64;
        state.rolling_index = len;
        if state.gate.due_for_plot(now) {
            self.publish(&mut state, now, style);
            self.emit(&ConnectorEvent::Reset { connector: self.id });
            self.emit(&ConnectorEvent::RollTick {
                connector: self.id,
                tick: len.saturating_sub(1),
            });
        }
        Ok(())
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
        log::info!("{} paused", self.id);
        self.emit(&ConnectorEvent::Paused { connector: self.id });
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
        log::info!("{} resumed", self.id);
        self.emit(&ConnectorEvent::Resumed { connector: self.id });
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Empty the buffer and restart tick counting. Waits for the lock.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.buffer.clear();
        state.rolling_index = 0;
        log::debug!("{} cleared", self.id);
        self.emit(&ConnectorEvent::Cleared { connector: self.id });
        self.emit(&ConnectorEvent::RollTick {
            connector: self.id,
            tick: 0,
        });
    }

    /// Show or hide the series; hidden series are left out of range merges.
    pub fn set_visible(&self, visible: bool) {
        self.emit(&ConnectorEvent::Toggled {
            connector: self.id,
            visible,
        });
    }

    pub fn len(&self) -> usize {
        self.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rolling_index(&self) -> u64 {
        self.lock().rolling_index
    }

    /// Owned copy of the buffered x and y values.
    pub fn snapshot(&self) -> (Vec<f64>, Vec<Y>) {
        self.lock().buffer.snapshot()
    }

    /// Acquire the state for an update, or `None` if the update is dropped.
    fn admit(&self) -> Option<(MutexGuard<'_, ConnectorState<Y>>, Instant)> {
        if self.is_paused() {
            log::trace!("{} paused, update dropped", self.id);
            return None;
        }
        let state = match self.state.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                log::trace!("{} busy, update dropped", self.id);
                return None;
            }
            Err(TryLockError::Poisoned(p)) => p.into_inner(),
        };
        let now = self.clock.now();
        if !state.gate.admits_update(now) {
            log::trace!("{} rate limited, update dropped", self.id);
            return None;
        }
        Some((state, now))
    }

    fn lock(&self) -> MutexGuard<'_, ConnectorState<Y>> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Hand the current buffer to subscribers and record the redraw.
    fn publish(&self, state: &mut ConnectorState<Y>, now: Instant, style: StyleOptions) {
        let (x, y) = state.buffer.snapshot();
        self.emit(&ConnectorEvent::DataChanged {
            connector: self.id,
            x,
            y,
            style,
        });
        state.gate.mark_plot(now);
    }

    fn emit(&self, event: &ConnectorEvent<Y>) {
        let subscribers = self.subscribers.read().unwrap_or_else(|p| p.into_inner());
        for subscriber in subscribers.iter() {
            subscriber.notify(event);
        }
    }
}

impl<Y> fmt::Debug for DataConnector<Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataConnector")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("paused", &self.paused.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

fn check_lengths(xs: Option<&[f64]>, y_len: usize) -> Result<()> {
    match xs {
        Some(xs) if xs.len() != y_len => Err(LiveError::LengthMismatch {
            x_len: xs.len(),
            y_len,
        }),
        _ => Ok(()),
    }
}

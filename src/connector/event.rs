//! src/connector/event.rs
//!
//! Typed notifications from a connector to its subscribers.

use std::collections::BTreeMap;
use std::sync::mpsc::Sender;

use super::data_connector::ConnectorId;

/// Per-update rendering hints. Interpretation belongs to the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOptions(BTreeMap<String, String>);

impl StyleOptions {
    pub const COLOR: &'static str = "color";
    pub const PEN: &'static str = "pen";
    pub const FILL: &'static str = "fill";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorEvent<Y> {
    /// Buffer contents after a mutation that is due for redraw.
    DataChanged {
        connector: ConnectorId,
        x: Vec<f64>,
        y: Vec<Y>,
        style: StyleOptions,
    },
    /// Drives axis range recomputation.
    RollTick { connector: ConnectorId, tick: u64 },
    /// Whole dataset replaced.
    Reset { connector: ConnectorId },
    /// Buffer emptied.
    Cleared { connector: ConnectorId },
    Paused { connector: ConnectorId },
    Resumed { connector: ConnectorId },
    /// Series shown or hidden; hidden series do not shape the viewport.
    Toggled { connector: ConnectorId, visible: bool },
}

impl<Y> ConnectorEvent<Y> {
    pub fn connector(&self) -> ConnectorId {
        match self {
            ConnectorEvent::DataChanged { connector, .. }
            | ConnectorEvent::RollTick { connector, .. }
            | ConnectorEvent::Reset { connector }
            | ConnectorEvent::Cleared { connector }
            | ConnectorEvent::Paused { connector }
            | ConnectorEvent::Resumed { connector }
            | ConnectorEvent::Toggled { connector, .. } => *connector,
        }
    }
}

/// A view target. Called synchronously while the connector holds its lock,
/// so implementations must not feed data back into the same connector.
pub trait Subscriber<Y>: Send + Sync {
    fn notify(&self, event: &ConnectorEvent<Y>);
}

/// Message-passing subscriber: every event is cloned into the channel.
impl<Y: Clone + Send> Subscriber<Y> for Sender<ConnectorEvent<Y>> {
    fn notify(&self, event: &ConnectorEvent<Y>) {
        // a dropped receiver just means nobody is watching anymore
        let _ = self.send(event.clone());
    }
}

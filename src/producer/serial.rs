//! src/producer/serial.rs
//!
//! Serial port telemetry reader. Lines are split into numeric fields and the
//! selected fields are appended to connectors, e.g. for a radio receiver
//! printing
//!
//! ```text
//! Received: MSG 9 RSSI -94.5
//! RSSI_PACKET: -93.5 dBm
//! ```
//!
//! the channels `("Received:", 0)` and `("Received:", 1)` pick up the message
//! number and RSSI, and `("RSSI_PACKET:", 0)` the packet RSSI.

use std::io::{self, BufRead, BufReader};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::cancel::CancellationToken;
use crate::connector::{DataConnector, StyleOptions};

#[derive(Debug, Clone)]
pub struct SerialSource {
    pub port: String,
    pub baud_rate: u32,
    /// Read timeout; the reader checks for cancellation at least this often.
    pub timeout: Duration,
}

impl SerialSource {
    pub fn new(port: &str) -> Self {
        Self {
            port: port.to_string(),
            baud_rate: 115_200,
            timeout: Duration::from_millis(500),
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }
}

/// Routes one numeric field of matching lines into a connector.
#[derive(Debug, Clone)]
pub struct SerialChannel {
    /// Lines must start with this (after trimming). Empty matches every line.
    pub prefix: String,
    /// Index among the numbers found on the line.
    pub field: usize,
    pub connector: Arc<DataConnector>,
}

impl SerialChannel {
    pub fn new(prefix: &str, field: usize, connector: Arc<DataConnector>) -> Self {
        Self {
            prefix: prefix.to_string(),
            field,
            connector,
        }
    }

    /// Value this channel takes from `line`, if any.
    pub fn extract(&self, line: &str) -> Option<f64> {
        let line = line.trim();
        if !line.starts_with(&self.prefix) {
            return None;
        }
        parse_numbers(&line[self.prefix.len()..]).get(self.field).copied()
    }
}

/// All tokens of `line` that parse as finite numbers, in order. Surrounding
/// punctuation such as `:` or `,` is ignored.
pub fn parse_numbers(line: &str) -> Vec<f64> {
    line.split_whitespace()
        .map(|token| token.trim_matches(is_separator))
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}

fn is_separator(c: char) -> bool {
    matches!(c, ',' | ';' | ':' | '(' | ')' | '[' | ']')
}

/// Open `source` on a new thread and feed `channels` until `token` is
/// cancelled or the port fails.
pub fn spawn_serial_reader(
    source: SerialSource,
    channels: Vec<SerialChannel>,
    token: CancellationToken,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("serial {}", source.port))
        .spawn(move || {
            let port = match serialport::new(&source.port, source.baud_rate)
                .timeout(source.timeout)
                .open()
            {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("failed to open serial port {}: {e}", source.port);
                    return;
                }
            };
            log::info!("serial reader started on {} @ {} baud", source.port, source.baud_rate);

            let mut reader = BufReader::new(port);
            let mut line = String::new();
            while !token.is_cancelled() {
                // a timeout keeps the partial line; the next read completes it
                match reader.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        for channel in &channels {
                            if let Some(value) = channel.extract(&line) {
                                channel.connector.append_point(value, None, StyleOptions::new());
                            }
                        }
                        line.clear();
                    }
                    Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
                    Err(e) => {
                        log::warn!("error reading serial port {}: {e}", source.port);
                        break;
                    }
                }
            }
            log::info!("serial reader on {} exiting", source.port);
        })
}

//! src/producer/generators.rs
//!
//! Synthetic signal generators. Every generator runs on its own named thread,
//! produces one step per `period` and pushes it into all of its connectors.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use rand::seq::IndexedRandom;

use super::cancel::CancellationToken;
use crate::connector::{DataConnector, StyleOptions};
use crate::series::Candle;

pub fn sine_sample(x: f64) -> f64 {
    (x * 0.025).sin()
}

pub fn cosine_sample(x: f64) -> f64 {
    (x * 0.025).cos()
}

/// Candle built from two phase-shifted sines, with wicks up to one unit
/// beyond the body.
pub fn candle_sample<R: Rng>(x: f64, rng: &mut R) -> Candle {
    let (a, b) = ((x * 0.025).sin(), (x * 0.020).sin());
    let low = a.min(b) - rng.random_range(0..=1000u32) as f64 * 1e-3;
    let high = a.max(b) + rng.random_range(0..=1000u32) as f64 * 1e-3;
    Candle::new(a, b, low, high)
}

/// Run `step(i)` for `i = 1, 2, ...` every `period` until `token` is cancelled.
pub fn spawn_periodic<F>(
    name: &str,
    period: Duration,
    token: CancellationToken,
    mut step: F,
) -> io::Result<JoinHandle<()>>
where
    F: FnMut(u64) + Send + 'static,
{
    let name = name.to_string();
    thread::Builder::new().name(name.clone()).spawn(move || {
        log::debug!("{name} started");
        let mut i = 0u64;
        while !token.is_cancelled() {
            i += 1;
            step(i);
            thread::sleep(period);
        }
        log::debug!("{name} stopped");
    })
}

/// `y = sin(0.025 x)` one point per step. `flip` swaps the roles of x and y.
pub fn spawn_sine_wave(
    connectors: Vec<Arc<DataConnector>>,
    period: Duration,
    flip: bool,
    token: CancellationToken,
) -> io::Result<JoinHandle<()>> {
    spawn_wave("sine", sine_sample, connectors, period, flip, token)
}

pub fn spawn_cosine_wave(
    connectors: Vec<Arc<DataConnector>>,
    period: Duration,
    flip: bool,
    token: CancellationToken,
) -> io::Result<JoinHandle<()>> {
    spawn_wave("cosine", cosine_sample, connectors, period, flip, token)
}

fn spawn_wave(
    name: &str,
    wave: fn(f64) -> f64,
    connectors: Vec<Arc<DataConnector>>,
    period: Duration,
    flip: bool,
    token: CancellationToken,
) -> io::Result<JoinHandle<()>> {
    spawn_periodic(name, period, token, move |i| {
        let x = i as f64;
        let y = wave(x);
        for connector in &connectors {
            if flip {
                connector.append_point(x, Some(y), StyleOptions::new());
            } else {
                connector.append_point(y, Some(x), StyleOptions::new());
            }
        }
    })
}

/// Sine wave delivered `points` samples at a time through `append_array`.
pub fn spawn_sine_array(
    connectors: Vec<Arc<DataConnector>>,
    period: Duration,
    points: usize,
    token: CancellationToken,
) -> io::Result<JoinHandle<()>> {
    let mut start = 0usize;
    spawn_periodic("sine-array", period, token, move |_| {
        let xs: Vec<f64> = (start..start + points).map(|x| x as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| sine_sample(x)).collect();
        for connector in &connectors {
            // lengths always agree
            let _ = connector.append_array(ys.clone(), Some(xs.clone()), StyleOptions::new());
        }
        start += points;
    })
}

pub fn spawn_candles(
    connectors: Vec<Arc<DataConnector<Candle>>>,
    period: Duration,
    token: CancellationToken,
) -> io::Result<JoinHandle<()>> {
    spawn_periodic("candles", period, token, move |i| {
        let mut rng = rand::rng();
        let x = i as f64;
        for connector in &connectors {
            connector.append_point(candle_sample(x, &mut rng), Some(x), StyleOptions::new());
        }
    })
}

/// Random subset of `categories` per step, x advancing by 0.01.
pub fn spawn_categories(
    connectors: Vec<Arc<DataConnector<Vec<String>>>>,
    categories: Vec<String>,
    period: Duration,
    token: CancellationToken,
) -> io::Result<JoinHandle<()>> {
    spawn_periodic("categories", period, token, move |i| {
        let mut rng = rand::rng();
        let count = rng.random_range(0..=categories.len());
        let active: Vec<String> = categories.choose_multiple(&mut rng, count).cloned().collect();
        for connector in &connectors {
            connector.append_point(active.clone(), Some(i as f64 * 0.01), StyleOptions::new());
        }
    })
}

/// Random walk with uniform steps in `[-step, step]` over wall-clock time:
/// x is seconds since the Unix epoch.
pub fn spawn_random_walk(
    connectors: Vec<Arc<DataConnector>>,
    period: Duration,
    step: f64,
    token: CancellationToken,
) -> io::Result<JoinHandle<()>> {
    let mut value = 0.0f64;
    spawn_periodic("random-walk", period, token, move |_| {
        value += rand::rng().random_range(-step..=step);
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64());
        for connector in &connectors {
            connector.append_point(value, Some(now), StyleOptions::new());
        }
    })
}

//! src/app.rs
//!
//! # Top-Level Application (`app.rs`)
//!
//! Builds the plots, starts the producers and the remote control thread, and
//! runs the UI main loop of the terminal live-plotting demo.
//!
//! ## Overview
//! The application:
//! - Renders three live plots, each with a chart, a history list and an info
//!   panel, plus a log panel.
//! - Feeds every series from its own producer thread through a
//!   `DataConnector`; the UI only reads series and view state.
//! - Spawns a TCP control server that accepts line-based ASCII commands.
//!
//! ## Plots
//! 0. **Rolling sine**: 100 Hz sine, x window paging forward every 200 ticks.
//! 1. **Sine & cosine**: two series sharing one viewport. The cosine is
//!    throttled to 20 Hz and can be hidden, which takes it out of the range
//!    merge.
//! 2. **Random walk** (scatter, x in local time), or **serial telemetry** when
//!    `LIVECHART_SERIAL` names a serial port.
//!
//! # Environment
//! - `LIVECHART_SERIAL`: serial port for plot 2, e.g. `/dev/ttyACM0`.
//! - `LIVECHART_REMOTE`: control server address, default `127.0.0.1:4000`.
//!
//! # Keyboard Controls
//! - **Tab**: cycle focus among plots. The focused plot's Info panel is highlighted.
//! - **p**: pause/resume the focused plot.
//! - **c**: clear the focused plot.
//! - **h**: hide/show the focused plot's secondary series.
//! - **q**: quit and restore terminal state.
//!
//! # Remote TCP Protocol
//! See `net::remote` for the command list. Example:
//! ```text
//! $ nc 127.0.0.1 4000
//! fixed 0 y -1.5 1.5
//! OK
//! hide 1 1
//! OK
//! ```

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode};
use livechart::producer::{
    CancellationToken, SerialChannel, SerialSource, spawn_cosine_wave, spawn_random_walk,
    spawn_serial_reader, spawn_sine_wave,
};
use livechart::series::{LeadingLineState, Orientation, TextOrientation};
use livechart::{
    Axis, AxisRangeConfig, ConnectorConfig, LivePlotView, PointSeries, StyleOptions, TickFormat,
};
use log::LevelFilter;
use ratatui::layout::{Constraint, Direction};
use ratatui::style::Color;

use crate::logger;
use crate::net::remote_server;
use crate::panels::{
    GraphPanel, HistoryPanel, InfoPanel, LogPanel, ParagraphPanel, TitlePanel,
};
use crate::plot::{PlotShared, SharedPlot};
use crate::ui::{Node, group, panel};

const DEFAULT_REMOTE: &str = "127.0.0.1:4000";

const KEYS: &[(&str, &str)] = &[
    ("TAB", "focus"),
    ("P", "pause/resume"),
    ("C", "clear"),
    ("H", "hide/show secondary"),
    ("Q", "quit"),
];

fn leading_line() -> LeadingLineState {
    let mut leading = LeadingLineState::new();
    leading.set_leading_line(
        Orientation::Vertical,
        Axis::Y,
        TextOrientation::Auto,
        StyleOptions::new().with(StyleOptions::COLOR, "red"),
    );
    leading
}

fn rolling_sine(token: &CancellationToken) -> color_eyre::Result<(PlotShared, JoinHandle<()>)> {
    let view = LivePlotView::new(
        "Rolling sine",
        AxisRangeConfig::rolling(200),
        AxisRangeConfig::fixed(-1.2, 1.2),
    )?;
    let mut plot = PlotShared::new(view);
    let sine = plot.add_series(
        "sin",
        Color::Cyan,
        ConnectorConfig::bounded(600)?.with_plot_rate(20.0),
        PointSeries::line().with_leading_line(leading_line()),
    )?;
    let producer = spawn_sine_wave(
        vec![sine],
        Duration::from_millis(10),
        false,
        token.clone(),
    )?;
    Ok((plot, producer))
}

fn shared_view(token: &CancellationToken) -> color_eyre::Result<(PlotShared, Vec<JoinHandle<()>>)> {
    let view = LivePlotView::new(
        "Sine & cosine",
        AxisRangeConfig::default(),
        AxisRangeConfig::default(),
    )?;
    let mut plot = PlotShared::new(view);
    let sine = plot.add_series(
        "sin",
        Color::Magenta,
        ConnectorConfig::bounded(300)?.with_plot_rate(20.0),
        PointSeries::line(),
    )?;
    let cosine = plot.add_series(
        "cos",
        Color::Yellow,
        ConnectorConfig::bounded(300)?
            .with_update_rate(20.0)
            .with_plot_rate(10.0),
        PointSeries::line(),
    )?;
    let producers = vec![
        spawn_sine_wave(vec![sine], Duration::from_millis(10), false, token.clone())?,
        spawn_cosine_wave(vec![cosine], Duration::from_millis(10), false, token.clone())?,
    ];
    Ok((plot, producers))
}

fn telemetry(
    port: Option<String>,
    token: &CancellationToken,
) -> color_eyre::Result<(PlotShared, JoinHandle<()>)> {
    match port {
        Some(port) => {
            let view = LivePlotView::new(
                &format!("Serial telemetry ({port})"),
                AxisRangeConfig::default(),
                AxisRangeConfig::default(),
            )?;
            let mut plot = PlotShared::new(view);
            let rssi = plot.add_series(
                "RSSI ACK (dBm)",
                Color::Cyan,
                ConnectorConfig::bounded(1_000)?,
                PointSeries::line(),
            )?;
            let packet = plot.add_series(
                "RSSI PACKET (dBm)",
                Color::Yellow,
                ConnectorConfig::bounded(1_000)?,
                PointSeries::line(),
            )?;
            let reader = spawn_serial_reader(
                SerialSource::new(&port),
                vec![
                    SerialChannel::new("Received:", 1, rssi),
                    SerialChannel::new("RSSI_PACKET:", 0, packet),
                ],
                token.clone(),
            )?;
            Ok((plot, reader))
        }
        None => {
            let view = LivePlotView::new(
                "Random walk",
                AxisRangeConfig::default().with_offsets(0.0, 0.1, 0.0, 0.0),
                AxisRangeConfig::default(),
            )?
            .with_tick_formats(TickFormat::Time, TickFormat::Plain);
            let mut plot = PlotShared::new(view);
            let walk = plot.add_series(
                "walk",
                Color::Green,
                ConnectorConfig::bounded(400)?.with_plot_rate(10.0),
                PointSeries::scatter(),
            )?;
            let producer =
                spawn_random_walk(vec![walk], Duration::from_millis(25), 0.5, token.clone())?;
            Ok((plot, producer))
        }
    }
}

fn plot_region(plot: &SharedPlot, focused: bool) -> Node {
    let graph = panel(GraphPanel::new(plot.clone()));
    let history = panel(HistoryPanel::new(plot.clone()));
    let mut info_panel = InfoPanel::new(plot.clone());
    info_panel.highlighted = focused;
    let info = panel(info_panel);

    group(
        Direction::Horizontal,
        vec![Constraint::Percentage(65), Constraint::Percentage(35)],
        vec![
            graph,
            group(
                Direction::Vertical,
                vec![Constraint::Percentage(55), Constraint::Percentage(45)],
                vec![info, history],
            ),
        ],
    )
}

pub fn run() -> color_eyre::Result<()> {
    let log_lines = logger::init(LevelFilter::Info)?;
    let remote_addr = std::env::var("LIVECHART_REMOTE").unwrap_or_else(|_| DEFAULT_REMOTE.into());
    let serial_port = std::env::var("LIVECHART_SERIAL").ok();

    let token = CancellationToken::new();
    let mut producers = Vec::new();

    let (sine_plot, producer) = rolling_sine(&token)?;
    producers.push(producer);
    let (shared_plot, mut handles) = shared_view(&token)?;
    producers.append(&mut handles);
    let (telemetry_plot, producer) = telemetry(serial_port, &token)?;
    producers.push(producer);

    let plots: Vec<SharedPlot> = vec![
        SharedPlot::new(sine_plot),
        SharedPlot::new(shared_plot),
        SharedPlot::new(telemetry_plot),
    ];

    // Remote control thread
    {
        let plots_for_thread = plots.clone();
        let addr = remote_addr.clone();
        thread::spawn(move || remote_server(&addr, plots_for_thread));
    }

    let mut terminal = ratatui::init();
    let mut focused = 0usize;
    let frame_time = Duration::from_millis(100);

    loop {
        let frame_start = Instant::now();

        let regions: Vec<Node> = plots
            .iter()
            .enumerate()
            .map(|(i, plot)| plot_region(plot, i == focused))
            .collect();

        let side = group(
            Direction::Vertical,
            vec![Constraint::Length(7), Constraint::Min(3)],
            vec![
                panel(ParagraphPanel::new(KEYS, "Controls")),
                panel(LogPanel::new(log_lines.clone())),
            ],
        );

        let root = group(
            Direction::Vertical,
            vec![Constraint::Length(3), Constraint::Min(0)],
            vec![
                panel(TitlePanel::new("Live plots", &remote_addr)),
                group(
                    Direction::Horizontal,
                    vec![Constraint::Percentage(75), Constraint::Percentage(25)],
                    vec![
                        group(
                            Direction::Vertical,
                            vec![
                                Constraint::Percentage(33),
                                Constraint::Percentage(33),
                                Constraint::Percentage(34),
                            ],
                            regions,
                        ),
                        side,
                    ],
                ),
            ],
        );

        terminal.draw(|f| root.draw(f, f.area()))?;

        let mut running = true;
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                let plot = &plots[focused];
                match key.code {
                    KeyCode::Char('q') => running = false,
                    KeyCode::Tab => focused = (focused + 1) % plots.len(),
                    KeyCode::Char('p') => plot.toggle_pause(),
                    KeyCode::Char('c') => plot.clear(),
                    KeyCode::Char('h') => {
                        if let Some(secondary) = plot.series.get(1) {
                            secondary.set_visible(!secondary.is_visible());
                        }
                    }
                    _ => {}
                }
            }
        }

        if !running {
            break;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }

    ratatui::restore();
    token.cancel();
    for producer in producers {
        if producer.join().is_err() {
            log::warn!("producer thread panicked");
        }
    }
    Ok(())
}

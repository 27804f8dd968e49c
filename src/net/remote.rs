//! src/net/remote.rs
//!
//! Tiny line-based TCP control server for remote bindings.
//!
//! Commands (`<idx>` is the plot index, `<s>` a series index in that plot):
//!
//! - `pause <idx>` / `resume <idx>`
//! - `clear <idx>`
//! - `hide <idx> <s>` / `show <idx> <s>`
//! - `fixed <idx> <x|y> <low> <high>`
//! - `auto <idx> <x|y>`
//! - `quit`
//!
//! Every command gets one reply line, `OK` or `ERR <reason>`.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use livechart::{Axis, Range};

use crate::plot::{PlotShared, SharedPlot};

/// Outcome of one command line.
#[derive(Debug, PartialEq)]
pub enum Reply {
    Ok,
    Err(String),
    Bye,
}

impl Reply {
    fn line(&self) -> String {
        match self {
            Reply::Ok => "OK\n".to_string(),
            Reply::Err(reason) => format!("ERR {reason}\n"),
            Reply::Bye => "OK bye\n".to_string(),
        }
    }
}

/// Start the remote TCP server and spawn a handler thread per client.
pub fn remote_server(addr: &str, plots: Vec<SharedPlot>) {
    let plots = Arc::new(plots);
    let listener = match TcpListener::bind(addr) {
        Ok(l) => l,
        Err(e) => {
            log::warn!("remote_server: bind error {e} on {addr}");
            return;
        }
    };
    log::info!("remote control listening on {addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(s) => {
                let p = plots.clone();
                thread::spawn(move || handle_remote_client(s, p));
            }
            Err(e) => {
                log::warn!("remote_server: accept error: {e}");
            }
        }
    }
}

/// Serve one client until it quits or disconnects.
pub fn handle_remote_client(mut s: TcpStream, plots: Arc<Vec<SharedPlot>>) {
    let peer = s
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "<peer?>".into());
    let mut rdr = match s.try_clone() {
        Ok(read_half) => BufReader::new(read_half),
        Err(e) => {
            log::warn!("remote client {peer}: {e}");
            return;
        }
    };
    log::debug!("remote client {peer} connected");
    let mut line = String::new();

    loop {
        line.clear();
        if rdr.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let reply = execute(line.trim(), &plots);
        if let Reply::Err(reason) = &reply {
            log::debug!("remote client {peer}: {reason}");
        }
        let _ = s.write_all(reply.line().as_bytes());
        if reply == Reply::Bye {
            break;
        }
    }

    log::debug!("remote client {peer} disconnected");
    let _ = s.shutdown(Shutdown::Both);
}

/// Parse and apply one command.
pub fn execute(command: &str, plots: &[SharedPlot]) -> Reply {
    let parts: Vec<&str> = command.split_whitespace().collect();
    let Some(verb) = parts.first() else {
        return Reply::Err("empty".into());
    };
    let verb = verb.to_lowercase();
    if verb == "quit" {
        return Reply::Bye;
    }
    let plot = match parts.get(1).map(|idx| idx.parse::<usize>()) {
        Some(Ok(idx)) => match plots.get(idx) {
            Some(plot) => plot,
            None => return Reply::Err(format!("no plot {idx}")),
        },
        Some(Err(_)) => return Reply::Err("idx".into()),
        None => return Reply::Err(format!("unknown {command}")),
    };

    match (verb.as_str(), &parts[2..]) {
        ("pause", []) => plot.pause(),
        ("resume", []) => plot.resume(),
        ("clear", []) => plot.clear(),
        ("hide", [series]) => return set_visible(plot, series, false),
        ("show", [series]) => return set_visible(plot, series, true),
        ("fixed", [axis, low, high]) => {
            let axis = match axis.parse::<Axis>() {
                Ok(axis) => axis,
                Err(e) => return Reply::Err(e.to_string()),
            };
            let (Ok(low), Ok(high)) = (low.parse::<f64>(), high.parse::<f64>()) else {
                return Reply::Err("val".into());
            };
            plot.view.set_fixed_range(axis, Some(Range::new(low, high)));
        }
        ("auto", [axis]) => match axis.parse::<Axis>() {
            Ok(axis) => plot.view.set_fixed_range(axis, None),
            Err(e) => return Reply::Err(e.to_string()),
        },
        _ => return Reply::Err(format!("unknown {command}")),
    }
    Reply::Ok
}

fn set_visible(plot: &PlotShared, series: &str, visible: bool) -> Reply {
    match series.parse::<usize>() {
        Ok(idx) if plot.set_series_visible(idx, visible) => Reply::Ok,
        Ok(idx) => Reply::Err(format!("no series {idx}")),
        Err(_) => Reply::Err("idx".into()),
    }
}

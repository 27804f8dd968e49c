//! src/main.rs
//!
//! Entrypoint delegating to `app::run()`.

mod app;
mod logger;
mod net;
mod panels;
mod plot;
mod ui;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    app::run()
}

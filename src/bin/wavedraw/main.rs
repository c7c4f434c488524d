//! wavedraw - paint a single-cycle waveform and hear it loop.
//!
//! Run with: cargo run

mod app;
mod ui;

use app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    App::new().run()
}

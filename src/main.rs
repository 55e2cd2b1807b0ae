//! # Chicky Engine Entry Point
//!
//! Runs the engine headless. Set `CHICKY_CONFIG` to a JSON configuration file
//! and `RUST_LOG` to choose what gets logged.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    chicky_engine::run();
}

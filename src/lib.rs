//! # ChanVis-RS: Multi-Channel Random Number Visualizer
//!
//! A desktop widget that appends a random integer to every channel on a
//! fixed cadence and draws each channel as a horizontally scrolling bar
//! chart, optionally with the numbers underneath. Generation interval,
//! value range and vertical scale are editable while it runs, and the
//! channel data can be saved to and loaded from JSON.
//!
//! ## Architecture
//!
//! - **Generator**: deadline-driven state machine polled from the frame loop
//! - **Render**: pure bar layout derived from channel data and display settings
//! - **Persistence**: JSON export, shape-checked import on a reader thread
//! - **Frontend**: eframe/egui window, panels, and actions
//!
//! ## Configuration
//!
//! Preferences and the settings in force at exit are stored in the
//! platform-appropriate data directory under `dev.chanvis.chanvis-rs`:
//!
//! - **Linux**: `~/.local/share/dev.chanvis.chanvis-rs/`
//! - **macOS**: `~/Library/Application Support/dev.chanvis.chanvis-rs/`
//! - **Windows**: `%APPDATA%\dev.chanvis.chanvis-rs\`
//!
//! ## Example
//!
//! ```ignore
//! use chanvis_rs::{config::AppState, frontend::ChanVisApp};
//!
//! fn main() -> eframe::Result<()> {
//!     let app_state = AppState::load_or_default();
//!
//!     eframe::run_native(
//!         "ChanVis",
//!         eframe::NativeOptions::default(),
//!         Box::new(|cc| Ok(Box::new(ChanVisApp::new(cc, app_state)?))),
//!     )
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod generator;
pub mod persistence;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use app::ChanVisApp;
pub use config::{AppState, DisplayConfig, GenerationConfig, ValueRange};
pub use error::{ChanVisError, ImportError, Result, ValidationError};
pub use generator::Generator;
pub use types::{Channel, ChannelColor, ChannelSet, RunState};

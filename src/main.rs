//! ChanVis - Main Entry Point
//!
//! Opens the multi-channel random number visualizer.

use chanvis_rs::{config::AppState, frontend::ChanVisApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,chanvis_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ChanVis");

    // Load preferences and the settings in force at last exit
    let app_state = AppState::load_or_default();

    // Configure eframe options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("ChanVis")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        "ChanVis",
        native_options,
        Box::new(|cc| {
            // Configure egui visuals based on user preference
            if app_state.ui_preferences.dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }

            Ok(Box::new(ChanVisApp::new(cc, app_state)?))
        }),
    );

    tracing::info!("Shutting down...");

    result
}

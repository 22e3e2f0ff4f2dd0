//! Status bar panel: generator state, counts, and the last error.

use egui::{Color32, RichText, Ui};

use crate::frontend::state::AppAction;
use crate::frontend::widgets::{StatusIndicator, ValueDisplay};
use crate::types::RunState;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub run_state: RunState,
    pub ticks: u64,
    pub channel_count: usize,
    pub total_samples: usize,
    pub interval_ms: u64,
    pub data_source: Option<&'a str>,
    pub last_error: Option<&'a str>,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let indicator = if ctx.run_state.is_running {
            StatusIndicator::running()
        } else {
            StatusIndicator::stopped()
        };
        ui.add(indicator.with_tooltip(format!("One tick every {} ms", ctx.interval_ms)));

        ui.separator();
        ui.add(ValueDisplay::new("Ticks", ctx.ticks));
        ui.separator();
        ui.add(ValueDisplay::new("Channels", ctx.channel_count));
        ui.separator();
        ui.add(ValueDisplay::new("Samples", ctx.total_samples));

        if let Some(source) = ctx.data_source {
            ui.separator();
            ui.label(RichText::new(format!("Loaded: {}", source)).small().weak());
        }

        // === Error (right-aligned) ===
        if let Some(error) = ctx.last_error {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                    actions.push(AppAction::DismissError);
                }
                ui.colored_label(Color32::LIGHT_RED, RichText::new(error).small());
            });
        }
    });

    actions
}

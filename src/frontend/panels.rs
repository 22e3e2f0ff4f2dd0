//! Panels of the main window: one row per channel and the settings table.
//!
//! Panels read state and return [`AppAction`]s; they never apply them.

use egui::{Color32, RichText, Ui};

use crate::config::{SettingsField, SettingsForm};
use crate::frontend::state::AppAction;
use crate::frontend::widgets::{BarTrack, ColorSwatch, NumericReadout};
use crate::render::ChannelView;

/// Context needed to render one channel row.
pub struct ChannelRowContext<'v, 'a> {
    pub view: &'v ChannelView<'a>,
    pub running: bool,
    pub scroll_to_end: bool,
}

/// Render a channel: title, controls, bar track and optional numeric readout.
pub fn render_channel_row(ui: &mut Ui, ctx: &ChannelRowContext<'_, '_>) -> Vec<AppAction> {
    let mut actions = Vec::new();
    let view = ctx.view;
    let color = view.color.to_color32();

    ui.horizontal(|ui| {
        ui.add(ColorSwatch::new(color));
        ui.heading(view.title());
        ui.label(RichText::new(format!("{} values", view.bars.len())).weak());

        ui.separator();

        // Every row drives the same generator and data set
        if ui
            .add_enabled(!ctx.running, egui::Button::new("▶ Start"))
            .on_hover_text("Start generating (Space)")
            .clicked()
        {
            actions.push(AppAction::Start);
        }
        if ui
            .add_enabled(ctx.running, egui::Button::new("⏹ Stop"))
            .on_hover_text("Stop generating (Space)")
            .clicked()
        {
            actions.push(AppAction::Stop);
        }
        if ui
            .button("💾 Save As")
            .on_hover_text("Export all channels to JSON (Ctrl+S)")
            .clicked()
        {
            actions.push(AppAction::SaveAs);
        }
        if ui
            .button("📂 Upload")
            .on_hover_text("Load channels from a .json file, or drop one onto the window (Ctrl+O)")
            .clicked()
        {
            actions.push(AppAction::Upload);
        }
    });

    ui.add(BarTrack::new(view).scroll_to_end(ctx.scroll_to_end));

    if let Some(values) = view.readout {
        ui.add(NumericReadout::new(view.index, values, color).scroll_to_end(ctx.scroll_to_end));
    }

    actions
}

/// Render the global settings table.
pub fn render_settings_table(
    ui: &mut Ui,
    form: &mut SettingsForm,
    show_numeric_indicator: bool,
) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.heading("Settings");
    egui::Grid::new("settings_table")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("Generation interval (ms):");
            if numeric_input(ui, &mut form.interval).changed() {
                actions.push(AppAction::CommitSetting(SettingsField::Interval));
            }
            ui.end_row();

            ui.label("Value range (min - max):");
            ui.horizontal(|ui| {
                if numeric_input(ui, &mut form.min).changed() {
                    actions.push(AppAction::CommitSetting(SettingsField::Min));
                }
                ui.label("-");
                if numeric_input(ui, &mut form.max).changed() {
                    actions.push(AppAction::CommitSetting(SettingsField::Max));
                }
            });
            ui.end_row();

            ui.label("Vertical scale factor:");
            if numeric_input(ui, &mut form.vertical_scale).changed() {
                actions.push(AppAction::CommitSetting(SettingsField::VerticalScale));
            }
            ui.end_row();

            ui.label("Show numeric indicator:");
            let mut show = show_numeric_indicator;
            if ui.checkbox(&mut show, "").changed() {
                actions.push(AppAction::SetNumericIndicator(show));
            }
            ui.end_row();
        });

    for (field, error) in &form.errors {
        ui.colored_label(
            Color32::LIGHT_RED,
            RichText::new(format!("⚠ {}: {}", field_label(*field), error)).small(),
        );
    }

    actions
}

fn numeric_input(ui: &mut Ui, buffer: &mut String) -> egui::Response {
    ui.add(egui::TextEdit::singleline(buffer).desired_width(80.0))
}

fn field_label(field: SettingsField) -> &'static str {
    match field {
        SettingsField::Interval => "Interval",
        SettingsField::Min => "Minimum",
        SettingsField::Max => "Maximum",
        SettingsField::VerticalScale => "Vertical scale",
    }
}

//! Frontend module for egui UI
//!
//! This module provides the main window using eframe/egui. The window hosts
//! the channel widget: one row per channel with its controls and bar track,
//! a settings table, and a status bar.
//!
//! # Frame Loop
//!
//! Each frame the app:
//! 1. applies finished background imports,
//! 2. turns dropped files and keyboard shortcuts into actions,
//! 3. lets the generator tick if its deadline passed,
//! 4. draws everything from current state,
//! 5. applies the actions the panels returned.
//!
//! While the generator runs, a repaint is requested for the moment the next
//! tick is due, so an idle window does not spin.
//!
//! # Main Types
//!
//! - [`ChanVisApp`] - Main application state implementing [`eframe::App`]
//! - [`WidgetState`] - Channel data, settings, and generator
//! - [`AppAction`] - Everything a panel can ask for

mod panels;
pub mod state;
pub mod status_bar;
pub mod widgets;

pub use panels::*;
pub use state::{AppAction, WidgetState};
pub use widgets::*;

use crate::config::{AppState, DisplayConfig, MAX_CHANNEL_COUNT};
use crate::error::Result;
use crate::generator::Generator;
use crate::persistence::{FileLoader, LoadMessage, DATA_FILE_EXTENSION, DEFAULT_EXPORT_FILE_NAME};
use crate::render::ChannelView;
use status_bar::{render_status_bar, StatusBarContext};
use std::path::PathBuf;
use std::time::Instant;

/// Main application state for the channel generator
pub struct ChanVisApp {
    // === Widget ===
    state: WidgetState,

    // === Persistence ===
    app_state: AppState,
    loader: FileLoader,

    // === Host controls ===
    /// Value of the channel count control, applied on change
    channel_count_input: usize,
}

impl ChanVisApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, app_state: AppState) -> Result<Self> {
        // Configure fonts and styles
        let fonts = egui::FontDefinitions::default();
        cc.egui_ctx.set_fonts(fonts);

        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.iter_mut().for_each(|(_, font_id)| {
            font_id.size *= app_state.ui_preferences.font_scale;
        });
        cc.egui_ctx.set_style(style);

        let generator = Generator::new(app_state.generation);
        Self::with_generator(app_state, generator)
    }

    /// Create the app without a window, using the given generator
    pub fn with_generator(app_state: AppState, generator: Generator) -> Result<Self> {
        let display = DisplayConfig {
            vertical_scale: app_state.vertical_scale,
            show_numeric_indicator: app_state.show_numeric_indicator,
            ..DisplayConfig::default()
        };
        let state = WidgetState::new(app_state.ui_preferences.channel_count, generator, display)?;

        Ok(Self {
            channel_count_input: state.channel_count(),
            state,
            app_state,
            loader: FileLoader::new(),
        })
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Apply every finished import in completion order
    ///
    /// Returns whether anything arrived.
    pub fn process_loader_messages(&mut self, now: Instant) -> bool {
        let messages = self.loader.drain();
        let had_messages = !messages.is_empty();

        for msg in messages {
            match msg {
                LoadMessage::Loaded { source, channels } => {
                    self.state.apply_import(source, channels, now);
                    self.channel_count_input = self.state.channel_count();
                }
                LoadMessage::Failed { source, error } => {
                    self.state.import_failed(&source, &error);
                }
            }
        }

        had_messages
    }

    pub fn handle_action(&mut self, ctx: &egui::Context, action: AppAction) {
        let now = Instant::now();
        match action {
            AppAction::Start => self.state.start(now),
            AppAction::Stop => self.state.stop(),
            AppAction::CommitSetting(field) => self.state.commit_setting(field, now),
            AppAction::SetNumericIndicator(show) => self.state.set_numeric_indicator(show),
            AppAction::SetChannelCount(count) => {
                if let Err(e) = self.state.reset_channels(count, now) {
                    tracing::warn!("Rejected channel count: {}", e);
                    self.state.last_error = Some(e.to_string());
                }
                self.channel_count_input = self.state.channel_count();
            }
            AppAction::SaveAs => {
                if let Some(path) = self.save_dialog() {
                    self.handle_action(ctx, AppAction::ExportTo(path));
                }
            }
            AppAction::Upload => {
                if let Some(path) = self.open_dialog() {
                    self.handle_action(ctx, AppAction::ImportFrom(path));
                }
            }
            AppAction::ExportTo(path) => {
                self.app_state.remember_directory(&path);
                if let Err(e) = self.state.export_to(&path) {
                    tracing::error!("Export failed: {}", e);
                    self.state.last_error = Some(format!("Failed to save channel data: {}", e));
                }
            }
            AppAction::ImportFrom(path) => {
                self.app_state.remember_directory(&path);
                let repaint = ctx.clone();
                self.loader.load_path(path, move || repaint.request_repaint());
            }
            AppAction::ImportDropped { name, bytes } => {
                let repaint = ctx.clone();
                self.loader
                    .load_bytes(name, bytes, move || repaint.request_repaint());
            }
            AppAction::DismissError => {
                self.state.last_error = None;
            }
            AppAction::SetDarkMode(dark) => {
                self.app_state.ui_preferences.dark_mode = dark;
                ctx.set_visuals(if dark {
                    egui::Visuals::dark()
                } else {
                    egui::Visuals::light()
                });
            }
        }
    }

    fn save_dialog(&self) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save Channel Data")
            .set_file_name(DEFAULT_EXPORT_FILE_NAME)
            .add_filter("JSON", &[DATA_FILE_EXTENSION]);
        if let Some(dir) = &self.app_state.last_directory {
            dialog = dialog.set_directory(dir);
        }
        dialog.save_file()
    }

    fn open_dialog(&self) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Load Channel Data")
            .add_filter("JSON", &[DATA_FILE_EXTENSION]);
        if let Some(dir) = &self.app_state.last_directory {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_file()
    }

    /// Turn the first file dropped this frame into an import
    fn collect_dropped_files(&self, ctx: &egui::Context) -> Option<AppAction> {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned())?;
        if let Some(path) = dropped.path {
            return Some(AppAction::ImportFrom(path));
        }
        dropped.bytes.map(|bytes| AppAction::ImportDropped {
            name: dropped.name,
            bytes,
        })
    }

    fn handle_keyboard_shortcuts(&self, ctx: &egui::Context) -> Vec<AppAction> {
        use egui::Key;

        let mut actions = Vec::new();
        let typing = ctx.wants_keyboard_input();

        ctx.input(|i| {
            if i.key_pressed(Key::Space) && !i.modifiers.any() && !typing {
                actions.push(if self.state.is_running() {
                    AppAction::Stop
                } else {
                    AppAction::Start
                });
            }

            if i.key_pressed(Key::S) && i.modifiers.command_only() {
                actions.push(AppAction::SaveAs);
            }

            if i.key_pressed(Key::O) && i.modifiers.command_only() {
                actions.push(AppAction::Upload);
            }
        });

        actions
    }

    /// Copy the settings in force into the persisted app state
    pub fn store_preferences(&mut self) {
        self.app_state.ui_preferences.channel_count = self.state.channel_count();
        self.app_state.generation = *self.state.generation();
        self.app_state.vertical_scale = self.state.display().vertical_scale;
        self.app_state.show_numeric_indicator = self.state.display().show_numeric_indicator;
    }

    fn render_channels(&self, ui: &mut egui::Ui) -> Vec<AppAction> {
        let mut actions = Vec::new();
        let running = self.state.is_running();

        for (index, channel) in self.state.channels().iter().enumerate() {
            let view = ChannelView::derive(index, channel, self.state.display());
            let row = ChannelRowContext {
                view: &view,
                running,
                scroll_to_end: self.state.scroll_to_end,
            };
            actions.extend(render_channel_row(ui, &row));
            ui.add_space(8.0);
        }

        actions
    }
}

/// Dim the window and show a hint while files hover over it
fn paint_drop_hint(ctx: &egui::Context, rect: egui::Rect) {
    let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
    if !hovering {
        return;
    }

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("file_drop_hint"),
    ));
    painter.rect_filled(rect, 0.0, egui::Color32::from_black_alpha(192));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Drop a .json file to load channel data",
        egui::TextStyle::Heading.resolve(&ctx.style()),
        egui::Color32::WHITE,
    );
}

impl eframe::App for ChanVisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_loader_messages(now);

        let mut actions: Vec<AppAction> = self.collect_dropped_files(ctx).into_iter().collect();
        actions.extend(self.handle_keyboard_shortcuts(ctx));

        self.state.tick(now);
        if let Some(wait) = self.state.time_until_tick(now) {
            ctx.request_repaint_after(wait);
        }

        // Menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save As...").clicked() {
                        actions.push(AppAction::SaveAs);
                        ui.close();
                    }
                    if ui.button("Upload...").clicked() {
                        actions.push(AppAction::Upload);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close();
                    }
                });

                ui.menu_button("View", |ui| {
                    let mut dark = self.app_state.ui_preferences.dark_mode;
                    if ui.checkbox(&mut dark, "Dark mode").changed() {
                        actions.push(AppAction::SetDarkMode(dark));
                        ui.close();
                    }
                });

                ui.separator();
                ui.label("Channels:");
                let response = ui.add(
                    egui::DragValue::new(&mut self.channel_count_input)
                        .range(1..=MAX_CHANNEL_COUNT)
                        .speed(0.1),
                );
                if response.changed() && self.channel_count_input != self.state.channel_count() {
                    actions.push(AppAction::SetChannelCount(self.channel_count_input));
                }
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let status = StatusBarContext {
                run_state: self.state.run_state(),
                ticks: self.state.ticks(),
                channel_count: self.state.channel_count(),
                total_samples: self.state.channels().total_samples(),
                interval_ms: self.state.generation().interval_ms,
                data_source: self.state.data_source.as_deref(),
                last_error: self.state.last_error.as_deref(),
            };
            actions.extend(render_status_bar(ui, &status));
        });

        // Settings
        egui::TopBottomPanel::bottom("settings_panel")
            .resizable(false)
            .show(ctx, |ui| {
                let show = self.state.display().show_numeric_indicator;
                actions.extend(render_settings_table(ui, &mut self.state.form, show));
                ui.add_space(4.0);
            });

        // Channels
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("channel_rows")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    actions.extend(self.render_channels(ui));
                });
            paint_drop_hint(ctx, ui.clip_rect());
        });

        self.state.scroll_to_end = false;

        for action in actions {
            self.handle_action(ctx, action);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.shutdown();
        self.store_preferences();

        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationConfig, ValueRange};
    use crate::types::ChannelSet;
    use std::time::Duration;

    fn app(channels: usize) -> ChanVisApp {
        let mut app_state = AppState::default();
        app_state.ui_preferences.channel_count = channels;
        let config = GenerationConfig {
            interval_ms: 10,
            range: ValueRange::new(0, 9).unwrap(),
        };
        ChanVisApp::with_generator(app_state, Generator::seeded(config, 11)).unwrap()
    }

    #[test]
    fn test_last_completed_import_wins() {
        let dir = tempfile::tempdir().unwrap();
        let earlier = dir.path().join("earlier.json");
        let later = dir.path().join("later.json");
        std::fs::write(&earlier, "[[1, 1]]").unwrap();
        std::fs::write(&later, "[[2], [2], [2], [2]]").unwrap();

        let mut app = app(2);
        let (done_tx, done_rx) = crossbeam_channel::unbounded();
        for path in [earlier, later] {
            let done_tx = done_tx.clone();
            app.loader.load_path(path, move || {
                let _ = done_tx.send(());
            });
            done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }

        assert!(app.process_loader_messages(Instant::now()));

        assert_eq!(
            app.state().channels(),
            &ChannelSet::from(vec![vec![2], vec![2], vec![2], vec![2]])
        );
        assert_eq!(app.channel_count_input, 4);
        assert!(app
            .state()
            .data_source
            .as_deref()
            .unwrap()
            .ends_with("later.json"));
    }

    #[test]
    fn test_failed_import_after_success_keeps_loaded_data() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, "[[5, 6]]").unwrap();
        std::fs::write(&bad, "{}").unwrap();

        let mut app = app(1);
        let (done_tx, done_rx) = crossbeam_channel::unbounded();
        for path in [good, bad] {
            let done_tx = done_tx.clone();
            app.loader.load_path(path, move || {
                let _ = done_tx.send(());
            });
            done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }

        app.process_loader_messages(Instant::now());

        assert_eq!(app.state().channels(), &ChannelSet::from(vec![vec![5, 6]]));
        assert!(app.state().last_error.as_deref().unwrap().contains("bad.json"));
    }
}

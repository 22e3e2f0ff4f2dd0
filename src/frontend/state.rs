//! Widget state and the actions that change it
//!
//! All channel data, settings and generator state live in [`WidgetState`].
//! Panels never mutate it directly; they return [`AppAction`]s and the app
//! applies them through the named transitions below (start, stop, settings
//! edits, import, export, channel reset). Every transition is a plain method
//! that takes `now` explicitly, so the whole widget can be driven from tests
//! without a window.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::{
    validate_channel_count, DisplayConfig, GenerationConfig, SettingsEdit, SettingsField,
    SettingsForm,
};
use crate::error::{ImportError, Result};
use crate::generator::{Generator, RescheduleReason};
use crate::persistence;
use crate::types::{ChannelColor, ChannelSet, RunState};

/// Actions that any panel can emit
///
/// Panels return `Vec<AppAction>` instead of mutating state directly.
#[derive(Debug, Clone)]
pub enum AppAction {
    // Generator
    /// Start producing ticks
    Start,
    /// Stop producing ticks
    Stop,

    // Settings
    /// Parse and apply the text buffer of one settings input
    CommitSetting(SettingsField),
    /// Show or hide the numeric readout
    SetNumericIndicator(bool),
    /// Host-side channel count change
    SetChannelCount(usize),

    // Files
    /// Ask for a destination and export
    SaveAs,
    /// Ask for a file and import
    Upload,
    /// Export to a known path
    ExportTo(PathBuf),
    /// Import from a known path
    ImportFrom(PathBuf),
    /// Import a dropped file that arrived as bytes
    ImportDropped { name: String, bytes: Arc<[u8]> },

    // Shell
    /// Dismiss the error shown in the status bar
    DismissError,
    /// Switch between dark and light visuals
    SetDarkMode(bool),
}

/// Everything the widget owns
pub struct WidgetState<R = StdRng> {
    channels: ChannelSet,
    generator: Generator<R>,
    display: DisplayConfig,

    /// Text buffers and inline errors of the settings table
    pub form: SettingsForm,

    /// Set by a tick; the channel tracks reveal their last bar and clear it
    pub scroll_to_end: bool,

    /// Last failure, shown in the status bar until dismissed
    pub last_error: Option<String>,

    /// Where the current data came from, if it was imported
    pub data_source: Option<String>,
}

impl<R: Rng> WidgetState<R> {
    /// Create the widget with `channel_count` empty channels and a fresh palette
    pub fn new(
        channel_count: usize,
        mut generator: Generator<R>,
        mut display: DisplayConfig,
    ) -> Result<Self> {
        let channel_count = validate_channel_count(channel_count)?;
        display.channel_colors = ChannelColor::palette(generator.rng_mut(), channel_count);
        let form = SettingsForm::from_config(generator.config(), &display);

        Ok(Self {
            channels: ChannelSet::with_count(channel_count),
            generator,
            display,
            form,
            scroll_to_end: false,
            last_error: None,
            data_source: None,
        })
    }

    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn generation(&self) -> &GenerationConfig {
        self.generator.config()
    }

    pub fn run_state(&self) -> RunState {
        self.generator.run_state()
    }

    pub fn is_running(&self) -> bool {
        self.generator.is_running()
    }

    pub fn ticks(&self) -> u64 {
        self.generator.ticks()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    // ==================== Generator ====================

    pub fn start(&mut self, now: Instant) {
        self.generator.start(now);
    }

    pub fn stop(&mut self) {
        self.generator.stop();
    }

    /// Run the generator for this frame; returns whether a tick happened
    pub fn tick(&mut self, now: Instant) -> bool {
        let ticked = self.generator.poll(&mut self.channels, now);
        if ticked {
            self.scroll_to_end = true;
        }
        ticked
    }

    /// How long the UI may sleep before the next tick is due
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.generator.time_until_tick(now)
    }

    // ==================== Settings ====================

    /// Parse one settings input and apply it if valid
    pub fn commit_setting(&mut self, field: SettingsField, now: Instant) {
        let current = *self.generator.config();
        if let Some(edit) = self.form.commit(field, &current) {
            self.apply_edit(edit, now);
        }
    }

    /// Apply an already validated settings edit
    pub fn apply_edit(&mut self, edit: SettingsEdit, now: Instant) {
        match edit {
            SettingsEdit::Interval(ms) => {
                tracing::info!("Tick interval set to {} ms", ms);
                self.generator.set_interval(ms, now);
            }
            SettingsEdit::Range(range) => {
                tracing::info!("Value range set to {}", range);
                self.generator.set_range(range, now);
            }
            SettingsEdit::VerticalScale(scale) => {
                tracing::info!("Vertical scale set to {}", scale);
                self.display.vertical_scale = scale;
            }
        }
    }

    pub fn set_numeric_indicator(&mut self, show: bool) {
        self.display.show_numeric_indicator = show;
    }

    /// Replace every channel with `count` empty ones and a new palette
    pub fn reset_channels(&mut self, count: usize, now: Instant) -> Result<()> {
        let count = validate_channel_count(count)?;
        tracing::info!("Resetting to {} channels", count);

        self.channels = ChannelSet::with_count(count);
        self.display.channel_colors = ChannelColor::palette(self.generator.rng_mut(), count);
        self.data_source = None;
        self.generator.reschedule(now, RescheduleReason::ChannelsReset);
        Ok(())
    }

    // ==================== Files ====================

    /// Write the current channel data to `path`
    pub fn export_to(&self, path: &Path) -> Result<()> {
        persistence::export_to_path(&self.channels, path)
    }

    /// Replace the channel data with a successfully imported set
    ///
    /// A set with a different channel count resizes the widget; colors of
    /// channels that survive are kept and new channels get random ones.
    pub fn apply_import(&mut self, source: String, channels: ChannelSet, now: Instant) {
        let count = channels.len();
        if count != self.channels.len() {
            tracing::info!(
                "Imported file has {} channels, resizing from {}",
                count,
                self.channels.len()
            );
            let colors = &mut self.display.channel_colors;
            colors.truncate(count);
            while colors.len() < count {
                colors.push(ChannelColor::random(self.generator.rng_mut()));
            }
        }

        tracing::info!(
            "Imported {} channels ({} samples) from {}",
            count,
            channels.total_samples(),
            source
        );
        self.channels = channels;
        self.data_source = Some(source);
        self.last_error = None;
        self.scroll_to_end = true;
        self.generator.reschedule(now, RescheduleReason::DataChanged);
    }

    /// Record a failed import; the channel data is left as it was
    pub fn import_failed(&mut self, source: &str, error: &ImportError) {
        tracing::warn!("Failed to load channel data from {}: {}", source, error);
        self.last_error = Some(format!("Could not load {}: {}", source, error));
    }

    /// Tear down: no tick may fire after this
    pub fn shutdown(&mut self) {
        self.generator.stop();
    }
}

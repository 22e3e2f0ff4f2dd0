//! Test data builders for creating test objects

use chanvis_rs::config::{AppState, DisplayConfig, GenerationConfig, ValueRange};
use chanvis_rs::frontend::{ChanVisApp, WidgetState};
use chanvis_rs::Generator;

/// Builder for a seeded widget that runs without a window
pub struct WidgetBuilder {
    channels: usize,
    interval_ms: u64,
    range: (i64, i64),
    vertical_scale: f32,
    show_numeric_indicator: bool,
    seed: u64,
}

impl WidgetBuilder {
    pub fn new() -> Self {
        Self {
            channels: 3,
            interval_ms: 10,
            range: (0, 10),
            vertical_scale: 10.0,
            show_numeric_indicator: true,
            seed: 7,
        }
    }

    pub fn channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    pub fn interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn vertical_scale(mut self, scale: f32) -> Self {
        self.vertical_scale = scale;
        self
    }

    pub fn show_numeric_indicator(mut self, show: bool) -> Self {
        self.show_numeric_indicator = show;
        self
    }

    fn generator(&self) -> Generator {
        let config = GenerationConfig {
            interval_ms: self.interval_ms,
            range: ValueRange::new(self.range.0, self.range.1).unwrap(),
        };
        Generator::seeded(config, self.seed)
    }

    pub fn build(self) -> WidgetState {
        let display = DisplayConfig {
            vertical_scale: self.vertical_scale,
            show_numeric_indicator: self.show_numeric_indicator,
            ..DisplayConfig::default()
        };
        WidgetState::new(self.channels, self.generator(), display).unwrap()
    }

    pub fn build_app(self) -> ChanVisApp {
        let mut app_state = AppState::default();
        app_state.ui_preferences.channel_count = self.channels;
        app_state.vertical_scale = self.vertical_scale;
        app_state.show_numeric_indicator = self.show_numeric_indicator;
        let generator = self.generator();
        ChanVisApp::with_generator(app_state, generator).unwrap()
    }
}

impl Default for WidgetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_builder() {
        let state = WidgetBuilder::new().channels(2).range(5, 5).build();
        assert_eq!(state.channel_count(), 2);
        assert_eq!(state.generation().range, ValueRange::new(5, 5).unwrap());
        assert!(!state.is_running());
    }
}

//! Runtime settings that can be modified during application execution
//!
//! This module contains the generation and display settings the user edits
//! through the settings table, and the parsing that guards every edit.
//!
//! # Main Types
//!
//! - [`GenerationConfig`] - Tick interval and value range
//! - [`ValueRange`] - Inclusive `[min, max]` range, never inverted
//! - [`DisplayConfig`] - Vertical scale, numeric readout toggle, channel colors
//! - [`SettingsForm`] - Text buffers behind the settings inputs
//!
//! # Validation
//!
//! Edits are parsed where they enter the application. A rejected edit leaves
//! the previous value in force and yields a [`ValidationError`] that the
//! settings table shows next to the offending input.

use crate::error::ValidationError;
use crate::types::ChannelColor;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default tick interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Default lower bound of generated values
pub const DEFAULT_MIN_VALUE: i64 = 0;

/// Default upper bound of generated values
pub const DEFAULT_MAX_VALUE: i64 = 10;

/// Default bar length per unit of value
pub const DEFAULT_VERTICAL_SCALE: f32 = 10.0;

/// Inclusive range of generated values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct ValueRange {
    min: i64,
    max: i64,
}

#[derive(Serialize, Deserialize)]
struct RawRange {
    min: i64,
    max: i64,
}

impl TryFrom<RawRange> for ValueRange {
    type Error = ValidationError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        ValueRange::new(raw.min, raw.max)
    }
}

impl From<ValueRange> for RawRange {
    fn from(range: ValueRange) -> Self {
        RawRange {
            min: range.min,
            max: range.max,
        }
    }
}

impl ValueRange {
    /// Create a range, rejecting `min > max`
    pub fn new(min: i64, max: i64) -> Result<Self, ValidationError> {
        if min > max {
            return Err(ValidationError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Replace the lower bound
    pub fn with_min(self, min: i64) -> Result<Self, ValidationError> {
        Self::new(min, self.max)
    }

    /// Replace the upper bound
    pub fn with_max(self, max: i64) -> Result<Self, ValidationError> {
        Self::new(self.min, max)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_VALUE,
            max: DEFAULT_MAX_VALUE,
        }
    }
}

impl std::fmt::Display for ValueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// How often and from which range values are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Milliseconds between ticks, always at least 1
    #[serde(deserialize_with = "deserialize_interval")]
    pub interval_ms: u64,

    /// Range every tick draws from
    pub range: ValueRange,
}

fn deserialize_interval<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = u64::deserialize(deserializer)?;
    if value == 0 {
        return Err(serde::de::Error::custom("interval must be positive"));
    }
    Ok(value)
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            range: ValueRange::default(),
        }
    }
}

impl GenerationConfig {
    /// Tick interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// How channel data is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Bar length per unit of value, always positive and finite
    pub vertical_scale: f32,

    /// Whether the coloured number row is shown under each bar track
    pub show_numeric_indicator: bool,

    /// One color per channel, regenerated when the channel count changes
    pub channel_colors: Vec<ChannelColor>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            vertical_scale: DEFAULT_VERTICAL_SCALE,
            show_numeric_indicator: true,
            channel_colors: Vec::new(),
        }
    }
}

impl DisplayConfig {
    /// Color of a channel, gray if the palette is shorter than the channel list
    pub fn color_of(&self, channel: usize) -> ChannelColor {
        self.channel_colors
            .get(channel)
            .copied()
            .unwrap_or(ChannelColor::rgb(128, 128, 128))
    }
}

// ==================== Parsing ====================

/// Parse a tick interval in milliseconds
pub fn parse_interval(input: &str) -> Result<u64, ValidationError> {
    match input.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ValidationError::Interval(input.to_string())),
    }
}

/// Parse one bound of the value range
pub fn parse_bound(field: &'static str, input: &str) -> Result<i64, ValidationError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::Bound {
            field,
            input: input.to_string(),
        })
}

/// Parse a vertical scale factor
pub fn parse_scale(input: &str) -> Result<f32, ValidationError> {
    match input.trim().parse::<f32>() {
        Ok(scale) if scale.is_finite() && scale > 0.0 => Ok(scale),
        _ => Err(ValidationError::Scale(input.to_string())),
    }
}

/// Validate a host-supplied channel count
pub fn validate_channel_count(count: usize) -> Result<usize, ValidationError> {
    if count == 0 {
        return Err(ValidationError::ChannelCount(count));
    }
    Ok(count)
}

// ==================== Settings Form ====================

/// A single accepted edit from the settings table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsEdit {
    Interval(u64),
    Range(ValueRange),
    VerticalScale(f32),
}

/// Which input a validation error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    Interval,
    Min,
    Max,
    VerticalScale,
}

/// Text buffers behind the numeric inputs of the settings table
///
/// The buffers hold whatever the user typed; only parsed, valid values
/// leave this struct as a [`SettingsEdit`].
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub interval: String,
    pub min: String,
    pub max: String,
    pub vertical_scale: String,
    pub errors: Vec<(SettingsField, ValidationError)>,
}

impl SettingsForm {
    /// Fill the buffers from the settings in force
    pub fn from_config(generation: &GenerationConfig, display: &DisplayConfig) -> Self {
        Self {
            interval: generation.interval_ms.to_string(),
            min: generation.range.min().to_string(),
            max: generation.range.max().to_string(),
            vertical_scale: display.vertical_scale.to_string(),
            errors: Vec::new(),
        }
    }

    /// Error currently attached to a field
    pub fn error_for(&self, field: SettingsField) -> Option<&ValidationError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, e)| e)
    }

    fn set_error(&mut self, field: SettingsField, result: Result<(), ValidationError>) {
        self.errors.retain(|(f, _)| *f != field);
        if let Err(e) = result {
            self.errors.push((field, e));
        }
    }

    /// Parse the buffer of `field` against the settings in force
    pub fn commit(
        &mut self,
        field: SettingsField,
        current: &GenerationConfig,
    ) -> Option<SettingsEdit> {
        let result = match field {
            SettingsField::Interval => parse_interval(&self.interval).map(SettingsEdit::Interval),
            SettingsField::Min | SettingsField::Max => {
                self.commit_range(field, current).map(SettingsEdit::Range)
            }
            SettingsField::VerticalScale => {
                parse_scale(&self.vertical_scale).map(SettingsEdit::VerticalScale)
            }
        };

        match result {
            Ok(edit) => {
                self.set_error(field, Ok(()));
                Some(edit)
            }
            Err(e) => {
                tracing::warn!("Rejected {:?} edit: {}", field, e);
                self.set_error(field, Err(e));
                None
            }
        }
    }

    /// Resolve a bound edit against both range buffers
    ///
    /// The pair of buffers is applied together when it forms a valid range.
    /// Otherwise the edited bound is applied alone against the range in force
    /// and the other bound keeps an error describing why its text is not in
    /// force.
    fn commit_range(
        &mut self,
        field: SettingsField,
        current: &GenerationConfig,
    ) -> Result<ValueRange, ValidationError> {
        let min = parse_bound("minimum", &self.min);
        let max = parse_bound("maximum", &self.max);
        let (edited, other_field) = match field {
            SettingsField::Min => (min.clone()?, SettingsField::Max),
            _ => (max.clone()?, SettingsField::Min),
        };

        if let (Ok(min), Ok(max)) = (&min, &max) {
            if let Ok(range) = ValueRange::new(*min, *max) {
                self.set_error(other_field, Ok(()));
                return Ok(range);
            }
        }

        let range = match field {
            SettingsField::Min => current.range.with_min(edited)?,
            _ => current.range.with_max(edited)?,
        };

        // The other buffer is not in force
        let other_error = match (min, max) {
            (Err(e), _) | (_, Err(e)) => e,
            (Ok(min), Ok(max)) => ValidationError::InvertedRange { min, max },
        };
        self.set_error(other_field, Err(other_error));
        Ok(range)
    }
}

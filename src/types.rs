//! Core data types for ChanVis
//!
//! This module contains the fundamental data structures used throughout
//! the application for representing channels and their generated values.
//!
//! # Main Types
//!
//! - [`Channel`] - Append-only history of generated integers for one channel
//! - [`ChannelSet`] - Index-aligned collection of channels (channel N at position N)
//! - [`ChannelColor`] - Per-channel display color
//! - [`RunState`] - Whether the generator is running and whether it ever ran
//!
//! # Serialization
//!
//! `Channel` and `ChannelSet` serialise transparently, so a set of two
//! channels becomes `[[1, 2], [3]]` on disk.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The value history of a single channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Channel {
    values: Vec<i64>,
}

impl Channel {
    /// Create an empty channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one generated value
    pub fn push(&mut self, value: i64) {
        self.values.push(value);
    }

    /// All values in generation order
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Most recent value, if any
    pub fn last(&self) -> Option<i64> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<i64>> for Channel {
    fn from(values: Vec<i64>) -> Self {
        Self { values }
    }
}

/// An ordered collection of channels, one per channel index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelSet {
    channels: Vec<Channel>,
}

impl ChannelSet {
    /// Create `count` empty channels
    pub fn with_count(count: usize) -> Self {
        Self {
            channels: vec![Channel::new(); count],
        }
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Get a channel by index
    pub fn get(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Channel> {
        self.channels.iter_mut()
    }

    /// Total number of values across all channels
    pub fn total_samples(&self) -> usize {
        self.channels.iter().map(Channel::len).sum()
    }

    /// Drop every value while keeping the channel count
    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            *channel = Channel::new();
        }
    }
}

impl From<Vec<Vec<i64>>> for ChannelSet {
    fn from(channels: Vec<Vec<i64>>) -> Self {
        Self {
            channels: channels.into_iter().map(Channel::from).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ChannelSet {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}

/// Display color of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ChannelColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pick a uniformly random opaque color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rgb(rng.gen(), rng.gen(), rng.gen())
    }

    /// Generate one random color per channel
    pub fn palette<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Self> {
        (0..count).map(|_| Self::random(rng)).collect()
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgb(self.r, self.g, self.b)
    }
}

/// Run flags of the generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    /// Whether ticks are currently being produced
    pub is_running: bool,

    /// Set by the first start and never cleared. Nothing reads it yet.
    pub has_started_before: bool,
}

impl RunState {
    pub fn start(&mut self) {
        if !self.has_started_before {
            self.has_started_before = true;
        }
        self.is_running = true;
    }

    pub fn stop(&mut self) {
        self.is_running = false;
    }
}

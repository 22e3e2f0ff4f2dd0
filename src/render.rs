//! Bar layout for channel tracks
//!
//! Everything the channel widgets draw is derived here from the channel
//! data and the display settings, with no state of its own. The egui
//! widgets in [`crate::frontend::widgets`] only paint what this module
//! computes, so the geometry can be checked without a UI.

use crate::config::DisplayConfig;
use crate::types::{Channel, ChannelColor};

/// Width of one bar in points
pub const BAR_WIDTH: f32 = 20.0;

/// Gap on each side of a bar in points
pub const BAR_MARGIN: f32 = 2.0;

/// Smallest height of a bar track, so empty channels stay visible
pub const MIN_TRACK_HEIGHT: f32 = 40.0;

/// Horizontal space taken by one bar including its margins
pub const BAR_PITCH: f32 = BAR_WIDTH + 2.0 * BAR_MARGIN;

/// Length of the bar for `value` under `scale`
pub fn bar_length(value: i64, scale: f32) -> f32 {
    value as f32 * scale
}

/// Placement of one bar within its track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    /// Position in the channel history
    pub index: usize,
    /// Value the bar stands for
    pub value: i64,
    /// Left edge relative to the track origin
    pub x: f32,
    /// Signed length, `value * vertical_scale`
    pub length: f32,
}

impl BarGeometry {
    /// Height actually painted; negative lengths collapse to nothing
    pub fn drawn_height(&self) -> f32 {
        self.length.max(0.0)
    }
}

/// Everything needed to draw one channel row
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelView<'a> {
    pub index: usize,
    pub color: ChannelColor,
    pub bars: Vec<BarGeometry>,
    /// Values for the numeric readout, `None` when the readout is hidden
    pub readout: Option<&'a [i64]>,
}

impl<'a> ChannelView<'a> {
    /// Lay out channel `index` under the current display settings
    pub fn derive(index: usize, channel: &'a Channel, display: &DisplayConfig) -> Self {
        let bars = channel
            .values()
            .iter()
            .enumerate()
            .map(|(i, &value)| BarGeometry {
                index: i,
                value,
                x: i as f32 * BAR_PITCH + BAR_MARGIN,
                length: bar_length(value, display.vertical_scale),
            })
            .collect();

        Self {
            index,
            color: display.color_of(index),
            bars,
            readout: display
                .show_numeric_indicator
                .then_some(channel.values()),
        }
    }

    /// Human-facing channel title, numbered from 1
    pub fn title(&self) -> String {
        format!("Channel {}", self.index + 1)
    }

    /// Total width of the bar track content
    pub fn content_width(&self) -> f32 {
        self.bars.len() as f32 * BAR_PITCH
    }

    /// Height of the bar track, tall enough for the longest bar
    pub fn track_height(&self) -> f32 {
        let tallest = self
            .bars
            .iter()
            .map(BarGeometry::drawn_height)
            .fold(0.0_f32, f32::max);
        (tallest + 2.0 * BAR_MARGIN).max(MIN_TRACK_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(scale: f32, show: bool) -> DisplayConfig {
        DisplayConfig {
            vertical_scale: scale,
            show_numeric_indicator: show,
            channel_colors: vec![ChannelColor::rgb(255, 0, 0), ChannelColor::rgb(0, 0, 255)],
        }
    }

    #[test]
    fn test_bar_length_scales_value() {
        assert_eq!(bar_length(7, 2.0), 14.0);
        assert_eq!(bar_length(0, 10.0), 0.0);
        assert_eq!(bar_length(-3, 2.0), -6.0);
    }

    #[test]
    fn test_derive_lays_out_bars_left_to_right() {
        let channel = Channel::from(vec![7, 1, 3]);
        let view = ChannelView::derive(1, &channel, &display(2.0, true));

        assert_eq!(view.color, ChannelColor::rgb(0, 0, 255));
        assert_eq!(view.bars.len(), 3);
        assert_eq!(view.bars[0].length, 14.0);
        assert_eq!(view.bars[0].x, BAR_MARGIN);
        assert_eq!(view.bars[2].x, 2.0 * BAR_PITCH + BAR_MARGIN);
        assert_eq!(view.content_width(), 3.0 * BAR_PITCH);
        assert_eq!(view.title(), "Channel 2");
    }

    #[test]
    fn test_negative_values_collapse() {
        let channel = Channel::from(vec![-5]);
        let view = ChannelView::derive(0, &channel, &display(1.0, true));
        assert_eq!(view.bars[0].length, -5.0);
        assert_eq!(view.bars[0].drawn_height(), 0.0);
    }

    #[test]
    fn test_readout_follows_toggle() {
        let channel = Channel::from(vec![4, 8]);

        let hidden = ChannelView::derive(0, &channel, &display(1.0, false));
        assert_eq!(hidden.readout, None);
        assert_eq!(hidden.bars.len(), 2);

        let shown = ChannelView::derive(0, &channel, &display(1.0, true));
        assert_eq!(shown.readout, Some(&[4, 8][..]));
    }

    #[test]
    fn test_track_height_fits_tallest_bar() {
        let empty = Channel::new();
        assert_eq!(
            ChannelView::derive(0, &empty, &display(10.0, true)).track_height(),
            MIN_TRACK_HEIGHT
        );

        let tall = Channel::from(vec![1, 30]);
        let view = ChannelView::derive(0, &tall, &display(10.0, true));
        assert_eq!(view.track_height(), 300.0 + 2.0 * BAR_MARGIN);
    }
}

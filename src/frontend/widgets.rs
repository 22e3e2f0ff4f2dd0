//! Custom widgets for the ChanVis UI
//!
//! These widgets only paint; what they paint is computed in
//! [`crate::render`].
//!
//! # Widgets
//!
//! - [`StatusIndicator`] - Colored status dot with label (running, stopped)
//! - [`ValueDisplay`] - Formatted value with label
//! - [`ColorSwatch`] - Small colored square for a channel's color
//! - [`BarTrack`] - Horizontally scrolling bar chart of one channel
//! - [`NumericReadout`] - Row of colored numbers under a bar track

use egui::{Align, Color32, Rect, Response, RichText, Sense, Ui, Widget};

use crate::render::{ChannelView, BAR_MARGIN, BAR_PITCH, BAR_WIDTH};

/// Background behind the bars, light gray in both themes
pub const TRACK_BACKGROUND: Color32 = Color32::from_rgb(211, 211, 211);

/// A widget that displays a colored status indicator
pub struct StatusIndicator {
    color: Color32,
    label: String,
    tooltip: Option<String>,
}

impl StatusIndicator {
    /// Create a new status indicator with the given color and label
    pub fn new(color: Color32, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
            tooltip: None,
        }
    }

    pub fn running() -> Self {
        Self::new(Color32::GREEN, "Running")
    }

    pub fn stopped() -> Self {
        Self::new(Color32::GRAY, "Stopped")
    }

    /// Add a tooltip to the indicator
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl Widget for StatusIndicator {
    fn ui(self, ui: &mut Ui) -> Response {
        let response = ui.horizontal(|ui| {
            ui.colored_label(self.color, "●");
            ui.label(&self.label);
        });

        let response = response.response;

        if let Some(tooltip) = self.tooltip {
            response.on_hover_text(tooltip)
        } else {
            response
        }
    }
}

/// A widget for displaying a value with a label
pub struct ValueDisplay {
    label: String,
    value: String,
}

impl ValueDisplay {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

impl Widget for ValueDisplay {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{}:", self.label)).small());
            ui.label(RichText::new(self.value).small().strong());
        })
        .response
    }
}

/// Side length of a channel's color swatch
const SWATCH_SIZE: f32 = 16.0;

/// A color swatch widget
pub struct ColorSwatch {
    color: Color32,
}

impl ColorSwatch {
    pub fn new(color: Color32) -> Self {
        Self { color }
    }
}

impl Widget for ColorSwatch {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), Sense::hover());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(rect, 2.0, self.color);
            ui.painter().rect_stroke(
                rect,
                2.0,
                egui::Stroke::new(1.0, Color32::GRAY),
                egui::StrokeKind::Outside,
            );
        }

        response
    }
}

/// Bar chart of one channel inside its own horizontal scroll area
pub struct BarTrack<'v, 'a> {
    view: &'v ChannelView<'a>,
    scroll_to_end: bool,
}

impl<'v, 'a> BarTrack<'v, 'a> {
    pub fn new(view: &'v ChannelView<'a>) -> Self {
        Self {
            view,
            scroll_to_end: false,
        }
    }

    /// Reveal the most recent bar this frame
    pub fn scroll_to_end(mut self, scroll: bool) -> Self {
        self.scroll_to_end = scroll;
        self
    }
}

impl Widget for BarTrack<'_, '_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let view = self.view;
        egui::ScrollArea::horizontal()
            .id_salt(("bar_track", view.index))
            .auto_shrink([false, true])
            .show(ui, |ui| {
                let size = egui::vec2(
                    view.content_width().max(ui.available_width()),
                    view.track_height(),
                );
                let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 0.0, TRACK_BACKGROUND);

                let color = view.color.to_color32();
                let baseline = rect.bottom() - BAR_MARGIN;
                let mut last_bar = None;
                for bar in &view.bars {
                    let left = rect.left() + bar.x;
                    let bar_rect = Rect::from_min_max(
                        egui::pos2(left, baseline - bar.drawn_height()),
                        egui::pos2(left + BAR_WIDTH, baseline),
                    );
                    if ui.is_rect_visible(bar_rect) {
                        painter.rect_filled(bar_rect, 0.0, color);
                    }
                    last_bar = Some(bar_rect);
                }

                if self.scroll_to_end {
                    if let Some(last) = last_bar {
                        ui.scroll_to_rect(last, Some(Align::Max));
                    }
                }

                let hovered = response
                    .hover_pos()
                    .map(|pos| ((pos.x - rect.left()) / BAR_PITCH).floor())
                    .filter(|slot| *slot >= 0.0)
                    .and_then(|slot| view.bars.get(slot as usize));
                match hovered {
                    Some(bar) => response
                        .on_hover_text_at_pointer(format!("#{}: {}", bar.index + 1, bar.value)),
                    None => response,
                }
            })
            .inner
    }
}

/// Colored numbers for one channel, scrolled together with new data
pub struct NumericReadout<'a> {
    index: usize,
    values: &'a [i64],
    color: Color32,
    scroll_to_end: bool,
}

impl<'a> NumericReadout<'a> {
    pub fn new(index: usize, values: &'a [i64], color: Color32) -> Self {
        Self {
            index,
            values,
            color,
            scroll_to_end: false,
        }
    }

    pub fn scroll_to_end(mut self, scroll: bool) -> Self {
        self.scroll_to_end = scroll;
        self
    }
}

impl Widget for NumericReadout<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        egui::ScrollArea::horizontal()
            .id_salt(("numeric_readout", self.index))
            .auto_shrink([false, true])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 6.0;
                    let mut last = None;
                    for value in self.values {
                        last = Some(ui.label(
                            RichText::new(value.to_string())
                                .monospace()
                                .color(self.color),
                        ));
                    }
                    if self.scroll_to_end {
                        if let Some(last) = last {
                            last.scroll_to_me(Some(Align::Max));
                        }
                    }
                })
                .response
            })
            .inner
    }
}

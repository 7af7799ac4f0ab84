use crate::config::LabelSettings;
use ringdraw::{Point, Surface, SurfaceError, TextStyle};
use std::fmt;

/// Places the total score in the middle of the gauge.
pub trait LabelStrategy: fmt::Debug + Send + Sync {
    fn render_label(
        &self,
        surface: &mut dyn Surface,
        text: &str,
        position: Point,
        style: &TextStyle,
        is_redraw: bool,
    ) -> Result<(), SurfaceError>;
}

/// Text drawn on the vector surface itself.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VectorTextLabel {
    pub redraw_offset: f64,
}

impl LabelStrategy for VectorTextLabel {
    fn render_label(
        &self,
        surface: &mut dyn Surface,
        text: &str,
        position: Point,
        style: &TextStyle,
        is_redraw: bool,
    ) -> Result<(), SurfaceError> {
        let position = if is_redraw {
            position.offset(0.0, self.redraw_offset)
        } else {
            position
        };
        surface.text(position, text, style)
    }
}

/// Plain markup beside the vector surface. Positioned by the host's layout,
/// so redraws need no correction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkupLabel;

impl LabelStrategy for MarkupLabel {
    fn render_label(
        &self,
        surface: &mut dyn Surface,
        text: &str,
        position: Point,
        style: &TextStyle,
        _is_redraw: bool,
    ) -> Result<(), SurfaceError> {
        surface.markup(position, text, style)
    }
}

pub fn strategy_for(mobile_like: bool, settings: &LabelSettings) -> Box<dyn LabelStrategy> {
    if mobile_like {
        Box::new(MarkupLabel)
    } else {
        Box::new(VectorTextLabel {
            redraw_offset: settings.redraw_offset,
        })
    }
}

use crate::label::LabelStrategy;
use crate::layout::{GaugeLayout, RingSpec, TickSpec, TrackSpec};
use crate::theme::ColorTable;
use ringdraw::{Point, Stroke, Surface, SurfaceError};

struct RingRenderer<'a> {
    ring: &'a RingSpec,
    center: Point,
    colors: &'a ColorTable,
}

impl<'a> RingRenderer<'a> {
    fn new(ring: &'a RingSpec, center: Point, colors: &'a ColorTable) -> Self {
        Self {
            ring,
            center,
            colors,
        }
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        self.draw_arc(surface)?;
        self.draw_glow(surface)
    }

    fn draw_glow(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        let Some(path) = self.ring.glow_path(self.center) else {
            return Ok(());
        };
        let stroke = Stroke::new(self.colors.glow, self.ring.stroke_width)
            .with_opacity(self.colors.glow_opacity);
        surface.stroke_arc(&path, &stroke)
    }

    fn draw_arc(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        let path = self.ring.path(self.center);
        if path.is_degenerate() {
            log::warn!("'{}' ring sweeps nothing", self.ring.category);
        }
        let stroke = Stroke::new(self.ring.stroke_color, self.ring.stroke_width);
        surface.stroke_arc(&path, &stroke)
    }
}

/// Emits one full gauge: track, tick marks, category rings, then the label.
pub fn draw(
    surface: &mut dyn Surface,
    layout: &GaugeLayout,
    colors: &ColorTable,
    label: &dyn LabelStrategy,
    is_redraw: bool,
) -> Result<(), SurfaceError> {
    draw_track(surface, &layout.track, layout.center)?;
    for ticks in &layout.ticks {
        draw_ticks(surface, ticks)?;
    }

    for ring in &layout.rings {
        RingRenderer::new(ring, layout.center, colors).draw(surface)?;
    }

    label.render_label(
        surface,
        &layout.label.text(),
        layout.label.position,
        &layout.label.style,
        is_redraw,
    )
}

fn draw_track(
    surface: &mut dyn Surface,
    track: &TrackSpec,
    center: Point,
) -> Result<(), SurfaceError> {
    surface.stroke_arc(&track.path(center), &Stroke::new(track.color, track.width))
}

fn draw_ticks(surface: &mut dyn Surface, ticks: &TickSpec) -> Result<(), SurfaceError> {
    ticks
        .ring
        .iter()
        .try_for_each(|point| surface.fill_dot(point, ticks.dot_radius, ticks.color))
}

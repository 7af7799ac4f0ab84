//! Renders a [`GaugeLayout`] straight onto a cairo context, for hosts that
//! draw with cairo instead of placing markup in a document.

use crate::layout::{GaugeLayout, LabelSpec, RingSpec, TickSpec, TrackSpec};
use crate::theme::ColorTable;
use cairo::{Context, Format, ImageSurface};
use ringdraw::{Color, PathDescription, Point};
use std::f64::consts::{FRAC_PI_2, PI};
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CairoRenderError {
    #[error(transparent)]
    Cairo(#[from] cairo::Error),
    #[error(transparent)]
    Io(#[from] cairo::IoError),
}

fn set_source(cr: &Context, color: Color, alpha: f64) {
    let (r, g, b) = color.components_f64();
    cr.set_source_rgba(r, g, b, alpha);
}

// cairo measures from 3 o'clock; rings start at 12
fn stroke_arc(
    cr: &Context,
    path: &PathDescription,
    width: f64,
    color: Color,
    alpha: f64,
) -> Result<(), cairo::Error> {
    if path.is_degenerate() {
        return Ok(());
    }
    let start = -FRAC_PI_2;
    set_source(cr, color, alpha);
    cr.set_line_width(width);
    cr.new_path();
    cr.arc(
        path.center.x,
        path.center.y,
        path.radius,
        start,
        start + path.sweep_degrees.to_radians(),
    );
    cr.stroke()
}

fn draw_track(cr: &Context, track: &TrackSpec, center: Point) -> Result<(), cairo::Error> {
    stroke_arc(cr, &track.path(center), track.width, track.color, 1.0)
}

fn draw_ticks(cr: &Context, ticks: &TickSpec) -> Result<(), cairo::Error> {
    set_source(cr, ticks.color, 1.0);
    for point in &ticks.ring {
        cr.new_path();
        cr.arc(point.x, point.y, ticks.dot_radius, 0.0, 2.0 * PI);
        cr.fill()?;
    }
    Ok(())
}

fn draw_ring(
    cr: &Context,
    ring: &RingSpec,
    center: Point,
    colors: &ColorTable,
) -> Result<(), cairo::Error> {
    stroke_arc(cr, &ring.path(center), ring.stroke_width, ring.stroke_color, 1.0)?;
    match ring.glow_path(center) {
        Some(glow) => stroke_arc(cr, &glow, ring.stroke_width, colors.glow, colors.glow_opacity),
        None => Ok(()),
    }
}

fn draw_label(cr: &Context, label: &LabelSpec) -> Result<(), cairo::Error> {
    let text = label.text();
    set_source(cr, label.style.color, 1.0);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(label.style.font_size);
    if let Ok(ext) = cr.text_extents(&text) {
        cr.move_to(
            label.position.x - ext.width() / 2.0 - ext.x_bearing(),
            label.position.y + ext.height() / 2.0,
        );
        cr.show_text(&text)?;
    }
    Ok(())
}

pub fn draw(cr: &Context, layout: &GaugeLayout, colors: &ColorTable) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.set_line_cap(cairo::LineCap::Butt);

    draw_track(cr, &layout.track, layout.center)?;
    for ticks in &layout.ticks {
        draw_ticks(cr, ticks)?;
    }
    for ring in &layout.rings {
        draw_ring(cr, ring, layout.center, colors)?;
    }
    draw_label(cr, &layout.label)?;

    cr.restore()
}

/// Rasterises `layout` and writes it as PNG.
pub fn write_png(
    layout: &GaugeLayout,
    colors: &ColorTable,
    out: &mut impl Write,
) -> Result<(), CairoRenderError> {
    let side = layout.size.ceil() as i32;
    let surface = ImageSurface::create(Format::ARgb32, side, side)?;
    {
        let cr = Context::new(&surface)?;
        draw(&cr, layout, colors)?;
    }
    surface.write_to_png(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArcStyleConfig, CanvasConfig};
    use crate::layout::{CategoryOrder, ScorePayload};

    #[test]
    fn test_png_output() {
        let layout = GaugeLayout::build(
            &CanvasConfig::new("gauge").with_size(200.0),
            &crate::scale::resolve(&ArcStyleConfig::default(), Some(200.0)).unwrap(),
            &ScorePayload::new(10.0, 0.0, 100.0, 55.0, 41.0).unwrap(),
            &CategoryOrder::default(),
            &ColorTable::default(),
            None,
        );

        let mut png = Vec::new();
        write_png(&layout, &ColorTable::default(), &mut png).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}

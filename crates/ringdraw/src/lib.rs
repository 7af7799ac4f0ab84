//! Drawing primitives for radial gauges: circle geometry, a small vector
//! scene model and the host document that owns drawing containers.

pub mod color;
pub mod geom;
pub mod surface;

pub use color::Color;
pub use geom::{ArcKind, PathDescription, Point, TickRing, arc_path, tick_positions};
pub use surface::{
    Container, ContainerId, Document, Node, SceneSurface, SharedContainer, Stroke, Surface,
    SurfaceError, SurfaceProvider, SvgProvider, SvgSurface, TextStyle,
};

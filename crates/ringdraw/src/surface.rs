//! The drawing side of the host: a document of named containers, the
//! vector scene nodes placed in them, and the surface providers that
//! produce those nodes.

use crate::color::Color;
use crate::geom::{Num, PathDescription, Point};
use derive_more::{AsRef, Deref, Display, From, Into};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for ContainerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("drawing backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SurfaceError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub color: Color,
}

/// One element of a drawn scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Root of a vector surface; owns everything drawn on it.
    Vector {
        width: f64,
        height: f64,
        children: Vec<Node>,
    },
    Arc {
        path: PathDescription,
        stroke: Stroke,
    },
    Dot {
        center: Point,
        radius: f64,
        fill: Color,
    },
    Text {
        position: Point,
        content: String,
        style: TextStyle,
    },
    /// Plain markup placed beside the vector surface, centred on `position`.
    Markup {
        position: Point,
        content: String,
        style: TextStyle,
    },
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Vector {
                width,
                height,
                children,
            } => {
                write!(
                    f,
                    r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                    w = Num(*width),
                    h = Num(*height),
                )?;
                for child in children {
                    write!(f, "{child}")?;
                }
                f.write_str("</svg>")
            }
            Node::Arc { path, stroke } => {
                write!(
                    f,
                    r#"<path d="{path}" fill="none" stroke="{}" stroke-width="{}""#,
                    stroke.color,
                    Num(stroke.width),
                )?;
                if stroke.opacity < 1.0 {
                    write!(f, r#" stroke-opacity="{}""#, Num(stroke.opacity))?;
                }
                f.write_str("/>")
            }
            Node::Dot {
                center,
                radius,
                fill,
            } => write!(
                f,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}"/>"#,
                Num(center.x),
                Num(center.y),
                Num(*radius),
            ),
            Node::Text {
                position,
                content,
                style,
            } => write!(
                f,
                r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                Num(position.x),
                Num(position.y),
                Num(style.font_size),
                style.color,
                html_escape::encode_text(content),
            ),
            Node::Markup {
                position,
                content,
                style,
            } => write!(
                f,
                r#"<div style="position:absolute;left:{}px;top:{}px;transform:translate(-50%,-50%);font-size:{}px;color:{}">{}</div>"#,
                Num(position.x),
                Num(position.y),
                Num(style.font_size),
                style.color,
                html_escape::encode_text(content),
            ),
        }
    }
}

/// Drawing operations a gauge needs from a backend.
pub trait Surface {
    fn stroke_arc(&mut self, path: &PathDescription, stroke: &Stroke) -> Result<(), SurfaceError>;

    fn fill_dot(&mut self, center: Point, radius: f64, fill: Color) -> Result<(), SurfaceError>;

    fn text(&mut self, position: Point, content: &str, style: &TextStyle)
    -> Result<(), SurfaceError>;

    /// Text outside the vector surface, for hosts whose vector text is unreliable.
    fn markup(
        &mut self,
        position: Point,
        content: &str,
        style: &TextStyle,
    ) -> Result<(), SurfaceError>;
}

/// A surface whose result can be stored in a [`Container`].
pub trait SceneSurface: Surface {
    fn finish(self: Box<Self>) -> Vec<Node>;
}

/// The vector-drawing backend a document offers to widgets.
pub trait SurfaceProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn create_surface(&self, width: f64, height: f64) -> Box<dyn SceneSurface>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SvgProvider;

impl SurfaceProvider for SvgProvider {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn create_surface(&self, width: f64, height: f64) -> Box<dyn SceneSurface> {
        Box::new(SvgSurface::new(width, height))
    }
}

/// Collects drawing calls into [`Node`]s.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    children: Vec<Node>,
    overlay: Vec<Node>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

impl Surface for SvgSurface {
    fn stroke_arc(&mut self, path: &PathDescription, stroke: &Stroke) -> Result<(), SurfaceError> {
        self.children.push(Node::Arc {
            path: *path,
            stroke: *stroke,
        });
        Ok(())
    }

    fn fill_dot(&mut self, center: Point, radius: f64, fill: Color) -> Result<(), SurfaceError> {
        self.children.push(Node::Dot {
            center,
            radius,
            fill,
        });
        Ok(())
    }

    fn text(
        &mut self,
        position: Point,
        content: &str,
        style: &TextStyle,
    ) -> Result<(), SurfaceError> {
        self.children.push(Node::Text {
            position,
            content: content.to_owned(),
            style: *style,
        });
        Ok(())
    }

    fn markup(
        &mut self,
        position: Point,
        content: &str,
        style: &TextStyle,
    ) -> Result<(), SurfaceError> {
        self.overlay.push(Node::Markup {
            position,
            content: content.to_owned(),
            style: *style,
        });
        Ok(())
    }
}

impl SceneSurface for SvgSurface {
    fn finish(self: Box<Self>) -> Vec<Node> {
        let SvgSurface {
            width,
            height,
            children,
            overlay,
        } = *self;
        let mut nodes = Vec::with_capacity(1 + overlay.len());
        nodes.push(Node::Vector {
            width,
            height,
            children,
        });
        nodes.extend(overlay);
        nodes
    }
}

/// A drawing target. Whoever holds the lock owns its content.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    id: ContainerId,
    children: Vec<Node>,
}

pub type SharedContainer = Arc<Mutex<Container>>;

impl Container {
    pub fn new(id: ContainerId) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn append(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Removes every child, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.children.len();
        self.children.clear();
        removed
    }

    pub fn replace(&mut self, nodes: Vec<Node>) {
        self.children = nodes;
    }

    pub fn to_markup(&self) -> String {
        self.children.iter().map(Node::to_string).collect()
    }
}

/// The host page: named containers plus the surface provider, if one was
/// installed.
#[derive(Default)]
pub struct Document {
    containers: HashMap<ContainerId, SharedContainer>,
    provider: Option<Arc<dyn SurfaceProvider>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("containers", &self.containers.keys().collect::<Vec<_>>())
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .finish()
    }
}

impl Document {
    /// A document with no drawing backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document backed by [`SvgProvider`].
    pub fn with_svg() -> Self {
        let mut doc = Self::new();
        doc.install_provider(SvgProvider);
        doc
    }

    pub fn install_provider(&mut self, provider: impl SurfaceProvider + 'static) {
        log::debug!("Installing surface provider '{}'", provider.name());
        self.provider = Some(Arc::new(provider));
    }

    pub fn provider(&self) -> Option<Arc<dyn SurfaceProvider>> {
        self.provider.clone()
    }

    /// Returns the container with `id`, creating an empty one if needed.
    pub fn create_container(&mut self, id: impl Into<ContainerId>) -> SharedContainer {
        let id = id.into();
        self.containers
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Container::new(id))))
            .clone()
    }

    pub fn container(&self, id: &ContainerId) -> Option<SharedContainer> {
        self.containers.get(id).cloned()
    }

    pub fn remove_container(&mut self, id: &ContainerId) -> Option<SharedContainer> {
        self.containers.remove(id)
    }

    /// Serialised content of a container.
    pub fn render_markup(&self, id: &ContainerId) -> Option<String> {
        self.container(id).map(|c| c.lock().to_markup())
    }
}

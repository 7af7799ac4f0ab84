use crate::config::{ArcStyleConfig, CanvasConfig, Theme};
use crate::error::GaugeError;
use crate::label::{self, LabelStrategy};
use crate::layout::{self, CategoryOrder, GaugeLayout, RingSpec, ScorePayload};
use crate::scale;
use crate::theme::ColorTable;
use crate::view;
use ringdraw::{Document, SharedContainer, SurfaceProvider};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub config: Option<CanvasConfig>,
    pub error_compensation: Option<f64>,
    pub mobile_like: bool,
    pub theme: Theme,
    pub order: CategoryOrder,
}

impl InitOptions {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    pub fn error_compensation(self, compensation: f64) -> Self {
        Self {
            error_compensation: Some(compensation),
            ..self
        }
    }

    pub fn mobile_like(self, mobile_like: bool) -> Self {
        Self {
            mobile_like,
            ..self
        }
    }

    pub fn theme(self, theme: Theme) -> Self {
        Self { theme, ..self }
    }

    pub fn order(self, order: CategoryOrder) -> Self {
        Self { order, ..self }
    }
}

/// A gauge bound to one container. Configuration is resolved once, here,
/// and never shared with other handles.
pub struct GaugeHandle {
    canvas: CanvasConfig,
    style: ArcStyleConfig,
    colors: ColorTable,
    order: CategoryOrder,
    error_compensation: Option<f64>,
    label: Box<dyn LabelStrategy>,
    provider: Arc<dyn SurfaceProvider>,
    container: SharedContainer,
    redraw: bool,
}

impl std::fmt::Debug for GaugeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaugeHandle")
            .field("canvas", &self.canvas)
            .field("style", &self.style)
            .field("label", &self.label)
            .field("provider", &self.provider.name())
            .field("redraw", &self.redraw)
            .finish_non_exhaustive()
    }
}

/// Claims the configured container in `document` and clears it.
pub fn init(document: &Document, options: InitOptions) -> Result<GaugeHandle, GaugeError> {
    let provider = document
        .provider()
        .ok_or(GaugeError::MissingDependency {
            required: "vector surface provider",
        })?;

    let canvas = options.config.unwrap_or_default();
    let style = scale::resolve(&options.theme.style, Some(canvas.size))?;
    layout::check_geometry(&style, &options.order)?;

    let container =
        document
            .container(&canvas.container_id)
            .ok_or_else(|| GaugeError::MissingContainer {
                id: canvas.container_id.clone(),
            })?;

    let removed = container.lock().clear();
    if removed > 0 {
        log::debug!(
            "Cleared {} node(s) from container '{}'",
            removed,
            canvas.container_id
        );
    }
    log::info!(
        "Gauge initialised in '{}' at {}px using '{}'",
        canvas.container_id,
        canvas.size,
        provider.name()
    );

    Ok(GaugeHandle {
        label: label::strategy_for(options.mobile_like, &options.theme.label),
        colors: options.theme.colors,
        order: options.order,
        error_compensation: options.error_compensation,
        redraw: removed > 0,
        canvas,
        style,
        provider,
        container,
    })
}

impl GaugeHandle {
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    pub fn style(&self) -> &ArcStyleConfig {
        &self.style
    }

    pub fn container(&self) -> &SharedContainer {
        &self.container
    }

    /// Whether the next draw goes into a container that held a gauge before.
    pub fn is_redraw(&self) -> bool {
        self.redraw
    }

    pub fn plan(&self, payload: &ScorePayload) -> Vec<RingSpec> {
        layout::plan(payload, &self.style, &self.order, &self.colors)
    }

    pub fn layout(&self, payload: &ScorePayload) -> GaugeLayout {
        GaugeLayout::build(
            &self.canvas,
            &self.style,
            payload,
            &self.order,
            &self.colors,
            self.error_compensation,
        )
    }

    /// Draws `payload`, replacing whatever the container holds.
    pub fn draw(&mut self, payload: Option<&ScorePayload>) -> Result<(), GaugeError> {
        let payload = payload.ok_or(GaugeError::MissingScoreData)?;
        let layout = self.layout(payload);
        log::debug!(
            "Drawing {} rings into '{}'",
            layout.rings.len(),
            self.canvas.container_id
        );

        let mut surface = self
            .provider
            .create_surface(self.canvas.size, self.canvas.size);
        view::draw(
            surface.as_mut(),
            &layout,
            &self.colors,
            self.label.as_ref(),
            self.redraw,
        )?;

        self.container.lock().replace(surface.finish());
        self.redraw = true;
        Ok(())
    }
}

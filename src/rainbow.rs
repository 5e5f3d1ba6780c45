//! The rainbow arc widget: seven concentric top-half semi-circles in
//! ROYGBIV order, rendered as stroked SVG paths, fading in once after the
//! first paint.

use std::sync::Arc;

use askama::Template;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

use crate::color_constants;

pub const OUTER_RADIUS: i32 = 150;
pub const RADIUS_STEP: i32 = 10;
pub const STROKE_WIDTH: i32 = 8;
pub const CX: i32 = 160;
pub const CY: i32 = 160;

/// One stroked semi-circle of the motif.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcBand {
    pub color: &'static str,
    pub radius: i32,
    pub path: String,
}

/// The full motif geometry. Built once at mount and never recomputed; only
/// the fade-in visibility flag changes after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcGeometry {
    pub bands: Vec<ArcBand>,
    pub view_box: String,
    pub width: i32,
    pub height: i32,
}

/// Path for the top half of the circle centred on `(cx, cy)`: move to the
/// leftmost point, then one circular arc sweeping through the upper
/// half-plane to the rightmost point.
pub fn arc_path(cx: i32, cy: i32, r: i32) -> String {
    let start_x = cx - r;
    let end_x = cx + r;
    format!("M {} {} A {} {} 0 0 1 {} {}", start_x, cy, r, r, end_x, cy)
}

impl ArcGeometry {
    pub fn build() -> Self {
        let bands: Vec<ArcBand> = color_constants::rainbow::BANDS
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let radius = OUTER_RADIUS - i as i32 * RADIUS_STEP;
                ArcBand {
                    color,
                    radius,
                    path: arc_path(CX, CY, radius),
                }
            })
            .collect();

        // The widest band spans CX±OUTER_RADIUS and rises to CY-OUTER_RADIUS;
        // pad on every side so the stroke is not clipped.
        let padding = STROKE_WIDTH;
        let min_x = CX - OUTER_RADIUS - padding;
        let min_y = CY - OUTER_RADIUS - padding;
        let width = (OUTER_RADIUS + padding) * 2;
        let height = OUTER_RADIUS + padding * 2;

        Self {
            bands,
            view_box: format!("{} {} {} {}", min_x, min_y, width, height),
            width,
            height,
        }
    }
}

#[derive(Template)]
#[template(path = "rainbow.svg", escape = "none")]
struct RainbowTemplate<'a> {
    view_box: &'a str,
    width: i32,
    height: i32,
    opacity: u8,
    stroke_width: i32,
    bands: &'a [ArcBand],
}

/// The mounted motif. Geometry is fixed at mount; opacity stays 0 until the
/// host reports the first paint, then flips to 1 for the rest of the
/// widget's life.
pub struct RainbowWidget {
    geometry: ArcGeometry,
    visible: watch::Receiver<bool>,
    paint: Arc<Notify>,
    fade_in: Option<JoinHandle<()>>,
}

impl RainbowWidget {
    pub fn mount() -> Self {
        let geometry = ArcGeometry::build();
        let (tx, rx) = watch::channel(false);
        let paint = Arc::new(Notify::new());

        let gate = Arc::clone(&paint);
        let fade_in = tokio::spawn(async move {
            gate.notified().await;
            let _ = tx.send(true);
        });

        tracing::info!("Rainbow widget mounted");
        Self {
            geometry,
            visible: rx,
            paint,
            fade_in: Some(fade_in),
        }
    }

    /// Host notification that the initial render has been committed. The
    /// fade-in task flips visibility at most once no matter how often this
    /// is called.
    pub fn first_paint(&self) {
        self.paint.notify_one();
    }

    pub fn visible(&self) -> bool {
        *self.visible.borrow()
    }

    /// A receiver that observes the visibility flip.
    pub fn watch(&self) -> watch::Receiver<bool> {
        self.visible.clone()
    }

    /// Wait until the fade-in has been triggered.
    pub async fn faded_in(&self) {
        let mut rx = self.visible.clone();
        let _ = rx.wait_for(|visible| *visible).await;
    }

    pub fn geometry(&self) -> &ArcGeometry {
        &self.geometry
    }

    /// Render the SVG markup from the fixed geometry and current opacity.
    pub fn render(&self) -> String {
        let geometry = &self.geometry;
        let template = RainbowTemplate {
            view_box: &geometry.view_box,
            width: geometry.width,
            height: geometry.height,
            opacity: if self.visible() { 1 } else { 0 },
            stroke_width: STROKE_WIDTH,
            bands: &geometry.bands,
        };

        template.render().unwrap_or_else(|e| {
            tracing::error!("Failed to render rainbow template: {}", e);
            String::from("<svg data-testid=\"rainbow-arc\" role=\"img\" aria-label=\"Decorative rainbow\"></svg>")
        })
    }

    /// Cancel the pending fade-in. Unmounting before the first paint means
    /// the visibility flip never happens.
    pub async fn unmount(mut self) {
        if let Some(fade_in) = self.fade_in.take() {
            fade_in.abort();
            let _ = fade_in.await;
        }
        tracing::info!("Rainbow widget unmounted");
    }
}

impl Drop for RainbowWidget {
    fn drop(&mut self) {
        if let Some(fade_in) = self.fade_in.take() {
            fade_in.abort();
        }
    }
}

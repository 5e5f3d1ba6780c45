//! HTTP host binding for the widgets: every handler renders from the
//! widgets' current snapshots, and the page handler reports the first paint
//! that starts the rainbow's fade-in.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::clock::{ClockState, ClockWidget};
use crate::rainbow::RainbowWidget;
use crate::raster;

#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<ClockWidget>,
    pub rainbow: Arc<RainbowWidget>,
}

#[derive(Template)]
#[template(path = "footer.html")]
struct FooterTemplate {
    rainbow_svg: String,
    clock_html: String,
}

#[derive(Serialize)]
struct RainbowStatus {
    visible: bool,
}

#[derive(Serialize)]
struct WidgetState {
    clock: ClockState,
    rainbow: RainbowStatus,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(footer_page))
        .route("/widgets/clock", get(clock_fragment))
        .route("/widgets/rainbow.svg", get(rainbow_svg))
        .route("/widgets/rainbow.png", get(rainbow_png))
        .route("/state", get(widget_state))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn footer_page(State(state): State<AppState>) -> Response {
    let page = FooterTemplate {
        rainbow_svg: state.rainbow.render(),
        clock_html: state.clock.render(),
    };
    let response = page.into_response();

    // The initial render is committed; let the rainbow start its fade-in.
    state.rainbow.first_paint();

    response
}

async fn clock_fragment(State(state): State<AppState>) -> Html<String> {
    Html(state.clock.render())
}

async fn rainbow_svg(State(state): State<AppState>) -> Response {
    (
        [
            ("Content-Type", "image/svg+xml"),
            ("Cache-Control", "no-cache, no-store, must-revalidate"),
        ],
        state.rainbow.render(),
    )
        .into_response()
}

async fn rainbow_png(State(state): State<AppState>) -> Response {
    match raster::svg_to_png(&state.rainbow.render(), 1.0) {
        Ok(png) => (
            [
                ("Content-Type", "image/png"),
                ("Cache-Control", "no-cache, no-store, must-revalidate"),
            ],
            png,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to rasterize rainbow: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn widget_state(State(state): State<AppState>) -> Json<WidgetState> {
    Json(WidgetState {
        clock: state.clock.snapshot(),
        rainbow: RainbowStatus {
            visible: state.rainbow.visible(),
        },
    })
}

async fn health_check() -> &'static str {
    "OK"
}

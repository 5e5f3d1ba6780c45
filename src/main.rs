use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use footer_widgets::clock::{ClockWidget, SystemClock};
use footer_widgets::rainbow::RainbowWidget;
use footer_widgets::server::{router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    tracing::info!("Starting footer widget server");

    let state = AppState {
        clock: Arc::new(ClockWidget::mount(Arc::new(SystemClock))),
        rainbow: Arc::new(RainbowWidget::mount()),
    };
    let widgets = state.clone();

    let app = router(state);

    // Cloud hosts provide PORT; default to 8080 locally.
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("0.0.0.0:{}", port);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // The router is gone once serve returns; tear the widgets down so their
    // timers cannot fire again.
    if let Ok(clock) = Arc::try_unwrap(widgets.clock) {
        clock.unmount().await;
    }
    if let Ok(rainbow) = Arc::try_unwrap(widgets.rainbow) {
        rainbow.unmount().await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully");
        },
    }
}

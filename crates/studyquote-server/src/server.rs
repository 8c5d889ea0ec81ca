//! Listener setup and the serve loop.

use std::future::Future;

use tokio::net::TcpListener;

use crate::api::{create_router, AppState};
use crate::error::{QuoteError, Result};

/// Binds the listener for the configured address.
pub async fn bind(state: &AppState) -> Result<TcpListener> {
    let addr = state.config.bind_addr();
    TcpListener::bind(&addr)
        .await
        .map_err(|e| QuoteError::bind(addr, e))
}

/// Serves the pricing API on `listener` until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    tracing::info!(
        addr = %local_addr,
        portal = %state.config.portal,
        "Pricing API listening"
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Pricing API stopped");
    Ok(())
}

/// Resolves on Ctrl+C.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn test_bind_reports_address_on_failure() {
        tokio_test::block_on(async {
            let first = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let port = first.local_addr().unwrap().port();

            let state = AppState::new(Config {
                port,
                ..Config::default()
            });
            let err = bind(&state).await.unwrap_err();

            assert!(matches!(err, QuoteError::Bind { ref addr, .. } if addr.ends_with(&port.to_string())));
        });
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let state = AppState::new(Config::default());

        run(listener, state, async {}).await.unwrap();
    }
}

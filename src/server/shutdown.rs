use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Cancels `cancellation` once the process receives Ctrl-C, letting in-flight chart requests
/// finish before the server stops. Returns early if the token is cancelled elsewhere.
pub async fn detect_shutdown(cancellation: CancellationToken) {
    select! {
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => {
                info!("Received Ctrl-C");
                cancellation.cancel();
            }
            Err(e) => error!("Can't listen for Ctrl-C, shutdown has to be external {e:?}"),
        },
        _ = cancellation.cancelled() => {},
    };
}

//! Process signals that stop the health server.

use std::fmt;
use std::future::Future;

use anyhow::{Context, Result};
use tokio::signal;

/// The signal that ended the serve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for StopSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopSignal::Interrupt => "SIGINT",
            StopSignal::Terminate => "SIGTERM",
        })
    }
}

/// Wait for Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if a signal listener cannot be installed.
pub async fn wait_for_shutdown() -> Result<StopSignal> {
    let signal = first_of(interrupt(), terminate()).await?;
    tracing::info!(%signal, "Stop signal received, draining HTTP connections");
    Ok(signal)
}

async fn first_of<I, T>(interrupt: I, terminate: T) -> Result<StopSignal>
where
    I: Future<Output = Result<()>>,
    T: Future<Output = Result<()>>,
{
    tokio::select! {
        result = interrupt => result.map(|()| StopSignal::Interrupt),
        result = terminate => result.map(|()| StopSignal::Terminate),
    }
}

async fn interrupt() -> Result<()> {
    signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")
}

#[cfg(unix)]
async fn terminate() -> Result<()> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("failed to install SIGTERM handler")?
        .recv()
        .await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> Result<()> {
    std::future::pending::<Result<()>>().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;

    #[tokio::test]
    async fn first_signal_decides_the_reason() {
        let signal = first_of(async { Ok::<(), anyhow::Error>(()) }, pending::<Result<()>>())
            .await
            .unwrap();
        assert_eq!(signal, StopSignal::Interrupt);

        let signal = first_of(pending::<Result<()>>(), async { Ok::<(), anyhow::Error>(()) })
            .await
            .unwrap();
        assert_eq!(signal, StopSignal::Terminate);
    }

    #[tokio::test]
    async fn listener_failure_is_reported() {
        let res = first_of(
            async { Err::<(), _>(anyhow::anyhow!("no controlling terminal")) },
            pending::<Result<()>>(),
        )
        .await;
        assert!(res.is_err());
    }

    #[test]
    fn signals_display_their_names() {
        assert_eq!(StopSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(StopSignal::Terminate.to_string(), "SIGTERM");
    }
}

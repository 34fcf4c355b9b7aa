use std::io;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Process shutdown listener.
///
/// Handlers are registered in [`ShutdownSignal::install`], so a signal that
/// arrives before anyone awaits [`ShutdownSignal::recv`] is still observed
/// instead of falling through to the default disposition.
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(unix)]
    terminate: Signal,
    #[cfg(windows)]
    ctrl_c: tokio::signal::windows::CtrlC,
}

impl ShutdownSignal {
    /// Must be called from inside a tokio runtime.
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            #[cfg(unix)]
            interrupt: signal(SignalKind::interrupt())?,
            #[cfg(unix)]
            terminate: signal(SignalKind::terminate())?,
            #[cfg(windows)]
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    /// Resolves once SIGINT or SIGTERM (Ctrl+C on Windows) is received.
    pub async fn recv(mut self) {
        #[cfg(unix)]
        {
            tokio::select! {
                _ = self.interrupt.recv() => tracing::info!("Received SIGINT"),
                _ = self.terminate.recv() => tracing::info!("Received SIGTERM"),
            }
        }

        #[cfg(windows)]
        {
            self.ctrl_c.recv().await;
            tracing::info!("Received Ctrl+C");
        }
    }
}

//! HTTP-based connectivity probe.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::watch;
use tracing::{info, warn};

use locify_common::error::BackendError;
use locify_common::services::ConnectivityProbe;
use locify_config::ConnectivityConfig;

/// Decides whether the agent is online by periodically requesting a probe
/// URL. Any response at all counts as reachable; only a transport failure
/// counts as offline.
///
/// The cached flag starts out offline and flips after the first check, so
/// the first moments of a session behave like an offline stretch — safe,
/// since offline samples are queued rather than dropped.
pub struct HttpConnectivityProbe {
    online: Arc<watch::Sender<bool>>,
}

impl HttpConnectivityProbe {
    /// Spawn the poll loop and return the probe handle.
    pub fn spawn(config: &ConnectivityConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|err| BackendError::Http(err.to_string()))?;

        let online = Arc::new(watch::channel(false).0);
        let sender = online.clone();
        let probe_url = config.probe_url.clone();
        let poll = Duration::from_secs(config.poll_secs);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll);
            loop {
                ticker.tick().await;
                let reachable = client.head(&probe_url).send().await.is_ok();
                // send_if_modified keeps the channel quiet unless the
                // state actually flips, so subscribers only wake on
                // transitions.
                sender.send_if_modified(|current| {
                    if *current == reachable {
                        return false;
                    }
                    if reachable {
                        info!("connectivity restored");
                    } else {
                        warn!("connectivity lost");
                    }
                    *current = reachable;
                    true
                });
            }
        });

        Ok(Self { online })
    }
}

impl ConnectivityProbe for HttpConnectivityProbe {
    fn is_online(&self) -> bool {
        *self.online.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.online.subscribe()
    }
}

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use sysmon_core::{Connectivity, PollerConfig};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::render::{self, ErrorBanner};
use crate::view::{TableContent, View};
use crate::{FetchError, MetricsSource};

/// Signals the host forwards to the poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    VisibilityChanged { hidden: bool },
    NetworkChanged { online: bool },
    Unload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Updated,
    Failed(FetchError),
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }
}

/// Owns the refresh timer and projects fetched samples onto a view
pub struct StatusPoller<S, V> {
    source: S,
    view: V,
    config: PollerConfig,
    connectivity: Connectivity,
    ticker: Option<Interval>,
    table: TableContent,
    refreshes: u64,
}

impl<S: MetricsSource, V: View> StatusPoller<S, V> {
    pub fn new(source: S, view: V, config: PollerConfig) -> Self {
        Self {
            source,
            view,
            config,
            connectivity: Connectivity::default(),
            ticker: None,
            table: TableContent::default(),
            refreshes: 0,
        }
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Whether the repeating timer is armed
    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn table(&self) -> TableContent {
        self.table
    }

    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Move to `connectivity`, returning false when nothing changed
    pub fn set_connectivity(&mut self, connectivity: Connectivity) -> bool {
        if self.connectivity == connectivity {
            return false;
        }

        self.connectivity = connectivity;
        render::show_status(&mut self.view, connectivity);
        true
    }

    /// Fetch both endpoints and update the view; never fails
    pub async fn refresh(&mut self) -> RefreshOutcome {
        self.refreshes += 1;
        debug!(refresh = self.refreshes, "Refreshing dashboard");

        let limit = self.config.request_timeout();
        let fetched = tokio::try_join!(
            bounded(limit, self.source.fetch_latest()),
            bounded(limit, self.source.fetch_metrics()),
        );

        let outcome = match fetched {
            Ok((latest, summary)) => {
                if self.set_connectivity(Connectivity::Online) {
                    info!("Server reachable again");
                }
                self.table = render::apply_sample(&mut self.view, &latest, self.config.max_rows);
                render::apply_summary(&mut self.view, &summary);
                RefreshOutcome::Updated
            }
            Err(e) => {
                error!("Failed to load dashboard data: {}", e);
                if self.set_connectivity(Connectivity::Offline) {
                    warn!("Server unreachable");
                }
                if self.table != TableContent::Error {
                    render::show_error_banner(&mut self.view, ErrorBanner::Fetch(e.to_string()));
                    self.table = TableContent::Error;
                }
                RefreshOutcome::Failed(e)
            }
        };

        self.view.flush();
        outcome
    }

    /// Refresh now, then every poll interval
    pub async fn start(&mut self) {
        self.refresh().await;
        self.schedule();
    }

    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            info!("Polling stopped");
        }
    }

    fn schedule(&mut self) {
        if self.ticker.is_some() {
            return;
        }

        let period = self.config.poll_interval();
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ticker = Some(ticker);
        info!(interval_ms = self.config.poll_interval_ms, "Polling started");
    }

    pub async fn handle_event(&mut self, event: HostEvent) -> ControlFlow<()> {
        debug!(?event, "Host event");

        match event {
            HostEvent::VisibilityChanged { hidden: true } => self.stop(),
            HostEvent::VisibilityChanged { hidden: false } => {
                self.refresh().await;
                self.schedule();
            }
            HostEvent::NetworkChanged { online } => {
                self.set_connectivity(Connectivity::from_online(online));
                if online {
                    self.refresh().await;
                } else {
                    render::show_error_banner(&mut self.view, ErrorBanner::NoNetwork);
                    self.table = TableContent::Error;
                    self.view.flush();
                }
            }
            HostEvent::Unload => {
                self.stop();
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    /// Drive the poller until the host unloads or drops its sender
    pub async fn run(mut self, mut events: mpsc::Receiver<HostEvent>) -> V {
        self.start().await;

        loop {
            let step = tokio::select! {
                _ = next_tick(&mut self.ticker) => None,
                event = events.recv() => Some(event.unwrap_or(HostEvent::Unload)),
            };

            match step {
                None => {
                    self.refresh().await;
                }
                Some(event) => {
                    if self.handle_event(event).await.is_break() {
                        break;
                    }
                }
            }
        }

        self.view
    }
}

async fn bounded<T, F>(limit: Duration, request: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match time::timeout(limit, request).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(limit)),
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

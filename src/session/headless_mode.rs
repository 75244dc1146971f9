//! Headless mode execution

use super::SessionData;
use crate::dashboard::SalesDashboardViewModel;
use crate::events::{Change, Property};
use crate::logging::should_log_with_env;
use crate::{print_cmd_info, print_cmd_success};
use log::warn;
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

/// Counts kept by [`refresh_until_shutdown`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefreshStats {
    /// Ticks that started a reload.
    pub started: usize,
    /// Ticks dropped because a reload was still running.
    pub skipped: usize,
}

/// Runs the dashboard without a terminal UI
///
/// This function handles:
/// 1. A full reload every `refresh_interval_secs`, starting immediately
/// 2. Console logging of view-model events
/// 3. Ctrl+C shutdown handling
pub async fn run_headless_mode(session: SessionData) -> Result<(), Box<dyn Error>> {
    print_cmd_info!("Starting headless mode", "Data source: {}", session.source);

    // Trigger shutdown on Ctrl+C
    let (shutdown_sender, shutdown_receiver) = broadcast::channel::<()>(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender.send(());
        }
    });

    let period = Duration::from_secs(session.config.refresh_interval_secs.max(1));
    let stats = refresh_until_shutdown(
        &session.view_model,
        period,
        shutdown_receiver,
        &mut io::stdout(),
    )
    .await?;

    session.subscription.unsubscribe();
    print_cmd_success!(
        "Sales Dashboard exited successfully",
        "{} reloads, {} skipped",
        stats.started,
        stats.skipped
    );

    Ok(())
}

/// Reload the dashboard every `period` and write its events to `out` until
/// `shutdown` fires, then wait for the reload still in flight.
pub async fn refresh_until_shutdown<W: Write>(
    view_model: &Arc<SalesDashboardViewModel>,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
    out: &mut W,
) -> io::Result<RefreshStats> {
    let mut changes = view_model.subscribe_changes();
    let mut refresh = tokio::time::interval(period);
    let mut reloads: Vec<JoinHandle<()>> = Vec::new();
    let mut stats = RefreshStats::default();

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                reloads.retain(|handle| !handle.is_finished());
                match view_model.execute_load_dashboard() {
                    Some(handle) => {
                        stats.started += 1;
                        reloads.push(handle);
                    }
                    None => {
                        stats.skipped += 1;
                        warn!("Previous reload still running, skipping this one");
                    }
                }
            }
            change = changes.recv() => match change {
                Ok(event) => {
                    if should_log_with_env(event.log_level()) {
                        writeln!(out, "{}", event)?;
                    }
                    if event.change == Change::PropertyChanged(Property::SalesAverage) {
                        writeln!(out, "Sales average: {}", view_model.sales_average())?;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Missed {} dashboard events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            _ = shutdown.recv() => {
                break;
            }
        }
    }

    writeln!(out, "Shutting down...")?;
    for handle in reloads {
        let _ = handle.await;
    }
    out.flush()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{CustomerDataClient, DemoDataClient};
    use crate::client::error::DataClientError;
    use crate::currency::CurrencyFormat;
    use crate::models::{Account, Order};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    const PERIOD: Duration = Duration::from_secs(10);

    /// Order fetches wait for `gate` before returning.
    struct SlowOrdersClient {
        gate: Arc<Notify>,
        order_fetches: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl CustomerDataClient for SlowOrdersClient {
        async fn seed_data(&self) -> Result<(), DataClientError> {
            Ok(())
        }

        async fn get_all_account_orders(&self) -> Result<Vec<Order>, DataClientError> {
            self.order_fetches.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(Vec::new())
        }

        async fn get_accounts(&self, _leads_only: bool) -> Result<Vec<Account>, DataClientError> {
            Ok(vec![Account::lead("1", "Coho Winery")])
        }

        async fn save_account(&self, account: Account) -> Result<Account, DataClientError> {
            Ok(account)
        }
    }

    fn spawn_loop(
        view_model: &Arc<SalesDashboardViewModel>,
        shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<(RefreshStats, String)> {
        let view_model = Arc::clone(view_model);
        tokio::spawn(async move {
            let mut out = Vec::new();
            let stats = refresh_until_shutdown(&view_model, PERIOD, shutdown, &mut out)
                .await
                .unwrap();
            (stats, String::from_utf8(out).unwrap())
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_loads_the_dashboard() {
        let view_model = Arc::new(SalesDashboardViewModel::new(
            Arc::new(DemoDataClient::new(42)),
            CurrencyFormat::default(),
        ));
        let (shutdown_sender, shutdown) = broadcast::channel(1);
        let run = spawn_loop(&view_model, shutdown);

        tokio::time::sleep(Duration::from_secs(1)).await;
        shutdown_sender.send(()).unwrap();
        let (stats, out) = run.await.unwrap();

        assert_eq!(stats, RefreshStats { started: 1, skipped: 0 });
        assert!(view_model.is_model_loaded());
        assert!(out.contains("Sales average: $"));
        assert!(out.ends_with("Shutting down...\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_busy_tick_is_skipped_and_shutdown_waits_for_reload() {
        let gate = Arc::new(Notify::new());
        let fetches = Arc::new(AtomicUsize::new(0));
        let view_model = Arc::new(SalesDashboardViewModel::new(
            Arc::new(SlowOrdersClient {
                gate: Arc::clone(&gate),
                order_fetches: Arc::clone(&fetches),
            }),
            CurrencyFormat::default(),
        ));
        let (shutdown_sender, shutdown) = broadcast::channel(1);
        let run = spawn_loop(&view_model, shutdown);

        // Past the second tick while the first reload is parked.
        tokio::time::sleep(PERIOD + Duration::from_secs(5)).await;
        assert!(view_model.is_busy());
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        shutdown_sender.send(()).unwrap();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!run.is_finished());

        gate.notify_one();
        let (stats, out) = run.await.unwrap();

        assert_eq!(stats.started, 1);
        assert!(stats.skipped >= 1);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(view_model.is_model_loaded());
        assert!(!view_model.is_busy());
        assert!(out.contains("Shutting down..."));
    }
}

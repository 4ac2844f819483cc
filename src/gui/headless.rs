// gui/headless.rs
// Console loop used with --headless: events go to the log, Ctrl+C stops

use super::shutdown::Shutdown;
use crate::automation::{
    AutomationEvent, ScanConfig, SessionSummary, StopSignal, ToastKind, WORKER_THREAD_NAME, create_event_channel,
    spawn_scan_worker,
};
use crate::error::{AutomationError, AutomationResult};
use crate::template_matching::TemplateCatalog;
use tokio::time::{Duration, sleep};

pub fn run_headless(
    config: ScanConfig,
    catalog: TemplateCatalog,
    timeout_secs: Option<u64>,
) -> AutomationResult<SessionSummary> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let (events, mut rx) = create_event_channel();
    let stop = StopSignal::new();
    let shutdown = Shutdown::new(stop.clone(), None);
    let worker = spawn_scan_worker(config, catalog, events, stop)?;
    log::info!("🖥️ Headless mode, press Ctrl+C to stop");

    runtime.block_on(async {
        let deadline = async {
            match timeout_secs {
                Some(secs) => sleep(Duration::from_secs(secs)).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(event) => log_event(&event),
                    // The worker dropped its sender: the session is over
                    None => break,
                },
                result = tokio::signal::ctrl_c(), if !shutdown.is_triggered() => {
                    if let Err(e) = result {
                        log::warn!("⚠️ Ctrl+C handler failed: {}", e);
                    }
                    shutdown.trigger();
                }
                _ = &mut deadline, if !shutdown.is_triggered() => {
                    log::info!("⏰ Timeout reached, stopping");
                    shutdown.trigger();
                }
            }
        }
    });

    worker.join().map_err(|_| AutomationError::WorkerPanicked {
        name: WORKER_THREAD_NAME,
    })?
}

fn log_event(event: &AutomationEvent) {
    match event {
        AutomationEvent::StateChanged(state) => log::debug!("🔁 {:?}", state),
        AutomationEvent::Matched(hit) => log::debug!("🎯 Hit on monitor #{}", hit.display_index),
        AutomationEvent::Toast(toast) => match toast.kind {
            ToastKind::Info => log::info!("💬 {}", toast.text),
            ToastKind::Alert => log::warn!("🔔 {}", toast.text),
        },
        AutomationEvent::SessionAborted(reason) => log::error!("❌ Scanning stopped: {}", reason),
    }
}

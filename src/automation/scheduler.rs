// Scan scheduler - the Searching / Cooldown / Stopped state machine
use super::channels::EventSender;
use super::config::ScanConfig;
use super::dispatcher::ActionDispatcher;
use super::signal::StopSignal;
use super::types::{AutomationEvent, ScanState, SessionSummary, Toast, WindowOutcome};
use crate::display::{ScreenSource, XcapScreen};
use crate::error::{AutomationError, AutomationResult};
use crate::input::{EnigoInput, InputDriver};
use crate::template_matching::{
    Correlator, FolderTemplates, MatchEngine, NccCorrelator, ScanResult, TemplateCatalog, TemplateSource,
};
use std::thread::JoinHandle;
use tokio::time::Instant;

/// How long the "not found" alert stays on screen
const ALERT_TOAST_MS: u64 = 3000;

/// Name of the background scan thread
pub const WORKER_THREAD_NAME: &str = "finder";

pub struct ScanScheduler<S, T, I, C = NccCorrelator>
where
    S: ScreenSource,
    T: TemplateSource,
    I: InputDriver,
    C: Correlator,
{
    config: ScanConfig,
    screen: S,
    templates: T,
    engine: MatchEngine<C>,
    dispatcher: ActionDispatcher<I>,
    events: EventSender,
    stop: StopSignal,
    state: ScanState,
    // Reset after every hit so each idle streak alerts once
    has_alerted: bool,
    last_window_empty: bool,
    summary: SessionSummary,
}

impl<S, T, I, C> ScanScheduler<S, T, I, C>
where
    S: ScreenSource,
    T: TemplateSource,
    I: InputDriver,
    C: Correlator,
{
    pub fn new(
        config: ScanConfig,
        screen: S,
        templates: T,
        correlator: C,
        input: I,
        events: EventSender,
        stop: StopSignal,
    ) -> Self {
        let engine = MatchEngine::new(correlator, config.threshold);
        let dispatcher = ActionDispatcher::new(input, config.settle());
        Self {
            config,
            screen,
            templates,
            engine,
            dispatcher,
            events,
            stop,
            state: ScanState::Searching,
            has_alerted: false,
            last_window_empty: false,
            summary: SessionSummary::default(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    fn change_state(&mut self, new_state: ScanState) {
        if self.state != new_state {
            log::debug!("🔁 Scan state: {:?} -> {:?}", self.state, new_state);
            self.state = new_state;
            self.events.send(AutomationEvent::StateChanged(new_state));
        }
    }

    /// Run search windows until the stop signal is raised. Zero displays
    /// aborts the session with `TopologyEmpty`.
    pub async fn run(&mut self) -> AutomationResult<SessionSummary> {
        log::info!(
            "🔍 Scan loop started (threshold={:.2}, retry={}ms, timeout={}ms, cooldown={}ms)",
            self.config.threshold,
            self.config.retry_ms,
            self.config.timeout_ms,
            self.config.cooldown_ms
        );

        while !self.stop.is_set() {
            match self.run_window().await? {
                WindowOutcome::Hit(_) => {
                    self.summary.hits += 1;
                    self.has_alerted = false;
                    self.change_state(ScanState::Cooldown);
                    if !self.stop.sleep_sliced(self.config.cooldown(), self.config.slice()).await {
                        break;
                    }
                    self.change_state(ScanState::Searching);
                }
                WindowOutcome::NotFound => self.alert_not_found(),
                WindowOutcome::Stopped => break,
            }
        }

        self.change_state(ScanState::Stopped);
        log::info!(
            "🛑 Scan loop stopped ({} windows, {} passes, {} hits)",
            self.summary.windows,
            self.summary.passes,
            self.summary.hits
        );
        Ok(self.summary)
    }

    /// One search window: retry passes until a hit, the timeout or a stop
    pub async fn run_window(&mut self) -> AutomationResult<WindowOutcome> {
        self.summary.windows += 1;

        let topology = match self.screen.enumerate_required() {
            Ok(topology) => topology,
            Err(e) if e.is_fatal() => {
                log::error!("❌ {}", e);
                self.events.send(AutomationEvent::SessionAborted(e.to_string()));
                self.change_state(ScanState::Stopped);
                return Err(e);
            }
            Err(e) => {
                log::warn!("⚠️ {}, retrying in {}ms", e, self.config.idle_ms);
                self.last_window_empty = false;
                if !self.stop.sleep_sliced(self.config.idle_backoff(), self.config.slice()).await {
                    return Ok(WindowOutcome::Stopped);
                }
                return Ok(WindowOutcome::NotFound);
            }
        };

        let templates = self.templates.refresh();
        self.last_window_empty = templates.is_empty();
        if templates.is_empty() {
            log::debug!("📂 No templates loaded, backing off {}ms", self.config.idle_ms);
            if !self.stop.sleep_sliced(self.config.idle_backoff(), self.config.slice()).await {
                return Ok(WindowOutcome::Stopped);
            }
            return Ok(WindowOutcome::NotFound);
        }

        let stop = self.stop.clone();
        let should_stop = move || stop.is_set();
        let started = Instant::now();
        loop {
            if self.stop.is_set() {
                return Ok(WindowOutcome::Stopped);
            }

            self.summary.passes += 1;
            match self
                .engine
                .scan_once(&mut self.screen, &topology, &templates, &should_stop)
            {
                ScanResult::Hit(hit) => {
                    log::info!(
                        "🎯 {} matched on monitor #{} at ({}, {}) score={:.3}",
                        hit.template_name,
                        hit.display_index,
                        hit.global_x,
                        hit.global_y,
                        hit.score
                    );
                    self.events.send(AutomationEvent::Matched(hit.clone()));
                    // The match counts even if the input only partly went through
                    if let Err(e) = self.dispatcher.dispatch(&hit).await {
                        log::warn!("⚠️ {}", e);
                    }
                    return Ok(WindowOutcome::Hit(hit));
                }
                ScanResult::Miss => {
                    if self.stop.is_set() {
                        return Ok(WindowOutcome::Stopped);
                    }
                    if started.elapsed() >= self.config.timeout() {
                        log::debug!("⏱️ Nothing found within {}ms", self.config.timeout_ms);
                        return Ok(WindowOutcome::NotFound);
                    }
                    if !self
                        .stop
                        .sleep_sliced(self.config.retry_interval(), self.config.slice())
                        .await
                    {
                        return Ok(WindowOutcome::Stopped);
                    }
                }
            }
        }
    }

    fn alert_not_found(&mut self) {
        if self.has_alerted {
            return;
        }
        self.has_alerted = true;
        self.summary.alerts += 1;

        let text = if self.last_window_empty {
            AutomationError::ConfigurationEmpty {
                folders: self.templates.describe(),
            }
            .to_string()
        } else {
            format!("Not found within {:.1}s", self.config.timeout_ms as f64 / 1000.0)
        };
        log::warn!("🔔 {}", text);
        self.events.toast(Toast::alert(text, ALERT_TOAST_MS));
    }
}

/// Start the production scan loop on its own named thread with a
/// current-thread runtime. Drivers are created on that thread.
pub fn spawn_scan_worker(
    config: ScanConfig,
    catalog: TemplateCatalog,
    events: EventSender,
    stop: StopSignal,
) -> AutomationResult<JoinHandle<AutomationResult<SessionSummary>>> {
    let handle = std::thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
            let input = match EnigoInput::new() {
                Ok(input) => input,
                Err(e) => {
                    events.send(AutomationEvent::SessionAborted(e.to_string()));
                    return Err(e);
                }
            };
            let correlator = NccCorrelator::new(config.pyramid_factor);
            let mut scheduler = ScanScheduler::new(
                config,
                XcapScreen::new(),
                FolderTemplates::new(catalog),
                correlator,
                input,
                events,
                stop,
            );
            runtime.block_on(scheduler.run())
        })?;
    Ok(handle)
}

//! Scripted typing of a line-oriented text resource
//!
//! One session at a time, cancellable between characters.

use super::channels::EventSender;
use super::config::ScanConfig;
use super::signal::CancelFlag;
use super::types::Toast;
use crate::error::{AutomationError, AutomationResult};
use crate::input::{EnigoInput, InputDriver, KeyChord};
use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};

const TYPING_THREAD_NAME: &str = "typist";
const RESULT_TOAST_MS: u64 = 2500;

/// Result of a playback session. Cancellation is an outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed { lines: usize },
    /// `line` is the 1-based line in progress when the cancel was seen
    Interrupted { line: usize },
}

#[derive(Debug, Clone)]
pub struct TypingTiming {
    pub char_delay: Duration,
    pub jitter_min_ms: u64,
    pub jitter_max_ms: u64,
    pub submit: KeyChord,
}

impl TypingTiming {
    pub fn from_config(config: &ScanConfig) -> AutomationResult<Self> {
        Ok(Self {
            char_delay: Duration::from_millis(config.type_char_delay_ms),
            jitter_min_ms: config.line_jitter_min_ms,
            jitter_max_ms: config.line_jitter_max_ms.max(config.line_jitter_min_ms),
            submit: KeyChord::parse(&config.line_submit)?,
        })
    }
}

/// Split text into lines: leading BOM removed, CRLF and lone CR treated as
/// line breaks, blank lines kept.
pub fn split_lines(raw: &str) -> Vec<String> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn load_text_lines(path: &Path) -> AutomationResult<Vec<String>> {
    let unavailable = || AutomationError::TextResourceUnavailable {
        path: path.to_path_buf(),
    };
    let bytes = std::fs::read(path).map_err(|_| unavailable())?;
    let lines = split_lines(&String::from_utf8_lossy(&bytes));
    if lines.is_empty() {
        return Err(unavailable());
    }
    Ok(lines)
}

/// Type every line followed by the submit chord and a random pause.
/// Input failures are logged and typing carries on.
pub async fn play_lines<I, R>(
    input: &mut I,
    lines: &[String],
    timing: &TypingTiming,
    cancel: &CancelFlag,
    rng: &mut R,
) -> PlaybackOutcome
where
    I: InputDriver + ?Sized,
    R: Rng,
{
    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        if cancel.is_cancelled() {
            return PlaybackOutcome::Interrupted { line: line_no };
        }

        for c in line.chars() {
            if cancel.is_cancelled() {
                return PlaybackOutcome::Interrupted { line: line_no };
            }
            if let Err(e) = input.type_char(c) {
                log::warn!("⚠️ {}", e);
            }
            if !timing.char_delay.is_zero() {
                sleep(timing.char_delay).await;
            }
        }

        if let Err(e) = input.send_chord(&timing.submit) {
            log::warn!("⚠️ {}", e);
        }
        let jitter = rng.gen_range(timing.jitter_min_ms..=timing.jitter_max_ms);
        if jitter > 0 {
            sleep(Duration::from_millis(jitter)).await;
        }
    }
    PlaybackOutcome::Completed { lines: lines.len() }
}

pub type InputFactory = Arc<dyn Fn() -> AutomationResult<Box<dyn InputDriver>> + Send + Sync>;

/// Owns the one-session gate and the cancel flag for scripted typing
#[derive(Clone)]
pub struct TypingController {
    gate: Arc<Mutex<()>>,
    cancel: CancelFlag,
    path: PathBuf,
    timing: TypingTiming,
    events: EventSender,
    input_factory: InputFactory,
}

impl TypingController {
    pub fn new(config: &ScanConfig, base_dir: &Path, events: EventSender) -> AutomationResult<Self> {
        let factory: InputFactory =
            Arc::new(|| EnigoInput::new().map(|input| Box::new(input) as Box<dyn InputDriver>));
        Self::with_input(config, base_dir, events, factory)
    }

    pub fn with_input(
        config: &ScanConfig,
        base_dir: &Path,
        events: EventSender,
        input_factory: InputFactory,
    ) -> AutomationResult<Self> {
        Ok(Self {
            gate: Arc::new(Mutex::new(())),
            cancel: CancelFlag::new(),
            path: config.typing_path(base_dir),
            timing: TypingTiming::from_config(config)?,
            events,
            input_factory,
        })
    }

    pub fn is_running(&self) -> bool {
        self.gate.try_lock().is_err()
    }

    /// Request cancellation of the running session, if any
    pub fn cancel(&self) {
        if self.is_running() {
            log::info!("⏹️ Typing cancel requested");
        }
        self.cancel.cancel();
    }

    /// Start a session on its own thread. Fails with `TypingBusy` while
    /// another session holds the gate.
    pub fn start(&self) -> AutomationResult<JoinHandle<AutomationResult<PlaybackOutcome>>> {
        let guard = self
            .gate
            .clone()
            .try_lock_owned()
            .map_err(|_| AutomationError::TypingBusy)?;
        self.cancel.rearm();

        let controller = self.clone();
        let handle = std::thread::Builder::new()
            .name(TYPING_THREAD_NAME.to_string())
            .spawn(move || {
                let _guard = guard;
                let result = controller.run_session();
                controller.report(&result);
                result
            })?;
        Ok(handle)
    }

    fn run_session(&self) -> AutomationResult<PlaybackOutcome> {
        let lines = load_text_lines(&self.path)?;
        log::info!("⌨️ Typing {} line(s) from {:?}", lines.len(), self.path);
        let mut input = (self.input_factory)()?;
        let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
        let mut rng = StdRng::from_entropy();
        Ok(runtime.block_on(play_lines(
            input.as_mut(),
            &lines,
            &self.timing,
            &self.cancel,
            &mut rng,
        )))
    }

    fn report(&self, result: &AutomationResult<PlaybackOutcome>) {
        let toast = match result {
            Ok(PlaybackOutcome::Completed { lines }) => {
                log::info!("✅ Typing finished ({} lines)", lines);
                Toast::info(format!("Typing finished ({lines} lines)"), RESULT_TOAST_MS)
            }
            Ok(PlaybackOutcome::Interrupted { line }) => {
                log::info!("⏹️ Typing cancelled at line {}", line);
                Toast::info(format!("Typing cancelled at line {line}"), RESULT_TOAST_MS)
            }
            Err(e) => {
                log::warn!("⚠️ {}", e);
                Toast::alert(e.to_string(), RESULT_TOAST_MS)
            }
        };
        self.events.toast(toast);
    }
}

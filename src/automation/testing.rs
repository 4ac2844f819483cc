// Test doubles for the scheduler, dispatcher and typing tests
use super::signal::StopSignal;
use crate::display::{DisplayRect, DisplayTopology, FrameBuffer, ScreenSource};
use crate::error::{AutomationError, AutomationResult};
use crate::input::{InputDriver, KeyChord};
use crate::template_matching::{Correlator, LoadedTemplate, Peak, TemplateSource, TemplateSpec};
use image::GrayImage;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Input driver that records every call as a short string
#[derive(Debug, Clone, Default)]
pub struct RecordingInput {
    log: Arc<Mutex<Vec<String>>>,
    failing_on: Option<&'static str>,
}

impl RecordingInput {
    pub fn failing_on(step: &'static str) -> Self {
        Self {
            failing_on: Some(step),
            ..Self::default()
        }
    }

    pub fn actions(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, step: &'static str, entry: String) -> AutomationResult<()> {
        if self.failing_on == Some(step) {
            return Err(AutomationError::action(step, "simulated failure"));
        }
        self.log.lock().unwrap().push(entry);
        Ok(())
    }
}

impl InputDriver for RecordingInput {
    fn move_pointer(&mut self, x: i32, y: i32) -> AutomationResult<()> {
        self.record("move", format!("move {x},{y}"))
    }

    fn click_primary(&mut self) -> AutomationResult<()> {
        self.record("click", "click".to_string())
    }

    fn send_chord(&mut self, chord: &KeyChord) -> AutomationResult<()> {
        self.record("key", format!("chord {chord}"))
    }

    fn type_char(&mut self, c: char) -> AutomationResult<()> {
        self.record("type", format!("type {c}"))
    }

    fn pointer_position(&self) -> AutomationResult<(i32, i32)> {
        Ok((0, 0))
    }
}

/// Screen with a fixed topology returning blank frames
#[derive(Debug, Clone)]
pub struct StaticScreen {
    topology: DisplayTopology,
    captures: Arc<AtomicUsize>,
    enumeration_failures: Arc<AtomicUsize>,
}

impl StaticScreen {
    pub fn new(displays: Vec<DisplayRect>) -> Self {
        Self {
            topology: DisplayTopology::new(displays),
            captures: Arc::new(AtomicUsize::new(0)),
            enumeration_failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail the next `count` enumerations before serving the topology
    pub fn failing_enumerations(self, count: usize) -> Self {
        self.enumeration_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn single() -> Self {
        Self::new(vec![DisplayRect::new(0, 0, 64, 48)])
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

impl ScreenSource for StaticScreen {
    fn enumerate(&mut self) -> AutomationResult<DisplayTopology> {
        let pending = self.enumeration_failures.load(Ordering::SeqCst);
        if pending > 0 {
            self.enumeration_failures.store(pending - 1, Ordering::SeqCst);
            return Err(AutomationError::DisplayEnumerationFailed {
                reason: "compositor busy".to_string(),
            });
        }
        Ok(self.topology.clone())
    }

    fn capture(&mut self, display_index: usize, rect: &DisplayRect) -> AutomationResult<FrameBuffer> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        Ok(FrameBuffer {
            display_index,
            rect: *rect,
            pixels: GrayImage::new(rect.width, rect.height),
        })
    }
}

/// Correlator returning queued scores, then a fallback score forever
#[derive(Debug)]
pub struct ScriptedScores {
    scores: Mutex<VecDeque<f32>>,
    fallback: f32,
    stop_on_call: Option<StopSignal>,
}

impl ScriptedScores {
    pub fn new(scores: &[f32], fallback: f32) -> Self {
        Self {
            scores: Mutex::new(scores.iter().copied().collect()),
            fallback,
            stop_on_call: None,
        }
    }

    /// Raise `stop` as soon as the first pair is correlated
    pub fn stopping(stop: StopSignal, score: f32) -> Self {
        Self {
            stop_on_call: Some(stop),
            ..Self::constant(score)
        }
    }

    pub fn constant(score: f32) -> Self {
        Self::new(&[], score)
    }
}

impl Correlator for ScriptedScores {
    fn peak(&self, _frame: &FrameBuffer, _template: &LoadedTemplate) -> AutomationResult<Peak> {
        if let Some(stop) = &self.stop_on_call {
            stop.trigger();
        }
        let score = self.scores.lock().unwrap().pop_front().unwrap_or(self.fallback);
        Ok(Peak { x: 10, y: 6, score })
    }
}

/// Template source serving the same in-memory set on every refresh
#[derive(Debug, Clone, Default)]
pub struct StaticTemplates {
    templates: Vec<LoadedTemplate>,
    refreshes: Arc<AtomicUsize>,
}

impl StaticTemplates {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_post_action(post_action: Option<&str>) -> Self {
        let spec = TemplateSpec::new("Folder_Type_Y/accept.png", "Folder_Type_Y", post_action.map(str::to_string));
        Self {
            templates: vec![LoadedTemplate::new(spec, GrayImage::new(8, 4))],
            refreshes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl TemplateSource for StaticTemplates {
    fn refresh(&mut self) -> Vec<LoadedTemplate> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        self.templates.clone()
    }

    fn describe(&self) -> String {
        "Folder_Type_A, Folder_Type_Y".to_string()
    }
}

// Action dispatcher - turns a confident match into pointer and key input
use crate::error::AutomationResult;
use crate::input::{InputDriver, KeyChord};
use crate::template_matching::MatchHit;
use tokio::time::{Duration, sleep};

pub struct ActionDispatcher<I: InputDriver> {
    input: I,
    settle: Duration,
}

impl<I: InputDriver> ActionDispatcher<I> {
    pub fn new(input: I, settle: Duration) -> Self {
        Self { input, settle }
    }

    /// Move to the hit, click, then send the group's post-action after the
    /// settle delay. Stops at the first failing step.
    pub async fn dispatch(&mut self, hit: &MatchHit) -> AutomationResult<()> {
        self.input.move_pointer(hit.global_x, hit.global_y)?;
        self.input.click_primary()?;
        log::debug!("🖱️ Clicked ({}, {}) on monitor #{}", hit.global_x, hit.global_y, hit.display_index);

        if let Some(action) = hit.post_action.as_deref() {
            let chord = KeyChord::parse(action)?;
            sleep(self.settle).await;
            self.input.send_chord(&chord)?;
            log::debug!("⌨️ Post-action '{}' sent", chord);
        }
        Ok(())
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::testing::RecordingInput;
    use crate::error::AutomationError;
    use tokio::time::Instant;

    fn hit(post_action: Option<&str>) -> MatchHit {
        MatchHit {
            template_identity: "Folder_Type_Y/accept.png".to_string(),
            template_name: "accept.png".to_string(),
            group: "Folder_Type_Y".to_string(),
            post_action: post_action.map(str::to_string),
            display_index: 2,
            global_x: 2040,
            global_y: 60,
            score: 0.92,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_then_post_action_after_settle() {
        let mut dispatcher = ActionDispatcher::new(RecordingInput::default(), Duration::from_millis(100));
        let start = Instant::now();
        dispatcher.dispatch(&hit(Some("y"))).await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(100));
        assert_eq!(dispatcher.input().actions(), vec!["move 2040,60", "click", "chord y"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_only_group_skips_settle() {
        let mut dispatcher = ActionDispatcher::new(RecordingInput::default(), Duration::from_millis(100));
        let start = Instant::now();
        dispatcher.dispatch(&hit(None)).await.unwrap();

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(dispatcher.input().actions(), vec!["move 2040,60", "click"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_click_reports_action_failure() {
        let input = RecordingInput::failing_on("click");
        let mut dispatcher = ActionDispatcher::new(input, Duration::from_millis(100));
        let result = dispatcher.dispatch(&hit(Some("y"))).await;

        assert!(matches!(result, Err(AutomationError::ActionFailed { step: "click", .. })));
        assert_eq!(dispatcher.input().actions(), vec!["move 2040,60"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_post_action_is_reported() {
        let mut dispatcher = ActionDispatcher::new(RecordingInput::default(), Duration::from_millis(100));
        let result = dispatcher.dispatch(&hit(Some("hyper+q"))).await;
        assert!(matches!(result, Err(AutomationError::InvalidKeyChord { .. })));
    }
}

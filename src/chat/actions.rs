//! Suggested-action presentation and activation.
//!
//! The tray holds the controls offered for the current turn only. It is
//! replaced when a response presents new actions and emptied when the next
//! send begins; activating a link-style action leaves it in place.

use crate::observability::{ACTIONS_ACTIVATED, ACTIONS_PRESENTED};
use crate::render::Renderer;
use crate::types::SuggestedAction;

/// What activating an action asks the caller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Feed the payload back through the send cycle, exactly as if the
    /// user had typed it.
    Resend(String),

    /// Surface a system notice; no navigation happens here.
    Notice(String),
}

/// The suggested actions currently on offer.
#[derive(Debug, Default)]
pub struct ActionTray {
    actions: Vec<SuggestedAction>,
}

impl ActionTray {
    /// Creates an empty tray.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tray contents and renders the new controls.
    ///
    /// An empty `actions` clears the tray and renders nothing.
    pub fn present(&mut self, actions: Vec<SuggestedAction>, renderer: &mut dyn Renderer) {
        ACTIONS_PRESENTED.click();
        self.actions = actions;
        renderer.actions(&self.actions);
    }

    /// Discards the current controls without rendering.
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Returns the current controls.
    pub fn actions(&self) -> &[SuggestedAction] {
        &self.actions
    }

    /// Returns true if no controls are on offer.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Activates the control at the given 1-based position.
    ///
    /// Returns `None` when the position names no control.
    pub fn activate(&self, position: usize) -> Option<ActionOutcome> {
        let action = self.actions.get(position.checked_sub(1)?)?;
        ACTIONS_ACTIVATED.click();
        Some(match action {
            SuggestedAction::QuickReply { payload, .. } => ActionOutcome::Resend(payload.clone()),
            SuggestedAction::ProductLink {
                text_label,
                payload,
            }
            | SuggestedAction::ReferralLink {
                text_label,
                payload,
            }
            | SuggestedAction::ExternalUrl {
                text_label,
                payload,
            } => ActionOutcome::Notice(format!("Clicked: {text_label} (Payload: {payload})")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;

    #[derive(Default)]
    struct RecordingRenderer {
        rendered: Vec<Vec<String>>,
    }

    impl Renderer for RecordingRenderer {
        fn message(&mut self, _role: MessageRole, _text: &str) {}
        fn notice(&mut self, _text: &str) {}
        fn actions(&mut self, actions: &[SuggestedAction]) {
            self.rendered
                .push(actions.iter().map(|a| a.text_label().to_string()).collect());
        }
        fn error(&mut self, _text: &str) {}
        fn info(&mut self, _text: &str) {}
    }

    fn sample_actions() -> Vec<SuggestedAction> {
        vec![
            SuggestedAction::quick_reply("Learn more", "more"),
            SuggestedAction::ProductLink {
                text_label: "Oat flakes".to_string(),
                payload: "product:42".to_string(),
            },
        ]
    }

    #[test]
    fn present_replaces_and_renders() {
        let mut tray = ActionTray::new();
        let mut renderer = RecordingRenderer::default();

        tray.present(sample_actions(), &mut renderer);
        assert_eq!(tray.actions().len(), 2);

        tray.present(Vec::new(), &mut renderer);
        assert!(tray.is_empty());
        assert_eq!(
            renderer.rendered,
            vec![vec!["Learn more".to_string(), "Oat flakes".to_string()], vec![]]
        );
    }

    #[test]
    fn quick_reply_resends_payload() {
        let mut tray = ActionTray::new();
        let mut renderer = RecordingRenderer::default();
        tray.present(sample_actions(), &mut renderer);

        assert_eq!(
            tray.activate(1),
            Some(ActionOutcome::Resend("more".to_string()))
        );
    }

    #[test]
    fn link_actions_produce_notices_and_stay() {
        let mut tray = ActionTray::new();
        let mut renderer = RecordingRenderer::default();
        tray.present(sample_actions(), &mut renderer);

        assert_eq!(
            tray.activate(2),
            Some(ActionOutcome::Notice(
                "Clicked: Oat flakes (Payload: product:42)".to_string()
            ))
        );
        // Link activation does not consume the tray.
        assert_eq!(tray.actions().len(), 2);
        assert!(tray.activate(2).is_some());
    }

    #[test]
    fn out_of_range_positions() {
        let mut tray = ActionTray::new();
        let mut renderer = RecordingRenderer::default();
        tray.present(sample_actions(), &mut renderer);

        assert!(tray.activate(0).is_none());
        assert!(tray.activate(3).is_none());
    }

    #[test]
    fn cleared_tray_activates_nothing() {
        let mut tray = ActionTray::new();
        let mut renderer = RecordingRenderer::default();
        tray.present(sample_actions(), &mut renderer);
        tray.clear();
        assert!(tray.activate(1).is_none());
    }
}

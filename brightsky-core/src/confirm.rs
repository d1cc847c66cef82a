//! Yes/no confirmation shown before asking for location permission.
//!
//! The host picks one [`ConfirmPresenter`] at startup through
//! [`presenter_for`]; callers never branch on the target themselves.

use async_trait::async_trait;
use inquire::{Confirm, InquireError, Select};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, sync::Arc};

/// What the confirmation prompt says and how its two actions are labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub title: String,
    pub message: String,
    pub dismiss_button_label: Option<String>,
    pub confirm_button_label: Option<String>,
}

impl ConfirmOptions {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            dismiss_button_label: None,
            confirm_button_label: None,
        }
    }

    pub fn with_labels(mut self, dismiss: impl Into<String>, confirm: impl Into<String>) -> Self {
        self.dismiss_button_label = Some(dismiss.into());
        self.confirm_button_label = Some(confirm.into());
        self
    }

    pub fn dismiss_label(&self) -> &str {
        self.dismiss_button_label.as_deref().unwrap_or("Cancel")
    }

    pub fn confirm_label(&self) -> &str {
        self.confirm_button_label.as_deref().unwrap_or("OK")
    }
}

#[async_trait]
pub trait ConfirmPresenter: Send + Sync + Debug {
    /// Resolves once the user has answered. Never fails: anything that keeps
    /// the prompt from being answered counts as a decline.
    async fn confirm(&self, options: &ConfirmOptions) -> bool;
}

/// Where the client is running, which decides how confirmations look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeTarget {
    #[default]
    Native,
    Web,
}

impl RuntimeTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeTarget::Native => "native",
            RuntimeTarget::Web => "web",
        }
    }

    pub const fn all() -> &'static [RuntimeTarget] {
        &[RuntimeTarget::Native, RuntimeTarget::Web]
    }
}

impl std::fmt::Display for RuntimeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RuntimeTarget {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "native" => Ok(RuntimeTarget::Native),
            "web" => Ok(RuntimeTarget::Web),
            _ => Err(anyhow::anyhow!(
                "Unknown runtime target '{value}'. Supported targets: native, web."
            )),
        }
    }
}

/// Presenter matching the runtime target.
pub fn presenter_for(target: RuntimeTarget) -> Arc<dyn ConfirmPresenter> {
    match target {
        RuntimeTarget::Native => Arc::new(ModalConfirm),
        RuntimeTarget::Web => Arc::new(InlineConfirm),
    }
}

/// Modal with a title, a message and exactly two actions. Escape does not
/// close it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModalConfirm;

#[async_trait]
impl ConfirmPresenter for ModalConfirm {
    async fn confirm(&self, options: &ConfirmOptions) -> bool {
        let header = format!("{}\n  {}", options.title, options.message);
        let actions = vec![
            options.dismiss_label().to_string(),
            options.confirm_label().to_string(),
        ];

        let answer = tokio::task::spawn_blocking(move || prompt_modal(&header, actions)).await;
        settle(answer)
    }
}

fn prompt_modal(header: &str, actions: Vec<String>) -> Result<bool, InquireError> {
    loop {
        let picked = Select::new(header, actions.clone())
            .with_starting_cursor(1)
            .with_help_message("↑↓ to move, enter to choose")
            .raw_prompt();

        match picked {
            Ok(choice) => return Ok(choice.index == 1),
            Err(InquireError::OperationCanceled) => continue,
            Err(err) => return Err(err),
        }
    }
}

/// Single blocking yes/no question showing only the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineConfirm;

#[async_trait]
impl ConfirmPresenter for InlineConfirm {
    async fn confirm(&self, options: &ConfirmOptions) -> bool {
        let message = options.message.clone();
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new(&message).with_default(false).prompt()
        })
        .await;
        settle(answer)
    }
}

/// Answers every confirmation the same way, for hosts that cannot prompt.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl ConfirmPresenter for AutoConfirm {
    async fn confirm(&self, options: &ConfirmOptions) -> bool {
        tracing::debug!(title = %options.title, answer = self.0, "auto-answering confirmation");
        self.0
    }
}

fn settle(answer: Result<Result<bool, InquireError>, tokio::task::JoinError>) -> bool {
    match answer {
        Ok(Ok(choice)) => choice,
        Ok(Err(err)) => {
            tracing::warn!("Confirmation prompt could not be shown: {err}");
            false
        }
        Err(err) => {
            tracing::warn!("Confirmation prompt task failed: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_default_to_cancel_and_ok() {
        let opts = ConfirmOptions::new("Title", "Message");
        assert_eq!(opts.dismiss_label(), "Cancel");
        assert_eq!(opts.confirm_label(), "OK");
    }

    #[test]
    fn labels_can_be_overridden() {
        let opts = ConfirmOptions::new("Title", "Message").with_labels("Don't Allow", "Allow");
        assert_eq!(opts.dismiss_label(), "Don't Allow");
        assert_eq!(opts.confirm_label(), "Allow");
    }

    #[test]
    fn runtime_target_roundtrip() {
        for target in RuntimeTarget::all() {
            let parsed = RuntimeTarget::try_from(target.as_str()).expect("roundtrip should succeed");
            assert_eq!(*target, parsed);
        }
    }

    #[test]
    fn unknown_runtime_target_error() {
        let err = RuntimeTarget::try_from("desktop").unwrap_err();
        assert!(err.to_string().contains("Unknown runtime target"));
    }

    #[test]
    fn presenter_follows_runtime_target() {
        assert_eq!(format!("{:?}", presenter_for(RuntimeTarget::Native)), "ModalConfirm");
        assert_eq!(format!("{:?}", presenter_for(RuntimeTarget::Web)), "InlineConfirm");
    }

    #[test]
    fn interrupted_prompt_settles_as_decline() {
        assert!(!settle(Ok(Err(InquireError::OperationInterrupted))));
        assert!(settle(Ok(Ok(true))));
    }

    #[tokio::test]
    async fn auto_confirm_answers_fixed_value() {
        let opts = ConfirmOptions::new("Title", "Message");
        assert!(AutoConfirm(true).confirm(&opts).await);
        assert!(!AutoConfirm(false).confirm(&opts).await);
    }
}

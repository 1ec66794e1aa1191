//! Hand-off of prompts between generation modes.

use atelier_core::Mode;
use std::collections::HashMap;

/// Relays a prompt from one mode into another.
///
/// # Examples
///
/// ```
/// use atelier_core::Mode;
/// use atelier_studio::PromptRouter;
///
/// let mut router = PromptRouter::default();
/// router.send("a fox in the snow", Mode::Video);
///
/// assert_eq!(router.active(), Mode::Video);
/// assert_eq!(router.take_initial(Mode::Video).as_deref(), Some("a fox in the snow"));
/// assert_eq!(router.take_initial(Mode::Video), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptRouter {
    active: Mode,
    initial: HashMap<Mode, String>,
}

impl PromptRouter {
    /// Store `prompt` as the initial input of `target` and switch to it.
    ///
    /// Any string is accepted, including an empty one.
    pub fn send(&mut self, prompt: impl Into<String>, target: Mode) {
        self.initial.insert(target, prompt.into());
        self.active = target;
    }

    /// The active mode.
    pub fn active(&self) -> Mode {
        self.active
    }

    /// Switch modes without handing anything over.
    pub fn activate(&mut self, mode: Mode) {
        self.active = mode;
    }

    /// The pending initial input of `mode`.
    pub fn initial(&self, mode: Mode) -> Option<&str> {
        self.initial.get(&mode).map(String::as_str)
    }

    /// Consume the pending initial input of `mode`.
    pub fn take_initial(&mut self, mode: Mode) -> Option<String> {
        self.initial.remove(&mode)
    }
}

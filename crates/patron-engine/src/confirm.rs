//! External confirmation channel capability.
//!
//! Presents a finite set of labeled choices to an operator and returns
//! exactly one, or a distinguished "cancelled" result. Used for
//! interactive duplicate resolution; date clarifications are resolved
//! through explicit pending-operation values instead (see
//! [`patron_model::PendingClarification`]).

use std::collections::VecDeque;

/// One synchronous operator decision.
pub trait ConfirmChannel {
    /// Returns the index of the chosen label, or `None` when the
    /// operator cancelled.
    fn choose(&mut self, prompt: &str, choices: &[&str]) -> Option<usize>;
}

/// A pre-scripted feed of answers, consumed in order. Once the script
/// is exhausted every further question is answered with "cancelled".
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<Option<usize>>,
    pub prompts: Vec<String>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = Option<usize>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }
}

impl ConfirmChannel for ScriptedConfirm {
    fn choose(&mut self, prompt: &str, _choices: &[&str]) -> Option<usize> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().flatten()
    }
}

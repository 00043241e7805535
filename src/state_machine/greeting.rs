use std::sync::Mutex;
use std::time::Duration;

use crate::providers::ContextProvider;

/// States of one greeting interaction. `Finished` is terminal until an
/// explicit [`GreetingStateMachine::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Engaging,
    Conversing,
    Concluding,
    Finished,
}

struct Inner {
    state: ConversationState,
    silence_started_at: Option<f64>,
}

/// Drives one greeting conversation's lifecycle from LLM-reported state,
/// a silence timer, and an explicit reset signal from the
/// approaching-person background.
///
/// On transition into `Finished`, writes `greeting_conversation_finished`
/// into the shared [`ContextProvider`] so downstream actions can suppress
/// repeat greetings without polling this state machine directly.
pub struct GreetingStateMachine {
    inner: Mutex<Inner>,
    silence_timeout: Duration,
}

impl GreetingStateMachine {
    pub fn new(silence_timeout: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: ConversationState::Engaging,
                silence_started_at: None,
            }),
            silence_timeout,
        }
    }

    pub fn current_state(&self) -> ConversationState {
        self.inner.lock().unwrap().state
    }

    /// Advance the machine with the LLM's reported `conversation_state`
    /// for this tick and the current monotonic time. Returns the
    /// resulting state.
    pub fn process_conversation(
        &self,
        llm_reported_state: ConversationState,
        now: f64,
        context: &ContextProvider,
    ) -> ConversationState {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == ConversationState::Finished {
            return inner.state;
        }

        if llm_reported_state == ConversationState::Engaging {
            inner.silence_started_at = None;
        } else if inner.silence_started_at.is_none() {
            inner.silence_started_at = Some(now);
        }

        inner.state = llm_reported_state;

        let silence_elapsed = inner
            .silence_started_at
            .map(|started| now - started)
            .unwrap_or(0.0);
        if inner.state == ConversationState::Concluding
            && silence_elapsed >= self.silence_timeout.as_secs_f64()
        {
            inner.state = ConversationState::Finished;
        }

        if inner.state == ConversationState::Finished {
            context.set("greeting_conversation_finished", "true");
        }

        inner.state
    }

    /// Explicit reset fired by the approaching-person background when a
    /// new person is detected.
    pub fn reset(&self, context: &ContextProvider) {
        let mut inner = self.inner.lock().unwrap();
        inner.state = ConversationState::Engaging;
        inner.silence_started_at = None;
        context.clear("greeting_conversation_finished");
    }
}

//! The two explicit state machines owned by the core runtime. Everything
//! else that looks state-machine-shaped (navigation stacks, action
//! connectors) is the action/LLM layer's responsibility, not the core's.

pub mod greeting;
pub mod navigation;

pub use greeting::{ConversationState, GreetingStateMachine};
pub use navigation::{NavigationState, NavigationStateTracker};

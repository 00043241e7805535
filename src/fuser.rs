use crate::action::{describe_value_type, AgentAction};
use crate::io_state::IoState;
use crate::message::monotonic_seconds;
use crate::sensor::Sensor;

/// The three configuration-provided system-prompt sections, concatenated
/// in fixed order by [`Fuser::fuse`].
#[derive(Debug, Clone, Default)]
pub struct SystemPromptSections {
    pub base: String,
    pub governance: String,
    pub examples: String,
}

/// Builds the single prompt string handed to the LLM Adapter each tick.
///
/// The output depends only on current buffer contents and the registered
/// action set — it is pure with respect to those inputs, so the same
/// buffers and action catalog always fuse to the same string.
pub struct Fuser {
    sections: SystemPromptSections,
}

impl Fuser {
    pub fn new(sections: SystemPromptSections) -> Self {
        Self { sections }
    }

    /// Build the prompt from (a) the three system-prompt sections, (b)
    /// every sensor's currently formatted buffer in declaration order
    /// (skipping empty ones), (c) a description of every non-excluded
    /// action, and (d) the fixed closing directive. Records start/end
    /// timestamps and a diagnostic snapshot in `io_state`.
    pub fn fuse(
        &self,
        sensors: &mut [Box<dyn Sensor>],
        actions: &[AgentAction],
        io_state: &IoState,
    ) -> String {
        io_state.mark_fuser_start(monotonic_seconds());

        let system_prompt = format!(
            "\nBASIC CONTEXT:\n{}\n\nLAWS:\n{}\n\nEXAMPLES:\n{}",
            self.sections.base, self.sections.governance, self.sections.examples
        );

        let inputs = sensors
            .iter_mut()
            .filter_map(|s| s.formatted_latest_buffer())
            .collect::<Vec<_>>()
            .join("\n");

        let action_descriptions = actions
            .iter()
            .filter(|a| !a.exclude_from_prompt)
            .map(describe_action)
            .collect::<Vec<_>>()
            .join("\n\n");

        let available_actions = format!("AVAILABLE ACTIONS:\n\n{action_descriptions}\n\n\n\nWhat will you do? Actions:");

        let prompt = format!(
            "{system_prompt}\n\nAVAILABLE INPUTS:\n{inputs}\n{available_actions}"
        );

        io_state.record_fuser_output(&system_prompt, &inputs, &available_actions);
        io_state.mark_fuser_end(monotonic_seconds());

        prompt
    }
}

/// Render one action's catalog entry from its interface docstring and the
/// enumerated type of its input (enum values listed inline, generic types
/// stringified).
pub fn describe_action(action: &AgentAction) -> String {
    format!(
        "{} ({}): {}",
        action.llm_label,
        describe_value_type(&action.interface.value_type),
        action.interface.doc
    )
}

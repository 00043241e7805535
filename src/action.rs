use std::sync::Arc;

/// The type-level description of an action's single scalar argument.
///
/// Mirrors the function-schema type mapping in the LLM Adapter: `String` →
/// JSON string, `Integer` → integer, `Float` → number, `Bool` → boolean,
/// `Enum` → string with an `enum` constraint, `List` → array of `T`,
/// `Optional` → `T` but nullable. Anything not representable here falls
/// back to `String` at the schema-generation boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    String,
    Integer,
    Float,
    Bool,
    Enum(Vec<String>),
    List(Box<ValueType>),
    Optional(Box<ValueType>),
}

/// A typed description of an action's argument, shown to the LLM as a
/// function parameter. `input` and `output` coincide for every action in
/// this corpus (pass-through), so a single `value_type` describes both.
#[derive(Debug, Clone)]
pub struct ActionInterface {
    pub value_type: ValueType,
    /// Shown to the LLM as the function/parameter description.
    pub doc: String,
}

impl ActionInterface {
    pub fn new(value_type: ValueType, doc: impl Into<String>) -> Self {
        Self {
            value_type,
            doc: doc.into(),
        }
    }
}

/// Registration record created at startup by the [`crate::registry`] and
/// immutable thereafter.
#[derive(Clone)]
pub struct AgentAction {
    pub name: String,
    pub llm_label: String,
    pub interface: Arc<ActionInterface>,
    /// Name of the registered connector this action routes to.
    pub connector: String,
    pub exclude_from_prompt: bool,
}

/// A command the LLM chose for one tick. Produced by the LLM Adapter from
/// one tool call; consumed by the Action Dispatcher. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Matches a registered action's `llm_label`.
    pub action_type: String,
    /// The single scalar argument the action accepts.
    pub value: String,
}

impl Action {
    pub fn new(action_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            value: value.into(),
        }
    }
}

/// Render an enum/list/optional type's description suffix used in the
/// Fuser's action catalog (e.g. `"one of: happy, sad, angry"`).
pub fn describe_value_type(value_type: &ValueType) -> String {
    match value_type {
        ValueType::String => "free text".to_string(),
        ValueType::Integer => "an integer".to_string(),
        ValueType::Float => "a number".to_string(),
        ValueType::Bool => "true or false".to_string(),
        ValueType::Enum(values) => format!("one of: {}", values.join(", ")),
        ValueType::List(inner) => format!("a list of {}", describe_value_type(inner)),
        ValueType::Optional(inner) => format!("(optional) {}", describe_value_type(inner)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_enum_values_inline() {
        let vt = ValueType::Enum(vec!["happy".into(), "sad".into()]);
        assert_eq!(describe_value_type(&vt), "one of: happy, sad");
    }

    #[test]
    fn describes_optional_list() {
        let vt = ValueType::Optional(Box::new(ValueType::List(Box::new(ValueType::Integer))));
        assert_eq!(describe_value_type(&vt), "(optional) a list of an integer");
    }
}

use serde_json::{json, Value};

use crate::action::{AgentAction, ValueType};

/// Map a [`ValueType`] to its OpenAI function-parameter JSON schema,
/// mirroring the original function-call provider's type mapping:
/// `Optional` unwraps to its inner schema, `List` becomes an `array` of
/// the inner schema, everything else maps to a primitive JSON type.
pub fn value_type_to_json_schema(value_type: &ValueType) -> Value {
    match value_type {
        ValueType::String => json!({ "type": "string" }),
        ValueType::Integer => json!({ "type": "integer" }),
        ValueType::Float => json!({ "type": "number" }),
        ValueType::Bool => json!({ "type": "boolean" }),
        ValueType::Enum(values) => json!({ "type": "string", "enum": values }),
        ValueType::List(inner) => json!({
            "type": "array",
            "items": value_type_to_json_schema(inner),
        }),
        ValueType::Optional(inner) => value_type_to_json_schema(inner),
    }
}

/// Build one action's OpenAI-style tool schema. Every action takes a
/// single scalar `value` argument, matching [`crate::action::Action`].
pub fn build_tool_schema(action: &AgentAction) -> Value {
    let mut value_schema = value_type_to_json_schema(&action.interface.value_type);
    if let Value::Object(ref mut map) = value_schema {
        map.insert("description".to_string(), json!(action.interface.doc));
    }

    json!({
        "type": "function",
        "function": {
            "name": action.llm_label,
            "description": action.interface.doc,
            "parameters": {
                "type": "object",
                "properties": {
                    "value": value_schema,
                },
                "required": ["value"],
                "additionalProperties": false,
            },
            "strict": true,
        }
    })
}

pub fn build_tool_schemas(actions: &[AgentAction]) -> Vec<Value> {
    actions.iter().map(build_tool_schema).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionInterface;
    use std::sync::Arc;

    fn action(value_type: ValueType) -> AgentAction {
        AgentAction {
            name: "speak".to_string(),
            llm_label: "speak".to_string(),
            interface: Arc::new(ActionInterface::new(value_type, "say something")),
            connector: "tts".to_string(),
            exclude_from_prompt: false,
        }
    }

    #[test]
    fn enum_type_becomes_string_with_enum_constraint() {
        let schema = build_tool_schema(&action(ValueType::Enum(vec!["happy".into(), "sad".into()])));
        let value_schema = &schema["function"]["parameters"]["properties"]["value"];
        assert_eq!(value_schema["type"], "string");
        assert_eq!(value_schema["enum"], json!(["happy", "sad"]));
    }

    #[test]
    fn optional_unwraps_to_inner_schema() {
        let schema = build_tool_schema(&action(ValueType::Optional(Box::new(ValueType::Integer))));
        let value_schema = &schema["function"]["parameters"]["properties"]["value"];
        assert_eq!(value_schema["type"], "integer");
    }

    #[test]
    fn function_name_matches_llm_label() {
        let schema = build_tool_schema(&action(ValueType::String));
        assert_eq!(schema["function"]["name"], "speak");
        assert_eq!(schema["function"]["parameters"]["required"], json!(["value"]));
    }
}

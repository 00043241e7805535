use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// One `{ type, config }` pair as it appears under `agent_inputs`,
/// `simulators`, and `backgrounds` — `type` names a registered plugin
/// constructor; `config` is handed to it verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginEntry {
    #[serde(rename = "type")]
    pub plugin_type: String,
    #[serde(default)]
    pub config: Option<toml::Value>,
}

/// One entry under `agent_actions`: binds a catalog name to a connector and
/// the label shown to the LLM.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionEntry {
    pub name: String,
    pub llm_label: String,
    pub connector: String,
    #[serde(default)]
    pub config: Option<toml::Value>,
    #[serde(default)]
    pub exclude_from_prompt: bool,
}

/// `cortex_llm = { type = "...", config = { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmEntry {
    #[serde(rename = "type")]
    pub backend_type: String,
    #[serde(default)]
    pub config: LlmConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout: Option<f64>,
    pub temperature: Option<f64>,
}

/// The subset of top-level keys a single mode (or the single-mode root
/// document) carries.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeConfig {
    pub hertz: f64,
    pub system_prompt_base: String,
    pub system_governance: String,
    pub system_prompt_examples: String,
    pub cortex_llm: LlmEntry,
    #[serde(default)]
    pub agent_inputs: Vec<PluginEntry>,
    #[serde(default)]
    pub agent_actions: Vec<ActionEntry>,
    #[serde(default)]
    pub simulators: Vec<PluginEntry>,
    #[serde(default)]
    pub backgrounds: Vec<PluginEntry>,
}

/// Top-level runtime configuration. Single-mode documents carry a
/// `ModeConfig` directly at the root; multi-mode documents instead carry a
/// `modes` table and select among them at runtime. Schema choice follows
/// the presence of the `modes` key, matching the original loader's
/// single/multi schema split.
#[derive(Debug, Clone)]
pub enum RuntimeConfig {
    Single(ModeConfig),
    Multi {
        modes: HashMap<String, ModeConfig>,
        default_mode: Option<String>,
    },
}

impl RuntimeConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let value: toml::Value = toml::from_str(raw)?;
        let table = value
            .as_table()
            .ok_or_else(|| ConfigError::WrongType {
                field: "<root>",
                detail: "expected a table at the document root".to_string(),
            })?;

        if table.contains_key("modes") {
            let modes_value = table
                .get("modes")
                .cloned()
                .expect("checked contains_key above");
            let modes_table = modes_value.as_table().ok_or_else(|| ConfigError::WrongType {
                field: "modes",
                detail: "expected a table of mode name -> mode config".to_string(),
            })?;
            let mut modes = HashMap::new();
            for (name, mode_value) in modes_table {
                let mode = ModeConfig::deserialize(mode_value.clone())?;
                modes.insert(name.clone(), mode);
            }
            let default_mode = table
                .get("default_mode")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string());
            Ok(RuntimeConfig::Multi {
                modes,
                default_mode,
            })
        } else {
            let mode = ModeConfig::deserialize(value)?;
            Ok(RuntimeConfig::Single(mode))
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|_| {
            ConfigError::MissingField("<config file>")
        })?;
        Self::from_toml_str(&raw)
    }

    /// Resolve the active mode: `Single` configs have exactly one, `Multi`
    /// configs resolve by name (falling back to `default_mode`).
    pub fn resolve(&self, requested_mode: Option<&str>) -> Result<&ModeConfig, ConfigError> {
        match self {
            RuntimeConfig::Single(mode) => Ok(mode),
            RuntimeConfig::Multi {
                modes,
                default_mode,
            } => {
                let name = requested_mode
                    .or(default_mode.as_deref())
                    .ok_or(ConfigError::MissingField("mode"))?;
                modes
                    .get(name)
                    .ok_or_else(|| ConfigError::UnknownPlugin(name.to_string()))
            }
        }
    }
}

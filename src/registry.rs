use std::sync::Arc;

use crate::action::{Action, ActionInterface, AgentAction, ValueType};
use crate::background::BackgroundTask;
use crate::config::{ActionEntry, LlmEntry, ModeConfig, PluginEntry};
use crate::connector::Connector;
use crate::error::ConnectorError;
use crate::llm::{LlmBackend, OpenAiCompatibleBackend};
use crate::sensor::Sensor;

/// The Plugin Loader: the only place in the runtime that turns a
/// configuration string naming a plugin `type` into a constructed
/// instance. Individual device-specific sensors, connectors, and
/// backgrounds are deployment concerns outside this core's scope — this
/// registry is the seam where they would be registered, following the
/// same `type` string dispatch as every other entry point here.
pub struct Registry;

impl Registry {
    /// Instantiate every configured sensor. Unknown `type` strings are a
    /// startup-fatal [`crate::error::ConfigError`], never a runtime one —
    /// a misconfigured plugin must never be discovered mid-run.
    pub fn build_sensors(
        entries: &[PluginEntry],
    ) -> Result<Vec<Box<dyn Sensor>>, crate::error::ConfigError> {
        let mut sensors = Vec::new();
        for entry in entries {
            sensors.push(Self::build_sensor(entry)?);
        }
        Ok(sensors)
    }

    fn build_sensor(entry: &PluginEntry) -> Result<Box<dyn Sensor>, crate::error::ConfigError> {
        Err(crate::error::ConfigError::UnknownPlugin(entry.plugin_type.clone()))
    }

    pub fn build_backgrounds(
        entries: &[PluginEntry],
    ) -> Result<Vec<Arc<dyn BackgroundTask>>, crate::error::ConfigError> {
        let mut backgrounds = Vec::new();
        for entry in entries {
            backgrounds.push(Self::build_background(entry)?);
        }
        Ok(backgrounds)
    }

    fn build_background(
        entry: &PluginEntry,
    ) -> Result<Arc<dyn BackgroundTask>, crate::error::ConfigError> {
        Err(crate::error::ConfigError::UnknownPlugin(entry.plugin_type.clone()))
    }

    /// Build each registered action's connector. `NullConnector` is the
    /// one built-in connector: it logs and accepts every action, letting a
    /// config reference an action before its real connector is wired up
    /// (useful for dry runs and tests) without failing the whole loader.
    pub fn build_connector(
        entry: &ActionEntry,
    ) -> Result<Arc<dyn Connector>, crate::error::ConfigError> {
        match entry.connector.as_str() {
            "null" => Ok(Arc::new(NullConnector {
                name: entry.connector.clone(),
            })),
            other => Err(crate::error::ConfigError::UnknownPlugin(other.to_string())),
        }
    }

    pub fn build_agent_actions(entries: &[ActionEntry]) -> Vec<AgentAction> {
        entries
            .iter()
            .map(|entry| AgentAction {
                name: entry.name.clone(),
                llm_label: entry.llm_label.clone(),
                interface: Arc::new(ActionInterface::new(ValueType::String, &entry.name)),
                connector: entry.connector.clone(),
                exclude_from_prompt: entry.exclude_from_prompt,
            })
            .collect()
    }

    pub fn build_llm_backend(
        entry: &LlmEntry,
    ) -> Result<Arc<dyn LlmBackend>, crate::error::ConfigError> {
        match entry.backend_type.as_str() {
            "openai_compatible" | "ollama" => {
                Ok(Arc::new(OpenAiCompatibleBackend::new(&entry.config)))
            }
            other => Err(crate::error::ConfigError::UnknownPlugin(other.to_string())),
        }
    }

    pub fn validate_mode(mode: &ModeConfig) -> Result<(), crate::error::ConfigError> {
        for action in &mode.agent_actions {
            Self::build_connector(action)?;
        }
        Ok(())
    }
}

/// Accepts and logs every action without forwarding it anywhere. Used as
/// the placeholder connector name `"null"` for actions under development.
struct NullConnector {
    name: String,
}

#[async_trait::async_trait]
impl Connector for NullConnector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn connect(&self, action: &Action) -> Result<(), ConnectorError> {
        tracing::debug!(action_type = %action.action_type, value = %action.value, "null connector accepted action");
        Ok(())
    }
}

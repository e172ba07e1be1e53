use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::SharedSettings;

/// A point-in-time view of the server's configuration: the application
/// settings and, optionally, the process environment.
///
/// Built fresh for every request. The `env` field is omitted from the
/// serialized form entirely when environment variables are excluded.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConfigSnapshot {
    pub settings: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
}

impl ConfigSnapshot {
    /// Capture the live application settings and, when requested, the
    /// process environment as it stands at this instant.
    pub fn capture(settings: &SharedSettings, include_env_vars: bool) -> Self {
        ConfigSnapshot {
            settings: settings.read().expect("settings lock poisoned").clone(),
            env: include_env_vars.then(|| std::env::vars().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use super::*;
    use serde_json::json;

    /// Test that a snapshot without env serializes with no `env` key at all.
    #[test]
    fn test_env_field_omitted_when_absent() {
        let snapshot = ConfigSnapshot {
            settings: BTreeMap::new(),
            env: None,
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("env").is_none());
        assert!(value.get("settings").is_some());
    }

    /// Test that capture reads the settings map live, not a startup copy.
    #[test]
    fn test_capture_observes_settings_mutation() {
        let settings: SharedSettings = Arc::new(RwLock::new(BTreeMap::new()));

        settings
            .write()
            .unwrap()
            .insert("mode".to_string(), json!("maintenance"));

        let snapshot = ConfigSnapshot::capture(&settings, false);
        assert_eq!(snapshot.settings.get("mode"), Some(&json!("maintenance")));
        assert!(snapshot.env.is_none());
    }

    /// Test that capture picks up environment variables set after startup.
    #[test]
    fn test_capture_reads_live_environment() {
        std::env::set_var("CONFIGOTRON_SNAPSHOT_TEST", "42");

        let settings: SharedSettings = Arc::new(RwLock::new(BTreeMap::new()));
        let snapshot = ConfigSnapshot::capture(&settings, true);

        let env = snapshot.env.expect("env should be captured");
        assert_eq!(
            env.get("CONFIGOTRON_SNAPSHOT_TEST").map(String::as_str),
            Some("42")
        );
    }
}

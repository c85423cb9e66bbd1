use serde::{Deserialize, Serialize};

/// Host-provided engine knobs.
///
/// Deserializable so hosts can carry it in their own configuration files;
/// the builder covers programmatic setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// When a uid has no entry in the current dictionary, lookups return the
    /// uid itself instead of an empty value. Off by default so unfinished
    /// dictionaries fail soft in release UIs; turn it on to make missing
    /// entries visible during development.
    #[builder(default)]
    pub use_uid_when_not_found: bool,

    /// Skip installing a toolkit binding's built-in action set. Custom
    /// actions appended afterwards are unaffected.
    #[builder(default)]
    pub disable_default_actions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_conservative() {
        let config = EngineConfig::default();
        assert!(!config.use_uid_when_not_found);
        assert!(!config.disable_default_actions);
    }

    #[test]
    fn builder_covers_every_knob() {
        let config = EngineConfig::builder()
            .use_uid_when_not_found(true)
            .disable_default_actions(true)
            .build();
        assert!(config.use_uid_when_not_found);
        assert!(config.disable_default_actions);
    }

    #[test]
    fn config_files_use_kebab_case_keys_and_omitted_knobs_default() {
        let config: EngineConfig = toml::from_str("use-uid-when-not-found = true").unwrap();
        assert!(config.use_uid_when_not_found);
        assert!(!config.disable_default_actions);

        let rendered = toml::to_string(&config).unwrap();
        assert!(rendered.contains("use-uid-when-not-found = true"));
        assert!(rendered.contains("disable-default-actions = false"));
    }
}

//! Provider credentials, resolved once at start-up.

use super::file_config::FileProvidersConfig;

/// API keys per provider; `None` disables that provider's backends
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub openai: Option<String>,
    pub anthropic: Option<String>,
    pub gemini: Option<String>,
}

impl ProviderCredentials {
    /// Resolve from the process environment
    pub fn from_env(config: &FileProvidersConfig) -> Self {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    /// Resolve with an explicit variable lookup.
    ///
    /// The variable named by `api_key_env` wins over an inline `api_key`.
    /// Blank values count as absent.
    pub fn resolve(config: &FileProvidersConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |env_name: &str, inline: &Option<String>| {
            lookup(env_name)
                .or_else(|| inline.clone())
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty())
        };

        Self {
            openai: pick(&config.openai.api_key_env, &config.openai.api_key),
            anthropic: pick(&config.anthropic.api_key_env, &config.anthropic.api_key),
            gemini: pick(&config.gemini.api_key_env, &config.gemini.api_key),
        }
    }
}

// Keys never appear in logs or panics
impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |key: &Option<String>| if key.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("ProviderCredentials")
            .field("openai", &mask(&self.openai))
            .field("anthropic", &mask(&self.anthropic))
            .field("gemini", &mask(&self.gemini))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_absent_keys_disable_providers() {
        let config = FileProvidersConfig::default();
        let creds = ProviderCredentials::resolve(&config, lookup(&[("OPENAI_API_KEY", "sk-1")]));
        assert_eq!(creds.openai.as_deref(), Some("sk-1"));
        assert!(creds.anthropic.is_none());
        assert!(creds.gemini.is_none());
    }

    #[test]
    fn test_blank_key_counts_as_absent() {
        let config = FileProvidersConfig::default();
        let creds = ProviderCredentials::resolve(&config, lookup(&[("GEMINI_API_KEY", "  ")]));
        assert!(creds.gemini.is_none());
    }

    #[test]
    fn test_env_wins_over_inline_key() {
        let mut config = FileProvidersConfig::default();
        config.anthropic.api_key = Some("inline".to_string());
        let creds = ProviderCredentials::resolve(&config, lookup(&[("ANTHROPIC_API_KEY", "env")]));
        assert_eq!(creds.anthropic.as_deref(), Some("env"));

        let creds = ProviderCredentials::resolve(&config, lookup(&[]));
        assert_eq!(creds.anthropic.as_deref(), Some("inline"));
    }

    #[test]
    fn test_custom_env_name() {
        let mut config = FileProvidersConfig::default();
        config.openai.api_key_env = "AZURE_OPENAI_KEY".to_string();
        let creds = ProviderCredentials::resolve(&config, lookup(&[("AZURE_OPENAI_KEY", "az")]));
        assert_eq!(creds.openai.as_deref(), Some("az"));
    }

    #[test]
    fn test_debug_masks_keys() {
        let creds = ProviderCredentials {
            openai: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<set>"));
    }
}

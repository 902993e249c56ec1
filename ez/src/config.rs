//! Ezora configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main Ezora configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR); overridden by `--log-level`
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Trip planner settings
    pub planner: PlannerConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the provider is known and its API key variable is set.
    /// Call this before issuing requests to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        let resolved = self.llm.resolve()?;
        resolved.get_api_key()?;
        if self.planner.max_days == 0 {
            return Err(eyre::eyre!("planner.max-days must be at least 1"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .ezora.yml
        let local_config = PathBuf::from(".ezora.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/ezora/ezora.yml
        if let Some(user_config) = Self::user_config_path()
            && user_config.exists()
        {
            match Self::load_from_file(&user_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is initialized
    ///
    /// Errors are swallowed: a broken config file is reported later by `load`.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates: Vec<PathBuf> = match config_path {
            Some(path) => vec![path.clone()],
            None => std::iter::once(PathBuf::from(".ezora.yml"))
                .chain(Self::user_config_path())
                .collect(),
        };

        candidates
            .into_iter()
            .find(|p| p.exists())
            .and_then(|p| fs::read_to_string(p).ok())
            .and_then(|content| serde_yaml::from_str::<Self>(&content).ok())
            .and_then(|config| config.log_level)
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ezora").join("ezora.yml"))
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
///
/// Optional fields fall back to per-provider defaults in [`LlmConfig::resolve`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("gemini" or "openai")
    pub provider: String,

    /// Model identifier
    pub model: Option<String>,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: Option<String>,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: None,
            api_key_env: None,
            base_url: None,
            max_tokens: 8192,
            timeout_ms: 120_000,
        }
    }
}

impl LlmConfig {
    /// Fill in provider defaults for every unset field
    pub fn resolve(&self) -> Result<ResolvedLlmConfig> {
        let (model, api_key_env, base_url) = match self.provider.as_str() {
            "gemini" => ("gemini-2.5-flash", "GEMINI_API_KEY", "https://generativelanguage.googleapis.com"),
            "openai" => ("gpt-4o-mini", "OPENAI_API_KEY", "https://api.openai.com"),
            other => {
                return Err(eyre::eyre!(
                    "Unknown LLM provider: '{}'. Supported: gemini, openai",
                    other
                ));
            }
        };

        Ok(ResolvedLlmConfig {
            provider: self.provider.clone(),
            model: self.model.clone().unwrap_or_else(|| model.to_string()),
            api_key_env: self.api_key_env.clone().unwrap_or_else(|| api_key_env.to_string()),
            base_url: self.base_url.clone().unwrap_or_else(|| base_url.to_string()),
            max_tokens: self.max_tokens,
            timeout_ms: self.timeout_ms,
        })
    }
}

/// Fully resolved LLM settings handed to a provider client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

impl ResolvedLlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.api_key_env
            )),
        }
    }
}

/// Trip planner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Agency name the consultant persona works for
    pub agency: String,

    /// Name of the assistant persona in the system instruction
    pub assistant: String,

    /// Upper bound for the trip duration field
    #[serde(rename = "max-days")]
    pub max_days: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            agency: "Ezora Tours".to_string(),
            assistant: "EzoraAI".to_string(),
            max_days: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.planner.agency, "Ezora Tours");
        assert_eq!(config.planner.max_days, 30);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_resolve_gemini_defaults() {
        let resolved = LlmConfig::default().resolve().unwrap();

        assert_eq!(resolved.provider, "gemini");
        assert_eq!(resolved.model, "gemini-2.5-flash");
        assert_eq!(resolved.api_key_env, "GEMINI_API_KEY");
        assert_eq!(resolved.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(resolved.max_tokens, 8192);
    }

    #[test]
    fn test_resolve_openai_defaults() {
        let config = LlmConfig {
            provider: "openai".to_string(),
            ..Default::default()
        };
        let resolved = config.resolve().unwrap();

        assert_eq!(resolved.api_key_env, "OPENAI_API_KEY");
        assert_eq!(resolved.base_url, "https://api.openai.com");
    }

    #[test]
    fn test_resolve_unknown_provider() {
        let config = LlmConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        let err = config.resolve().unwrap_err();
        assert!(err.to_string().contains("carrier-pigeon"));
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: debug

llm:
  provider: gemini
  model: gemini-2.5-pro
  api-key-env: MY_API_KEY
  base-url: https://llm.example.com
  max-tokens: 4096
  timeout-ms: 60000

planner:
  agency: Acme Travel
  assistant: AcmeBot
  max-days: 14
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.llm.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.planner.agency, "Acme Travel");
        assert_eq!(config.planner.max_days, 14);

        let resolved = config.llm.resolve().unwrap();
        assert_eq!(resolved.api_key_env, "MY_API_KEY");
        assert_eq!(resolved.base_url, "https://llm.example.com");
        assert_eq!(resolved.timeout_ms, 60_000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: gemini-2.0-flash
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.llm.model.as_deref(), Some("gemini-2.0-flash"));

        // Defaults for unspecified
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.timeout_ms, 120_000);
        assert_eq!(config.planner.assistant, "EzoraAI");
    }

    #[test]
    fn test_load_explicit_path_and_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yml");
        std::fs::write(&path, "log-level: warn\nplanner:\n  agency: Test Agency\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.planner.agency, "Test Agency");
        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("warn"));
    }

    #[test]
    fn test_load_explicit_path_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yml");
        assert!(Config::load(Some(&path)).is_err());
        assert!(Config::load_log_level(Some(&path)).is_none());
    }

    #[test]
    #[serial]
    fn test_get_api_key_from_env() {
        let resolved = LlmConfig {
            api_key_env: Some("EZORA_TEST_CONFIG_KEY".to_string()),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        // SAFETY: serialized test, no other thread reads this variable
        unsafe { std::env::remove_var("EZORA_TEST_CONFIG_KEY") };
        assert!(resolved.get_api_key().is_err());

        unsafe { std::env::set_var("EZORA_TEST_CONFIG_KEY", "   ") };
        assert!(resolved.get_api_key().is_err());

        unsafe { std::env::set_var("EZORA_TEST_CONFIG_KEY", " secret \n") };
        assert_eq!(resolved.get_api_key().unwrap(), "secret");

        unsafe { std::env::remove_var("EZORA_TEST_CONFIG_KEY") };
    }

    #[test]
    #[serial]
    fn test_validate_requires_api_key() {
        let mut config = Config::default();
        config.llm.api_key_env = Some("EZORA_TEST_VALIDATE_KEY".to_string());

        unsafe { std::env::remove_var("EZORA_TEST_VALIDATE_KEY") };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("EZORA_TEST_VALIDATE_KEY"));

        unsafe { std::env::set_var("EZORA_TEST_VALIDATE_KEY", "k") };
        assert!(config.validate().is_ok());

        config.planner.max_days = 0;
        assert!(config.validate().is_err());

        unsafe { std::env::remove_var("EZORA_TEST_VALIDATE_KEY") };
    }
}

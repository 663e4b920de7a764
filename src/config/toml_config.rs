use crate::config::{
    DEFAULT_OUTPUT_FILE, DEFAULT_PER_PAGE, DEFAULT_REGISTRY_COURSE_ID, DEFAULT_TIMEOUT_SECS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub registry_course_id: Option<u64>,
    pub fallback_module_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| EtlError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value. Unset variables are left
    /// as written so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        Self::substitute_vars(content, |name| std::env::var(name).ok())
    }

    fn substitute_vars(content: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        let token = validation::validate_required_field(
            "canvas.access_token",
            &self.canvas.access_token,
        )?;
        if ENV_VAR.is_match(token) {
            return Err(EtlError::InvalidConfigValueError {
                field: "canvas.access_token".to_string(),
                value: token.clone(),
                reason: "Environment variable is not set".to_string(),
            });
        }

        if let Some(per_page) = self.canvas.per_page {
            validation::validate_positive_number("canvas.per_page", per_page, 1)?;
        }

        crate::config::validate_provider(self).map_err(|e| match e {
            EtlError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => EtlError::InvalidConfigValueError {
                field: Self::qualified_field(&field).to_string(),
                value,
                reason,
            },
            other => other,
        })
    }

    fn qualified_field(field: &str) -> &str {
        match field {
            "base_url" => "canvas.base_url",
            "access_token" => "canvas.access_token",
            "timeout" => "canvas.timeout_seconds",
            "per_page" => "canvas.per_page",
            "registry_course_id" => "scrape.registry_course_id",
            "output_path" => "load.output_path",
            "output_file" => "load.output_file",
            other => other,
        }
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.canvas.base_url
    }

    fn access_token(&self) -> Option<&str> {
        self.canvas.access_token.as_deref()
    }

    fn registry_course_id(&self) -> u64 {
        self.scrape
            .registry_course_id
            .unwrap_or(DEFAULT_REGISTRY_COURSE_ID)
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_file(&self) -> &str {
        self.load.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    fn request_timeout_secs(&self) -> u64 {
        self.canvas.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    fn per_page(&self) -> usize {
        self.canvas.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    fn fallback_module_token(&self) -> Option<&str> {
        self.scrape
            .fallback_module_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://canvas.cmu.edu";
pub const DEFAULT_REGISTRY_COURSE_ID: u64 = 3769;
pub const DEFAULT_OUTPUT_FILE: &str = "syllabi_after_F22.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_PER_PAGE: usize = 100;

/// Canvas caps `per_page` at this value.
pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "syllabus-etl"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Scrape course syllabus links from Canvas syllabus registries")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, env = "CANVAS_BASE_URL", default_value = DEFAULT_BASE_URL))]
    pub base_url: String,

    #[cfg_attr(feature = "cli", arg(long, env = "CANVAS_ACCESS_TOKEN", hide_env_values = true))]
    #[serde(skip_serializing)]
    pub access_token: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_REGISTRY_COURSE_ID))]
    pub registry_course_id: u64,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_OUTPUT_FILE))]
    pub output_file: String,

    #[cfg_attr(feature = "cli", arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS, help = "Per-request timeout in seconds"))]
    pub timeout_secs: u64,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_PER_PAGE))]
    pub per_page: usize,

    #[cfg_attr(
        feature = "cli",
        arg(long, help = "Module name fragment to use when no module matches the term")
    )]
    pub fallback_module_token: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub json_logs: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            registry_course_id: DEFAULT_REGISTRY_COURSE_ID,
            output_path: "./output".to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            per_page: DEFAULT_PER_PAGE,
            fallback_module_token: None,
            verbose: false,
            json_logs: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    fn registry_course_id(&self) -> u64 {
        self.registry_course_id
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn per_page(&self) -> usize {
        self.per_page
    }

    fn fallback_module_token(&self) -> Option<&str> {
        self.fallback_module_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every config source. A missing token is reported here so
/// the run stops before the first request.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_url("base_url", config.base_url())?;

    let token = config
        .access_token()
        .ok_or_else(|| EtlError::MissingConfigError {
            field: "access_token".to_string(),
        })?;
    validation::validate_non_empty_string("access_token", token)?;

    validation::validate_range(
        "registry_course_id",
        config.registry_course_id(),
        1,
        u64::MAX,
    )?;
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_file_name("output_file", config.output_file())?;
    validation::validate_range("timeout", config.request_timeout_secs(), 1, 300)?;
    validation::validate_range("per_page", config.per_page(), 1, MAX_PER_PAGE)?;

    Ok(())
}

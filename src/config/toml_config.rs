use crate::adapters::http_client::DEFAULT_TIMEOUT_SECONDS;
use crate::config::DEFAULT_BASE_PATH;
use crate::domain::model::{DocumentSource, EnvelopeRequest};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EsignError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
    pub envelope: EnvelopeConfig,
    #[serde(default)]
    pub documents: Vec<DocumentConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    pub access_token: Option<String>,
    pub account_id: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            access_token: None,
            account_id: None,
            timeout_seconds: None,
        }
    }
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    #[serde(default)]
    pub signer_email: String,
    #[serde(default)]
    pub signer_name: String,
    #[serde(default)]
    pub cc_email: String,
    #[serde(default)]
    pub cc_name: String,
    pub status: Option<String>,
    pub subject: Option<String>,
    pub template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EsignError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EsignError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value. Unset variables
    /// are left untouched so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env pattern is a valid regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("connection.base_path", &self.connection.base_path)?;

        if let Some(timeout) = self.connection.timeout_seconds {
            validate_positive_number("connection.timeout_seconds", timeout, 1)?;
        }

        for (field, value) in [
            ("connection.access_token", self.connection.access_token.as_deref()),
            ("connection.account_id", self.connection.account_id.as_deref()),
        ] {
            if let Some(value) = value {
                if value.starts_with("${") {
                    return Err(EsignError::InvalidConfigValueError {
                        field: field.to_string(),
                        value: value.to_string(),
                        reason: "environment variable is not set".to_string(),
                    });
                }
            }
        }

        for document in &self.documents {
            validate_path("documents.path", &document.path)?;
        }

        if let Some(output) = &self.output {
            validate_path("output.path", &output.path)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_path(&self) -> &str {
        &self.connection.base_path
    }

    fn access_token(&self) -> Option<&str> {
        self.connection.access_token.as_deref()
    }

    fn account_id(&self) -> Option<&str> {
        self.connection.account_id.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.connection
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .map(|o| o.path.as_str())
            .unwrap_or("./output")
    }

    fn envelope_request(&self) -> Result<EnvelopeRequest> {
        let status = match &self.envelope.status {
            Some(status) => status.parse()?,
            None => crate::domain::model::EnvelopeStatus::Sent,
        };

        Ok(EnvelopeRequest {
            signer_email: self.envelope.signer_email.clone(),
            signer_name: self.envelope.signer_name.clone(),
            cc_email: self.envelope.cc_email.clone(),
            cc_name: self.envelope.cc_name.clone(),
            status,
            subject: self.envelope.subject.clone(),
            documents: self
                .documents
                .iter()
                .map(|d| DocumentSource {
                    name: d.name.clone(),
                    path: d.path.clone(),
                })
                .collect(),
            template: self.envelope.template.clone(),
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

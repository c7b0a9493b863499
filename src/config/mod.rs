pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::http_client::DEFAULT_TIMEOUT_SECONDS;
#[cfg(feature = "cli")]
use crate::domain::model::{DocumentSource, EnvelopeRequest};
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_BASE_PATH: &str = "https://demo.docusign.net/restapi";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "esign-envelope")]
#[command(about = "Assemble a multi-document signing envelope and submit it")]
pub struct CliConfig {
    #[arg(long, help = "Read settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "ESIGN_BASE_PATH", default_value = DEFAULT_BASE_PATH)]
    pub base_path: String,

    #[arg(long, env = "ESIGN_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    #[arg(long, env = "ESIGN_ACCOUNT_ID")]
    pub account_id: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long)]
    pub signer_email: Option<String>,

    #[arg(long)]
    pub signer_name: Option<String>,

    #[arg(long)]
    pub cc_email: Option<String>,

    #[arg(long)]
    pub cc_name: Option<String>,

    #[arg(long, default_value = "sent", help = "sent, or created for a draft")]
    pub status: String,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long, help = "HTML template for the title document")]
    pub template: Option<String>,

    #[arg(
        long = "document",
        help = "Document to attach, as NAME=PATH or a bare PATH (repeatable). NAME cannot contain '/'"
    )]
    pub documents: Vec<DocumentSource>,

    #[arg(long, help = "Write the request body instead of submitting it")]
    pub dry_run: bool,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    /// Missing identity flags become empty strings so the builder reports
    /// them as invalid input.
    fn envelope_request(&self) -> Result<EnvelopeRequest> {
        Ok(EnvelopeRequest {
            signer_email: self.signer_email.clone().unwrap_or_default(),
            signer_name: self.signer_name.clone().unwrap_or_default(),
            cc_email: self.cc_email.clone().unwrap_or_default(),
            cc_name: self.cc_name.clone().unwrap_or_default(),
            status: self.status.parse()?,
            subject: self.subject.clone(),
            documents: self.documents.clone(),
            template: self.template.clone(),
        })
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_path", &self.base_path)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        if self.dry_run {
            validate_path("output_path", &self.output_path)?;
        }
        for document in &self.documents {
            validate_path("document", &document.path)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags_into_request() {
        let config = CliConfig::try_parse_from([
            "esign-envelope",
            "--signer-email",
            "a@x.com",
            "--signer-name",
            "A",
            "--cc-email",
            "b@x.com",
            "--cc-name",
            "B",
            "--document",
            "Battle Plan=docs/plan.docx",
            "--document",
            "Lorem Ipsum=docs/lorem.pdf",
            "--status",
            "created",
            "--account-id",
            "acc",
        ])
        .unwrap();

        assert!(config.validate().is_ok());
        let request = config.envelope_request().unwrap();
        assert_eq!(request.status.as_str(), "created");
        assert_eq!(request.documents.len(), 2);
        assert_eq!(request.documents[0].name, "Battle Plan");
        assert_eq!(config.account_id(), Some("acc"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = CliConfig::try_parse_from([
            "esign-envelope",
            "--timeout-seconds",
            "0",
            "--account-id",
            "acc",
        ])
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(crate::utils::error::EsignError::InvalidConfigValueError { ref field, .. })
                if field == "timeout_seconds"
        ));
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        let config =
            CliConfig::try_parse_from(["esign-envelope", "--status", "voided"]).unwrap();
        assert!(config.envelope_request().is_err());
    }
}

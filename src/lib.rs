pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::toml_config::TomlConfig;

pub use crate::adapters::{
    http_client::HttpEnvelopeApi, storage::LocalStorage, wire::EnvelopeDefinition,
};
pub use crate::core::{
    builder::build_envelope,
    sender::EnvelopeSender,
    template::{render_title_document, DEFAULT_TITLE_TEMPLATE},
};
pub use crate::domain::model::{
    DocumentInput, DocumentSource, Envelope, EnvelopeArgs, EnvelopeRequest, EnvelopeStatus,
    EnvelopeSummary, Recipient,
};
pub use crate::utils::error::{EsignError, Result};

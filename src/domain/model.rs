use crate::utils::error::{EsignError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Requested state of the envelope once the remote service accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// Saved as a draft; nothing is delivered. Called "created" on the wire.
    #[serde(alias = "draft")]
    Created,
    /// Delivered to the first routing-order group immediately.
    Sent,
}

impl EnvelopeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopeStatus::Created => "created",
            EnvelopeStatus::Sent => "sent",
        }
    }
}

impl fmt::Display for EnvelopeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvelopeStatus {
    type Err = EsignError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "created" | "draft" => Ok(EnvelopeStatus::Created),
            "sent" => Ok(EnvelopeStatus::Sent),
            other => Err(EsignError::invalid_input(
                "status",
                format!("'{}' is not a valid status (expected 'sent' or 'created')", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorUnit {
    Pixels,
}

impl AnchorUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorUnit::Pixels => "pixels",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: String,
    name: String,
    file_extension: String,
    content: Vec<u8>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        file_extension: impl Into<String>,
        content: Vec<u8>,
    ) -> Result<Self> {
        let id = id.into();
        let name = name.into();
        let file_extension: String = file_extension.into();
        let file_extension = file_extension
            .trim()
            .trim_start_matches('.')
            .to_ascii_lowercase();

        if id.trim().is_empty() {
            return Err(EsignError::invalid_input("document.id", "document id cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(EsignError::invalid_input(
                "document.name",
                format!("document {} has no name", id),
            ));
        }
        if file_extension.is_empty() {
            return Err(EsignError::invalid_input(
                "document.file_extension",
                format!("document '{}' has no file extension", name),
            ));
        }
        if content.is_empty() {
            return Err(EsignError::invalid_input(
                "document.content",
                format!("document '{}' is empty", name),
            ));
        }

        Ok(Self {
            id,
            name,
            file_extension,
            content,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// A sign-here field positioned relative to an anchor string. The remote
/// service does the matching; nothing here inspects document content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignHereField {
    anchor_text: String,
    offset_x: i32,
    offset_y: i32,
    unit: AnchorUnit,
}

impl SignHereField {
    pub fn anchored(anchor_text: impl Into<String>, offset_x: i32, offset_y: i32) -> Self {
        Self {
            anchor_text: anchor_text.into(),
            offset_x,
            offset_y,
            unit: AnchorUnit::Pixels,
        }
    }

    pub fn anchor_text(&self) -> &str {
        &self.anchor_text
    }

    pub fn offset_x(&self) -> i32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> i32 {
        self.offset_y
    }

    pub fn unit(&self) -> AnchorUnit {
        self.unit
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    id: String,
    name: String,
    email: String,
    routing_order: u32,
}

impl Party {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Lower orders receive the envelope first; equal orders are delivered in parallel.
    pub fn routing_order(&self) -> u32 {
        self.routing_order
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Signer {
        party: Party,
        fields: Vec<SignHereField>,
    },
    CarbonCopy {
        party: Party,
    },
}

impl Recipient {
    pub fn signer(
        id: impl Into<String>,
        name: &str,
        email: &str,
        routing_order: u32,
        fields: Vec<SignHereField>,
    ) -> Result<Self> {
        Ok(Recipient::Signer {
            party: Self::party("signer", id.into(), name, email, routing_order)?,
            fields,
        })
    }

    pub fn carbon_copy(
        id: impl Into<String>,
        name: &str,
        email: &str,
        routing_order: u32,
    ) -> Result<Self> {
        Ok(Recipient::CarbonCopy {
            party: Self::party("cc", id.into(), name, email, routing_order)?,
        })
    }

    fn party(role: &str, id: String, name: &str, email: &str, routing_order: u32) -> Result<Party> {
        crate::utils::validation::validate_non_empty_string(&format!("{}_name", role), name)?;
        crate::utils::validation::validate_email(&format!("{}_email", role), email)?;
        if routing_order == 0 {
            return Err(EsignError::invalid_input(
                &format!("{}_routing_order", role),
                "routing order starts at 1",
            ));
        }
        Ok(Party {
            id,
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            routing_order,
        })
    }

    pub fn party_info(&self) -> &Party {
        match self {
            Recipient::Signer { party, .. } | Recipient::CarbonCopy { party } => party,
        }
    }

    pub fn routing_order(&self) -> u32 {
        self.party_info().routing_order()
    }

    /// Sign-here fields; always empty for carbon copies.
    pub fn fields(&self) -> &[SignHereField] {
        match self {
            Recipient::Signer { fields, .. } => fields,
            Recipient::CarbonCopy { .. } => &[],
        }
    }

    pub fn is_signer(&self) -> bool {
        matches!(self, Recipient::Signer { .. })
    }
}

/// A complete signing request. Built once by the envelope builder and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    subject: String,
    documents: Vec<Document>,
    recipients: Vec<Recipient>,
    status: EnvelopeStatus,
}

impl Envelope {
    pub(crate) fn new(
        subject: String,
        documents: Vec<Document>,
        recipients: Vec<Recipient>,
        status: EnvelopeStatus,
    ) -> Self {
        Self {
            subject,
            documents,
            recipients,
            status,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Attachment order, not signing order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn signers(&self) -> impl Iterator<Item = &Recipient> {
        self.recipients.iter().filter(|r| r.is_signer())
    }

    pub fn carbon_copies(&self) -> impl Iterator<Item = &Recipient> {
        self.recipients.iter().filter(|r| !r.is_signer())
    }

    pub fn status(&self) -> EnvelopeStatus {
        self.status
    }
}

/// A caller-supplied document before it is given an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInput {
    pub name: String,
    pub file_extension: String,
    pub content: Vec<u8>,
}

impl DocumentInput {
    pub fn new(name: impl Into<String>, file_extension: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            file_extension: file_extension.into(),
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeArgs {
    pub signer_email: String,
    pub signer_name: String,
    pub cc_email: String,
    pub cc_name: String,
    pub status: EnvelopeStatus,
    pub subject: Option<String>,
    pub documents: Vec<DocumentInput>,
}

/// Identity and routing part of a request, checked before any document is read.
pub trait Participants {
    fn signer_email(&self) -> &str;
    fn signer_name(&self) -> &str;
    fn cc_email(&self) -> &str;
    fn cc_name(&self) -> &str;
}

impl Participants for EnvelopeArgs {
    fn signer_email(&self) -> &str {
        &self.signer_email
    }

    fn signer_name(&self) -> &str {
        &self.signer_name
    }

    fn cc_email(&self) -> &str {
        &self.cc_email
    }

    fn cc_name(&self) -> &str {
        &self.cc_name
    }
}

/// A document to attach, referenced by path rather than by content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSource {
    /// Display name; can differ from the file name.
    pub name: String,
    pub path: String,
}

impl DocumentSource {
    /// Extension of the file, which is also the source format the remote
    /// service converts from.
    pub fn file_extension(&self) -> Result<String> {
        Path::new(&self.path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                EsignError::invalid_input(
                    "documents",
                    format!("'{}' has no file extension", self.path),
                )
            })
    }
}

impl FromStr for DocumentSource {
    type Err = EsignError;

    /// Parses `NAME=PATH`; a bare path uses its file stem as the name.
    /// Display names cannot contain a path separator, so `docs/a=b.pdf` is a
    /// bare path.
    fn from_str(s: &str) -> Result<Self> {
        let named = s
            .split_once('=')
            .filter(|(name, _)| !name.contains(['/', '\\']));
        let (name, path) = match named {
            Some((name, path)) => (name.trim().to_string(), path.trim().to_string()),
            None => {
                let path = s.trim();
                let stem = Path::new(path)
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or_default();
                (stem.to_string(), path.to_string())
            }
        };

        if name.is_empty() || path.is_empty() {
            return Err(EsignError::invalid_input(
                "documents",
                format!("'{}' is not of the form NAME=PATH", s),
            ));
        }
        Ok(Self { name, path })
    }
}

/// Everything needed to send one envelope, before any file has been read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeRequest {
    pub signer_email: String,
    pub signer_name: String,
    pub cc_email: String,
    pub cc_name: String,
    pub status: EnvelopeStatus,
    pub subject: Option<String>,
    pub documents: Vec<DocumentSource>,
    /// Title document template; the embedded one is used when absent.
    pub template: Option<String>,
}

impl Participants for EnvelopeRequest {
    fn signer_email(&self) -> &str {
        &self.signer_email
    }

    fn signer_name(&self) -> &str {
        &self.signer_name
    }

    fn cc_email(&self) -> &str {
        &self.cc_email
    }

    fn cc_name(&self) -> &str {
        &self.cc_name
    }
}

/// What the remote service returns after creating an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSummary {
    pub envelope_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_date_time: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

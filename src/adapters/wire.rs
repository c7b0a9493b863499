//! Request and response bodies of the envelope-creation endpoint.
//!
//! Field names, the string encoding of numbers and the base64 document
//! content are fixed by the remote service.

use crate::domain::model::{Document, Envelope, Recipient, SignHereField};
use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDefinition {
    pub email_subject: String,
    pub documents: Vec<DocumentDto>,
    pub recipients: RecipientsDto,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    pub document_id: String,
    pub name: String,
    pub file_extension: String,
    pub document_base64: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientsDto {
    pub signers: Vec<SignerDto>,
    pub carbon_copies: Vec<CarbonCopyDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerDto {
    pub recipient_id: String,
    pub name: String,
    pub email: String,
    pub routing_order: String,
    pub tabs: TabsDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonCopyDto {
    pub recipient_id: String,
    pub name: String,
    pub email: String,
    pub routing_order: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsDto {
    pub sign_here_tabs: Vec<SignHereDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignHereDto {
    pub anchor_string: String,
    pub anchor_x_offset: String,
    pub anchor_y_offset: String,
    pub anchor_units: String,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub error_code: Option<String>,
    pub message: Option<String>,
}

impl From<&Document> for DocumentDto {
    fn from(doc: &Document) -> Self {
        Self {
            document_id: doc.id().to_string(),
            name: doc.name().to_string(),
            file_extension: doc.file_extension().to_string(),
            document_base64: base64::engine::general_purpose::STANDARD.encode(doc.content()),
        }
    }
}

impl From<&SignHereField> for SignHereDto {
    fn from(field: &SignHereField) -> Self {
        Self {
            anchor_string: field.anchor_text().to_string(),
            anchor_x_offset: field.offset_x().to_string(),
            anchor_y_offset: field.offset_y().to_string(),
            anchor_units: field.unit().as_str().to_string(),
        }
    }
}

impl From<&[Recipient]> for RecipientsDto {
    fn from(recipients: &[Recipient]) -> Self {
        let mut signers = Vec::new();
        let mut carbon_copies = Vec::new();

        for recipient in recipients {
            match recipient {
                Recipient::Signer { party, fields } => signers.push(SignerDto {
                    recipient_id: party.id().to_string(),
                    name: party.name().to_string(),
                    email: party.email().to_string(),
                    routing_order: party.routing_order().to_string(),
                    tabs: TabsDto {
                        sign_here_tabs: fields.iter().map(SignHereDto::from).collect(),
                    },
                }),
                Recipient::CarbonCopy { party } => carbon_copies.push(CarbonCopyDto {
                    recipient_id: party.id().to_string(),
                    name: party.name().to_string(),
                    email: party.email().to_string(),
                    routing_order: party.routing_order().to_string(),
                }),
            }
        }

        Self {
            signers,
            carbon_copies,
        }
    }
}

impl From<&Envelope> for EnvelopeDefinition {
    fn from(envelope: &Envelope) -> Self {
        Self {
            email_subject: envelope.subject().to_string(),
            documents: envelope.documents().iter().map(DocumentDto::from).collect(),
            recipients: RecipientsDto::from(envelope.recipients()),
            status: envelope.status().as_str().to_string(),
        }
    }
}

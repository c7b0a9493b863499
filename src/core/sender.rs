use crate::core::builder::{build_envelope, validate_participants};
use crate::core::template::DEFAULT_TITLE_TEMPLATE;
use crate::domain::model::{
    DocumentInput, Envelope, EnvelopeArgs, EnvelopeRequest, EnvelopeSummary,
};
use crate::domain::ports::{EnvelopeApi, Storage};
use crate::utils::error::{EsignError, Result};

/// Validates the participants, then reads the title template and documents
/// from `storage` and builds the envelope. Nothing is read when the
/// participants are invalid.
pub async fn load_envelope<S: Storage>(storage: &S, request: &EnvelopeRequest) -> Result<Envelope> {
    validate_participants(request)?;
    if request.documents.is_empty() {
        return Err(EsignError::invalid_input(
            "documents",
            "at least one document must be supplied",
        ));
    }

    // Title template: configured file, or the embedded asset
    let template = match &request.template {
        Some(path) => {
            tracing::debug!("Loading title template from {}", path);
            let bytes = storage.read_file(path).await?;
            String::from_utf8(bytes).map_err(|_| {
                EsignError::invalid_input("template", format!("'{}' is not valid UTF-8", path))
            })?
        }
        None => DEFAULT_TITLE_TEMPLATE.to_string(),
    };

    let mut documents = Vec::with_capacity(request.documents.len());
    for source in &request.documents {
        let file_extension = source.file_extension()?;
        let content = storage.read_file(&source.path).await?;
        tracing::debug!(
            "Read document '{}' ({} bytes) from {}",
            source.name,
            content.len(),
            source.path
        );
        documents.push(DocumentInput::new(source.name.clone(), file_extension, content));
    }

    let args = EnvelopeArgs {
        signer_email: request.signer_email.clone(),
        signer_name: request.signer_name.clone(),
        cc_email: request.cc_email.clone(),
        cc_name: request.cc_name.clone(),
        status: request.status,
        subject: request.subject.clone(),
        documents,
    };

    build_envelope(&args, &template)
}

pub struct EnvelopeSender<S: Storage, A: EnvelopeApi> {
    storage: S,
    api: A,
}

impl<S: Storage, A: EnvelopeApi> EnvelopeSender<S, A> {
    pub fn new(storage: S, api: A) -> Self {
        Self { storage, api }
    }

    /// Reads the template and documents and builds the envelope without
    /// submitting it.
    pub async fn prepare(&self, request: &EnvelopeRequest) -> Result<Envelope> {
        load_envelope(&self.storage, request).await
    }

    pub async fn send(&self, request: &EnvelopeRequest) -> Result<EnvelopeSummary> {
        // Build from local files first; nothing goes over the network on bad input
        let envelope = self.prepare(request).await?;

        // Submit and relay the id
        tracing::info!(
            "Submitting envelope with {} documents (status: {})",
            envelope.documents().len(),
            envelope.status()
        );
        let summary = self.api.create_envelope(&envelope).await?;
        tracing::info!("Envelope was created. EnvelopeId {}", summary.envelope_id);

        Ok(summary)
    }
}

use crate::core::template::{
    render_title_document, TITLE_DOCUMENT_EXTENSION, TITLE_DOCUMENT_NAME,
};
use crate::domain::model::{
    Document, Envelope, EnvelopeArgs, Participants, Recipient, SignHereField,
};
use crate::utils::error::{EsignError, Result};
use crate::utils::validation::{validate_email, validate_non_empty_string};

pub const DEFAULT_EMAIL_SUBJECT: &str = "Please sign this document set";

pub const SIGNER_RECIPIENT_ID: &str = "1";
pub const SIGNER_ROUTING_ORDER: u32 = 1;
pub const CC_RECIPIENT_ID: &str = "2";
pub const CC_ROUTING_ORDER: u32 = 2;

/// Anchor strings placed in the documents and the pixel offset of the
/// sign-here field from each of them, as (anchor, x, y).
pub const SIGNER_ANCHORS: [(&str, i32, i32); 2] = [("**signature_1**", 20, 10), ("/sn1/", 20, 10)];

/// Checks signer and cc identity. Runs before any document is read.
pub fn validate_participants<P: Participants + ?Sized>(participants: &P) -> Result<()> {
    validate_email("signer_email", participants.signer_email())?;
    validate_non_empty_string("signer_name", participants.signer_name())?;
    validate_email("cc_email", participants.cc_email())?;
    validate_non_empty_string("cc_name", participants.cc_name())?;
    Ok(())
}

/// Assembles an envelope from `args`: the rendered title document first,
/// then the supplied documents in order, one signer and one carbon copy.
///
/// Pure: performs no I/O and returns the same envelope for the same input.
pub fn build_envelope(args: &EnvelopeArgs, title_template: &str) -> Result<Envelope> {
    validate_participants(args)?;

    if args.documents.is_empty() {
        return Err(EsignError::invalid_input(
            "documents",
            "at least one document must be supplied",
        ));
    }

    let subject = match args.subject.as_deref().map(str::trim) {
        Some("") => {
            return Err(EsignError::invalid_input(
                "subject",
                "subject cannot be empty when given",
            ))
        }
        Some(subject) => subject.to_string(),
        None => DEFAULT_EMAIL_SUBJECT.to_string(),
    };

    let title = render_title_document(title_template, args);
    let mut documents = Vec::with_capacity(args.documents.len() + 1);
    documents.push(Document::new(
        "1",
        TITLE_DOCUMENT_NAME,
        TITLE_DOCUMENT_EXTENSION,
        title.into_bytes(),
    )?);

    for (index, input) in args.documents.iter().enumerate() {
        let id = (index + 2).to_string();
        documents.push(Document::new(
            id,
            input.name.trim(),
            input.file_extension.as_str(),
            input.content.clone(),
        )?);
    }

    let fields = SIGNER_ANCHORS
        .iter()
        .map(|(anchor, x, y)| SignHereField::anchored(*anchor, *x, *y))
        .collect();

    let recipients = vec![
        Recipient::signer(
            SIGNER_RECIPIENT_ID,
            &args.signer_name,
            &args.signer_email,
            SIGNER_ROUTING_ORDER,
            fields,
        )?,
        Recipient::carbon_copy(CC_RECIPIENT_ID, &args.cc_name, &args.cc_email, CC_ROUTING_ORDER)?,
    ];

    tracing::debug!(
        documents = documents.len(),
        status = %args.status,
        "Envelope assembled"
    );

    Ok(Envelope::new(subject, documents, recipients, args.status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::template::DEFAULT_TITLE_TEMPLATE;
    use crate::domain::model::{DocumentInput, EnvelopeStatus};

    fn sample_args() -> EnvelopeArgs {
        EnvelopeArgs {
            signer_email: "a@x.com".to_string(),
            signer_name: "A".to_string(),
            cc_email: "b@x.com".to_string(),
            cc_name: "B".to_string(),
            status: EnvelopeStatus::Sent,
            subject: None,
            documents: vec![
                DocumentInput::new("Battle Plan", "docx", b"PK\x03\x04docx".to_vec()),
                DocumentInput::new("Lorem Ipsum", "pdf", b"%PDF-1.4".to_vec()),
            ],
        }
    }

    #[test]
    fn test_reference_envelope_shape() {
        let envelope = build_envelope(&sample_args(), DEFAULT_TITLE_TEMPLATE).unwrap();

        assert_eq!(envelope.documents().len(), 3);
        assert_eq!(envelope.signers().count(), 1);
        assert_eq!(envelope.carbon_copies().count(), 1);
        assert_eq!(envelope.status(), EnvelopeStatus::Sent);
        assert_eq!(envelope.subject(), DEFAULT_EMAIL_SUBJECT);

        let signer = envelope.signers().next().unwrap();
        let anchors: Vec<&str> = signer.fields().iter().map(|f| f.anchor_text()).collect();
        assert_eq!(anchors, vec!["**signature_1**", "/sn1/"]);
        for field in signer.fields() {
            assert_eq!((field.offset_x(), field.offset_y()), (20, 10));
        }
    }

    #[test]
    fn test_document_ids_follow_supplied_order() {
        let envelope = build_envelope(&sample_args(), DEFAULT_TITLE_TEMPLATE).unwrap();
        let ids: Vec<&str> = envelope.documents().iter().map(|d| d.id()).collect();
        let names: Vec<&str> = envelope.documents().iter().map(|d| d.name()).collect();

        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(names, vec!["Order acknowledgement", "Battle Plan", "Lorem Ipsum"]);
        assert_eq!(envelope.documents()[0].file_extension(), "html");
    }

    #[test]
    fn test_signer_routes_before_carbon_copy() {
        let envelope = build_envelope(&sample_args(), DEFAULT_TITLE_TEMPLATE).unwrap();
        let signer = envelope.signers().next().unwrap();
        let cc = envelope.carbon_copies().next().unwrap();
        assert!(signer.routing_order() < cc.routing_order());
        assert_eq!(signer.party_info().id(), "1");
        assert_eq!(cc.party_info().id(), "2");
    }

    #[test]
    fn test_build_is_deterministic() {
        let args = sample_args();
        let first = build_envelope(&args, DEFAULT_TITLE_TEMPLATE).unwrap();
        let second = build_envelope(&args, DEFAULT_TITLE_TEMPLATE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_created_status_changes_only_status() {
        let sent = build_envelope(&sample_args(), DEFAULT_TITLE_TEMPLATE).unwrap();
        let mut args = sample_args();
        args.status = EnvelopeStatus::Created;
        let draft = build_envelope(&args, DEFAULT_TITLE_TEMPLATE).unwrap();

        assert_eq!(draft.status().as_str(), "created");
        assert_eq!(draft.documents(), sent.documents());
        assert_eq!(draft.recipients(), sent.recipients());
        assert_eq!(draft.subject(), sent.subject());
    }

    #[test]
    fn test_missing_signer_email_is_invalid_input() {
        let mut args = sample_args();
        args.signer_email.clear();
        let err = build_envelope(&args, DEFAULT_TITLE_TEMPLATE).unwrap_err();
        assert!(matches!(err, EsignError::InvalidInput { ref field, .. } if field == "signer_email"));
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let mut args = sample_args();
        args.documents[1].content.clear();
        assert!(matches!(
            build_envelope(&args, DEFAULT_TITLE_TEMPLATE),
            Err(EsignError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_requires_a_supplied_document() {
        let mut args = sample_args();
        args.documents.clear();
        let err = build_envelope(&args, DEFAULT_TITLE_TEMPLATE).unwrap_err();
        assert!(matches!(err, EsignError::InvalidInput { ref field, .. } if field == "documents"));
    }

    #[test]
    fn test_custom_subject() {
        let mut args = sample_args();
        args.subject = Some("  Trade-in paperwork ".to_string());
        let envelope = build_envelope(&args, DEFAULT_TITLE_TEMPLATE).unwrap();
        assert_eq!(envelope.subject(), "Trade-in paperwork");

        args.subject = Some(" ".to_string());
        assert!(build_envelope(&args, DEFAULT_TITLE_TEMPLATE).is_err());
    }

    #[test]
    fn test_empty_template_is_rejected() {
        assert!(matches!(
            build_envelope(&sample_args(), ""),
            Err(EsignError::InvalidInput { ref field, .. }) if field == "document.content"
        ));
    }
}

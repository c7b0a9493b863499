use esign_envelope::{
    build_envelope, DocumentInput, EnvelopeArgs, EnvelopeDefinition, EnvelopeStatus, EsignError,
    DEFAULT_TITLE_TEMPLATE,
};

fn args(documents: usize) -> EnvelopeArgs {
    EnvelopeArgs {
        signer_email: "a@x.com".to_string(),
        signer_name: "A".to_string(),
        cc_email: "b@x.com".to_string(),
        cc_name: "B".to_string(),
        status: EnvelopeStatus::Sent,
        subject: None,
        documents: (0..documents)
            .map(|i| DocumentInput::new(format!("Doc {}", i), "pdf", vec![b'%', i as u8 + 1]))
            .collect(),
    }
}

#[test]
fn test_reference_input_produces_expected_envelope() {
    let envelope = build_envelope(&args(2), DEFAULT_TITLE_TEMPLATE).unwrap();

    assert_eq!(envelope.documents().len(), 3);
    assert_eq!(envelope.signers().count(), 1);
    assert_eq!(envelope.carbon_copies().count(), 1);

    let signer = envelope.signers().next().unwrap();
    let anchors: Vec<&str> = signer.fields().iter().map(|f| f.anchor_text()).collect();
    assert_eq!(anchors, ["**signature_1**", "/sn1/"]);
}

#[test]
fn test_document_ids_are_sequential_for_any_count() {
    for supplied in 1..=6 {
        let envelope = build_envelope(&args(supplied), DEFAULT_TITLE_TEMPLATE).unwrap();
        let ids: Vec<String> = envelope.documents().iter().map(|d| d.id().to_string()).collect();
        let expected: Vec<String> = (1..=supplied + 1).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }
}

#[test]
fn test_status_only_affects_status_field() {
    let sent = EnvelopeDefinition::from(&build_envelope(&args(2), DEFAULT_TITLE_TEMPLATE).unwrap());

    let mut draft_args = args(2);
    draft_args.status = EnvelopeStatus::Created;
    let draft =
        EnvelopeDefinition::from(&build_envelope(&draft_args, DEFAULT_TITLE_TEMPLATE).unwrap());

    assert_eq!(draft.status, "created");
    assert_eq!(sent.status, "sent");
    assert_eq!(draft.documents, sent.documents);
    assert_eq!(draft.recipients, sent.recipients);
    assert_eq!(draft.email_subject, sent.email_subject);
}

#[test]
fn test_invalid_identities_are_rejected() {
    let cases: [(&str, fn(&mut EnvelopeArgs)); 5] = [
        ("signer_email", |a| a.signer_email = "".to_string()),
        ("signer_email", |a| a.signer_email = "not-an-email".to_string()),
        ("signer_name", |a| a.signer_name = "  ".to_string()),
        ("cc_email", |a| a.cc_email = "".to_string()),
        ("cc_name", |a| a.cc_name = "".to_string()),
    ];

    for (field, mutate) in cases {
        let mut input = args(1);
        mutate(&mut input);
        match build_envelope(&input, DEFAULT_TITLE_TEMPLATE) {
            Err(EsignError::InvalidInput { field: reported, .. }) => assert_eq!(reported, field),
            other => panic!("expected InvalidInput for {}, got {:?}", field, other),
        }
    }
}

#[test]
fn test_wire_body_serializes_to_json() {
    let envelope = build_envelope(&args(1), DEFAULT_TITLE_TEMPLATE).unwrap();
    let json = serde_json::to_string(&EnvelopeDefinition::from(&envelope)).unwrap();

    assert!(json.contains(r#""signHereTabs""#));
    assert!(json.contains(r#""carbonCopies""#));
    assert!(json.contains(r#""documentBase64""#));
    assert!(!json.contains("content"));
}

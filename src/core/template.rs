use crate::domain::model::Participants;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Title document shipped with the crate. Carries the `**signature_1**` anchor.
pub const DEFAULT_TITLE_TEMPLATE: &str = include_str!("../../assets/order_acknowledgement.html");

pub const TITLE_DOCUMENT_NAME: &str = "Order acknowledgement";
pub const TITLE_DOCUMENT_EXTENSION: &str = "html";

/// Fills the `{{signer_name}}`, `{{signer_email}}`, `{{cc_name}}` and
/// `{{cc_email}}` placeholders. Values are HTML-escaped; unknown
/// placeholders are left as they are.
pub fn render_title_document<P: Participants + ?Sized>(template: &str, participants: &P) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures| {
            let value = match &caps[1] {
                "signer_name" => participants.signer_name(),
                "signer_email" => participants.signer_email(),
                "cc_name" => participants.cc_name(),
                "cc_email" => participants.cc_email(),
                _ => return caps[0].to_string(),
            };
            escape_html(value.trim())
        })
        .into_owned()
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").expect("placeholder pattern is a valid regex")
    })
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EnvelopeArgs, EnvelopeStatus};

    fn args(signer_name: &str) -> EnvelopeArgs {
        EnvelopeArgs {
            signer_email: "a@x.com".to_string(),
            signer_name: signer_name.to_string(),
            cc_email: "b@x.com".to_string(),
            cc_name: "B".to_string(),
            status: EnvelopeStatus::Sent,
            subject: None,
            documents: Vec::new(),
        }
    }

    #[test]
    fn test_default_template_fills_participants() {
        let html = render_title_document(DEFAULT_TITLE_TEMPLATE, &args("Alice"));
        assert!(html.contains("Ordered by Alice"));
        assert!(html.contains("Email: a@x.com"));
        assert!(html.contains("Copy to: B, b@x.com"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_default_template_keeps_signature_anchor() {
        let html = render_title_document(DEFAULT_TITLE_TEMPLATE, &args("A"));
        assert!(html.contains("**signature_1**"));
    }

    #[test]
    fn test_values_are_escaped() {
        let html = render_title_document("<p>{{signer_name}}</p>", &args("<b>Bob & Co</b>"));
        assert_eq!(html, "<p>&lt;b&gt;Bob &amp; Co&lt;/b&gt;</p>");
    }

    #[test]
    fn test_unknown_placeholders_survive() {
        let html = render_title_document("{{order_id}} {{cc_name}}", &args("A"));
        assert_eq!(html, "{{order_id}} B");
    }

    #[test]
    fn test_values_are_not_substituted_twice() {
        let html = render_title_document("{{signer_name}}|{{cc_name}}", &args("{{cc_name}}"));
        assert_eq!(html, "{{cc_name}}|B");
    }
}

use httpsnotif_codec::{parse_with_fallback, CapabilitySet, CodecError, Encoding};
use httpsnotif_schema::{SchemaError, SchemaHandle, SchemaState};

use crate::error::{RelayError, Result};

/// Run the full admission pipeline for one relay notification.
///
/// Admission checks, parsing, and schema validation in order; the first
/// failure is terminal for the request. The schema readiness check is
/// non-blocking: a request racing the startup load is answered
/// `SchemaUnavailable`, never queued.
pub fn validate_relay_notification(
    content_type: Option<&str>,
    body: &[u8],
    enabled: &CapabilitySet,
    schema: &SchemaHandle,
) -> Result<()> {
    let Some(content_type) = content_type else {
        return Err(RelayError::MissingContentType);
    };

    let encoding = Encoding::from_content_type(content_type).ok_or_else(|| {
        RelayError::UnsupportedEncoding(format!("unrecognized media type '{content_type}'"))
    })?;

    if !enabled.contains(encoding) {
        return Err(RelayError::UnsupportedEncoding(format!(
            "{encoding} encoding not supported"
        )));
    }

    let document = parse_with_fallback(body, encoding).map_err(|err| match err {
        CodecError::Unparseable { attempts } => RelayError::MalformedPayload(
            attempts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        ),
        other => RelayError::MalformedPayload(other.to_string()),
    })?;

    let model = match schema.state() {
        None => {
            return Err(RelayError::SchemaUnavailable(
                "schema model not loaded".to_string(),
            ))
        }
        Some(SchemaState::Failed(reason)) => {
            return Err(RelayError::SchemaUnavailable(reason.clone()))
        }
        Some(SchemaState::Ready(model)) => model,
    };

    model.validate(&document).map_err(|err| match err {
        SchemaError::ValidationFailed { message } => RelayError::SchemaViolation(message),
        other => RelayError::SchemaViolation(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use httpsnotif_schema::{ModelConfig, SchemaModel};

    use super::*;

    const SCHEMA: &str = r#"{
        "type": "object",
        "properties": {
            "notification": {
                "type": "object",
                "properties": {
                    "event-time": { "type": "string" }
                },
                "required": ["event-time"]
            }
        },
        "required": ["notification"],
        "additionalProperties": false
    }"#;

    const CONFORMANT_JSON: &[u8] = br#"{"notification":{"event-time":"2026-01-01T00:00:00Z"}}"#;
    const CONFORMANT_XML: &[u8] =
        b"<notification><event-time>2026-01-01T00:00:00Z</event-time></notification>";

    fn ready_schema() -> SchemaHandle {
        let handle = SchemaHandle::new();
        let model = SchemaModel::from_str(SCHEMA, ModelConfig::default()).unwrap();
        assert!(handle.publish(SchemaState::Ready(model)));
        handle
    }

    fn both() -> CapabilitySet {
        CapabilitySet::default()
    }

    #[test]
    fn conformant_json_is_accepted() {
        let result = validate_relay_notification(
            Some("application/json"),
            CONFORMANT_JSON,
            &both(),
            &ready_schema(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn conformant_xml_is_accepted() {
        let result = validate_relay_notification(
            Some("application/xml"),
            CONFORMANT_XML,
            &both(),
            &ready_schema(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn missing_content_type_is_rejected() {
        let result = validate_relay_notification(None, CONFORMANT_JSON, &both(), &ready_schema());
        assert!(matches!(result, Err(RelayError::MissingContentType)));
    }

    #[test]
    fn disabled_encoding_is_rejected() {
        let json_only = CapabilitySet::new(&[Encoding::Json]);
        let result = validate_relay_notification(
            Some("application/xml"),
            CONFORMANT_XML,
            &json_only,
            &ready_schema(),
        );
        assert!(matches!(result, Err(RelayError::UnsupportedEncoding(_))));
    }

    #[test]
    fn unrecognized_content_type_is_rejected() {
        let result = validate_relay_notification(
            Some("text/plain"),
            CONFORMANT_JSON,
            &both(),
            &ready_schema(),
        );
        assert!(matches!(result, Err(RelayError::UnsupportedEncoding(_))));
    }

    #[test]
    fn empty_capability_set_rejects_everything() {
        let result = validate_relay_notification(
            Some("application/json"),
            CONFORMANT_JSON,
            &CapabilitySet::none(),
            &ready_schema(),
        );
        assert!(matches!(result, Err(RelayError::UnsupportedEncoding(_))));
    }

    #[test]
    fn unparseable_body_names_both_attempts() {
        let result = validate_relay_notification(
            Some("application/json"),
            b"neither format",
            &both(),
            &ready_schema(),
        );
        match result {
            Err(RelayError::MalformedPayload(detail)) => {
                assert!(detail.contains("JSON"), "missing JSON attempt: {detail}");
                assert!(detail.contains("XML"), "missing XML attempt: {detail}");
            }
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn mislabeled_but_parseable_body_passes_through_fallback() {
        // Declared JSON, actually XML: the one-shot fallback still validates.
        let result = validate_relay_notification(
            Some("application/json"),
            CONFORMANT_XML,
            &both(),
            &ready_schema(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn unpublished_schema_reports_unavailable() {
        let handle = SchemaHandle::new();
        let result =
            validate_relay_notification(Some("application/json"), CONFORMANT_JSON, &both(), &handle);
        assert!(matches!(result, Err(RelayError::SchemaUnavailable(_))));
    }

    #[test]
    fn failed_schema_load_reports_unavailable_with_reason() {
        let handle = SchemaHandle::new();
        assert!(handle.publish(SchemaState::Failed("disk on fire".to_string())));
        let result =
            validate_relay_notification(Some("application/json"), CONFORMANT_JSON, &both(), &handle);
        match result {
            Err(RelayError::SchemaUnavailable(reason)) => assert_eq!(reason, "disk on fire"),
            other => panic!("expected SchemaUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn schema_violation_is_rejected_with_detail() {
        let result = validate_relay_notification(
            Some("application/json"),
            br#"{"notification":{"sequence":1}}"#,
            &both(),
            &ready_schema(),
        );
        match result {
            Err(RelayError::SchemaViolation(message)) => {
                assert!(message.contains("event-time"), "unhelpful detail: {message}");
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn content_type_parameters_do_not_break_admission() {
        let result = validate_relay_notification(
            Some("application/json; charset=utf-8"),
            CONFORMANT_JSON,
            &both(),
            &ready_schema(),
        );
        assert!(result.is_ok());
    }
}

use serde_json::json;

use crate::encoding::{CapabilitySet, Encoding};
use crate::error::Result;

/// JSON object key wrapping the capability list.
pub const JSON_RECEIVER_CAPABILITIES: &str = "receiver-capabilities";

/// JSON object key holding the ordered URN array.
pub const JSON_RECEIVER_CAPABILITY: &str = "receiver-capability";

/// Serialize the capability set in the chosen encoding.
///
/// Capability order in the output matches the set's advertised order.
/// Returns the body bytes and the MIME type to answer with.
pub fn build_capabilities(
    capabilities: &CapabilitySet,
    encoding: Encoding,
) -> Result<(Vec<u8>, &'static str)> {
    let body = match encoding {
        Encoding::Json => build_json(capabilities)?,
        Encoding::Xml => build_xml(capabilities),
    };
    Ok((body, encoding.mime()))
}

fn build_json(capabilities: &CapabilitySet) -> Result<Vec<u8>> {
    let document = json!({
        JSON_RECEIVER_CAPABILITIES: {
            JSON_RECEIVER_CAPABILITY: capabilities.urns(),
        }
    });
    Ok(serde_json::to_vec(&document)?)
}

fn build_xml(capabilities: &CapabilitySet) -> Vec<u8> {
    let mut out = String::from("<receiver-capabilities>");
    for urn in capabilities.urns() {
        out.push_str("<receiver-capability>");
        out.push_str(urn);
        out.push_str("</receiver-capability>");
    }
    out.push_str("</receiver-capabilities>");
    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::encoding::{URN_ENCODING_JSON, URN_ENCODING_XML};

    #[test]
    fn json_document_shape_and_order() {
        let (body, mime) = build_capabilities(&CapabilitySet::default(), Encoding::Json).unwrap();
        assert_eq!(mime, "application/json");

        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "receiver-capabilities": {
                    "receiver-capability": [URN_ENCODING_JSON, URN_ENCODING_XML]
                }
            })
        );
    }

    #[test]
    fn json_urn_appears_before_xml_urn() {
        let (body, _) = build_capabilities(&CapabilitySet::default(), Encoding::Json).unwrap();
        let text = String::from_utf8(body).unwrap();
        let json_pos = text.find("encoding:json").unwrap();
        let xml_pos = text.find("encoding:xml").unwrap();
        assert!(json_pos < xml_pos);
    }

    #[test]
    fn xml_document_shape() {
        let (body, mime) = build_capabilities(&CapabilitySet::default(), Encoding::Xml).unwrap();
        assert_eq!(mime, "application/xml");
        assert_eq!(
            String::from_utf8(body).unwrap(),
            format!(
                "<receiver-capabilities>\
                 <receiver-capability>{URN_ENCODING_JSON}</receiver-capability>\
                 <receiver-capability>{URN_ENCODING_XML}</receiver-capability>\
                 </receiver-capabilities>"
            )
        );
    }

    #[test]
    fn single_capability_output_matches_set() {
        let xml_only = CapabilitySet::new(&[Encoding::Xml]);
        let (body, _) = build_capabilities(&xml_only, Encoding::Xml).unwrap();
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains(URN_ENCODING_XML));
        assert!(!text.contains(URN_ENCODING_JSON));
    }

    #[test]
    fn empty_set_serializes_to_empty_list() {
        let (body, _) = build_capabilities(&CapabilitySet::none(), Encoding::Json).unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            json!({"receiver-capabilities": {"receiver-capability": []}})
        );
    }
}

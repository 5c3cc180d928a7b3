use crate::encoding::{CapabilitySet, Encoding};

/// Quality weights a client attached to the recognized media types.
///
/// Absent entries weigh `0.0`; an entry present without an explicit `q`
/// weighs `1.0`. An explicit `q=0` marks the media type excluded, which is
/// stronger than merely absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AcceptPreference {
    json: Option<f32>,
    xml: Option<f32>,
}

impl AcceptPreference {
    /// Parse an Accept header into per-media-type weights.
    ///
    /// The header is a comma-separated list of media-type tokens, each
    /// optionally followed by `;q=<float>`. Unrecognized tokens are ignored.
    /// A malformed `q` value (non-numeric) is treated as `1.0` rather than
    /// rejected; numeric values are clamped to `[0.0, 1.0]`. For a media
    /// type mentioned more than once, the first occurrence wins.
    ///
    /// An absent header yields the empty preference (no explicit choice).
    pub fn parse(header: Option<&str>) -> Self {
        let Some(header) = header else {
            return Self::default();
        };

        let mut prefs = Self::default();
        for item in header.split(',') {
            let mut parts = item.split(';');
            let media_type = parts.next().unwrap_or("").trim();

            let encoding = if media_type.eq_ignore_ascii_case(Encoding::Json.mime()) {
                Encoding::Json
            } else if media_type.eq_ignore_ascii_case(Encoding::Xml.mime()) {
                Encoding::Xml
            } else {
                continue;
            };

            let weight = parse_q(parts);
            let slot = match encoding {
                Encoding::Json => &mut prefs.json,
                Encoding::Xml => &mut prefs.xml,
            };
            if slot.is_none() {
                *slot = Some(weight);
            }
        }
        prefs
    }

    /// The effective weight for an encoding; absent entries weigh `0.0`.
    pub fn weight(&self, encoding: Encoding) -> f32 {
        match encoding {
            Encoding::Json => self.json.unwrap_or(0.0),
            Encoding::Xml => self.xml.unwrap_or(0.0),
        }
    }

    /// Whether the client explicitly excluded this media type with `q=0`.
    pub fn excludes(&self, encoding: Encoding) -> bool {
        let entry = match encoding {
            Encoding::Json => self.json,
            Encoding::Xml => self.xml,
        };
        entry == Some(0.0)
    }

    /// True when the header was absent or carried no recognized media type.
    pub fn is_empty(&self) -> bool {
        self.json.is_none() && self.xml.is_none()
    }
}

fn parse_q<'a>(params: impl Iterator<Item = &'a str>) -> f32 {
    for param in params {
        let mut kv = param.splitn(2, '=');
        let key = kv.next().unwrap_or("").trim();
        if !key.eq_ignore_ascii_case("q") {
            continue;
        }
        let value = kv.next().unwrap_or("").trim();
        // Tolerant-parser policy: a q the client failed to spell is full
        // preference, not a rejection.
        return match value.parse::<f32>() {
            Ok(q) if q.is_finite() => q.clamp(0.0, 1.0),
            _ => 1.0,
        };
    }
    1.0
}

/// Pick the best enabled encoding for the given preferences.
///
/// Equal weights (including both absent, i.e. no Accept header) select JSON
/// when it is enabled. XML is selected only when its weight strictly exceeds
/// JSON's and XML is enabled. A media type excluded with `q=0` is never
/// selected even when enabled. Returns `None` when no usable encoding
/// remains; the caller decides what that means for its endpoint.
pub fn select_encoding(prefs: &AcceptPreference, enabled: &CapabilitySet) -> Option<Encoding> {
    let json_usable = enabled.contains(Encoding::Json) && !prefs.excludes(Encoding::Json);
    let xml_usable = enabled.contains(Encoding::Xml) && !prefs.excludes(Encoding::Xml);

    if prefs.weight(Encoding::Xml) > prefs.weight(Encoding::Json) && xml_usable {
        return Some(Encoding::Xml);
    }
    if json_usable {
        return Some(Encoding::Json);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both() -> CapabilitySet {
        CapabilitySet::default()
    }

    #[test]
    fn absent_header_selects_json() {
        let prefs = AcceptPreference::parse(None);
        assert!(prefs.is_empty());
        assert_eq!(select_encoding(&prefs, &both()), Some(Encoding::Json));
    }

    #[test]
    fn equal_weights_tie_break_to_json() {
        let prefs = AcceptPreference::parse(Some("application/json, application/xml"));
        assert_eq!(prefs.weight(Encoding::Json), 1.0);
        assert_eq!(prefs.weight(Encoding::Xml), 1.0);
        assert_eq!(select_encoding(&prefs, &both()), Some(Encoding::Json));
    }

    #[test]
    fn strictly_heavier_xml_wins() {
        let prefs = AcceptPreference::parse(Some("application/xml;q=0.9,application/json;q=0.5"));
        assert_eq!(select_encoding(&prefs, &both()), Some(Encoding::Xml));
    }

    #[test]
    fn heavier_xml_falls_back_to_json_when_xml_disabled() {
        let prefs = AcceptPreference::parse(Some("application/xml;q=0.9,application/json;q=0.5"));
        let json_only = CapabilitySet::new(&[Encoding::Json]);
        assert_eq!(select_encoding(&prefs, &json_only), Some(Encoding::Json));
    }

    #[test]
    fn heavier_json_with_json_disabled_reports_no_usable_encoding() {
        let prefs = AcceptPreference::parse(Some("application/json;q=0.9,application/xml;q=0.2"));
        let xml_only = CapabilitySet::new(&[Encoding::Xml]);
        assert_eq!(select_encoding(&prefs, &xml_only), None);
    }

    #[test]
    fn q_zero_excludes_even_when_mentioned() {
        let prefs = AcceptPreference::parse(Some("application/json;q=0"));
        assert!(prefs.excludes(Encoding::Json));
        assert!(!prefs.excludes(Encoding::Xml));
        assert_eq!(select_encoding(&prefs, &both()), None);
    }

    #[test]
    fn q_zero_xml_still_selects_json() {
        let prefs = AcceptPreference::parse(Some("application/xml;q=0,application/json;q=0.3"));
        assert_eq!(select_encoding(&prefs, &both()), Some(Encoding::Json));
    }

    #[test]
    fn malformed_q_is_full_preference() {
        let prefs = AcceptPreference::parse(Some("application/xml;q=banana,application/json;q=0.4"));
        assert_eq!(prefs.weight(Encoding::Xml), 1.0);
        assert_eq!(select_encoding(&prefs, &both()), Some(Encoding::Xml));
    }

    #[test]
    fn missing_q_value_is_full_preference() {
        let prefs = AcceptPreference::parse(Some("application/xml;q=,application/json;q=0.4"));
        assert_eq!(prefs.weight(Encoding::Xml), 1.0);
    }

    #[test]
    fn out_of_range_q_is_clamped() {
        let prefs = AcceptPreference::parse(Some("application/xml;q=3.5,application/json;q=-1"));
        assert_eq!(prefs.weight(Encoding::Xml), 1.0);
        assert_eq!(prefs.weight(Encoding::Json), 0.0);
    }

    #[test]
    fn unrecognized_tokens_are_ignored() {
        let prefs = AcceptPreference::parse(Some("text/html;q=0.9, */*;q=0.8"));
        assert!(prefs.is_empty());
        assert_eq!(select_encoding(&prefs, &both()), Some(Encoding::Json));
    }

    #[test]
    fn first_occurrence_wins_for_repeated_media_type() {
        let prefs = AcceptPreference::parse(Some("application/json;q=0.2,application/json;q=0.9"));
        assert_eq!(prefs.weight(Encoding::Json), 0.2);
    }

    #[test]
    fn whitespace_and_case_tolerated() {
        let prefs = AcceptPreference::parse(Some(" Application/XML ; Q=0.7 , application/json "));
        assert_eq!(prefs.weight(Encoding::Xml), 0.7);
        assert_eq!(prefs.weight(Encoding::Json), 1.0);
    }

    #[test]
    fn empty_capability_set_never_selects() {
        let prefs = AcceptPreference::parse(Some("application/json"));
        assert_eq!(select_encoding(&prefs, &CapabilitySet::none()), None);
    }
}

use std::fmt;

/// MIME type identifying JSON notification bodies.
pub const MIME_APPLICATION_JSON: &str = "application/json";

/// MIME type identifying XML notification bodies.
pub const MIME_APPLICATION_XML: &str = "application/xml";

/// Capability URN advertised for JSON encoding support.
pub const URN_ENCODING_JSON: &str = "urn:ietf:capability:https-notf-receiver:encoding:json";

/// Capability URN advertised for XML encoding support.
pub const URN_ENCODING_XML: &str = "urn:ietf:capability:https-notf-receiver:encoding:xml";

/// A wire encoding the receiver can accept or answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Json,
    Xml,
}

impl Encoding {
    /// The MIME type identifying this encoding on the wire.
    pub fn mime(self) -> &'static str {
        match self {
            Encoding::Json => MIME_APPLICATION_JSON,
            Encoding::Xml => MIME_APPLICATION_XML,
        }
    }

    /// The capability URN advertised for this encoding.
    pub fn urn(self) -> &'static str {
        match self {
            Encoding::Json => URN_ENCODING_JSON,
            Encoding::Xml => URN_ENCODING_XML,
        }
    }

    /// Resolve an encoding from a Content-Type header value.
    ///
    /// Parameters (`;charset=utf-8`) and ASCII case are ignored; only the
    /// media-type portion decides. Returns `None` for anything other than
    /// the two recognized MIME types.
    pub fn from_content_type(value: &str) -> Option<Self> {
        let media_type = value.split(';').next().unwrap_or("").trim();
        if media_type.eq_ignore_ascii_case(MIME_APPLICATION_JSON) {
            Some(Encoding::Json)
        } else if media_type.eq_ignore_ascii_case(MIME_APPLICATION_XML) {
            Some(Encoding::Xml)
        } else {
            None
        }
    }

    /// The other recognized encoding, used for one-shot fallback parsing.
    pub fn fallback(self) -> Self {
        match self {
            Encoding::Json => Encoding::Xml,
            Encoding::Xml => Encoding::Json,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Json => write!(f, "JSON"),
            Encoding::Xml => write!(f, "XML"),
        }
    }
}

/// Ordered set of encodings currently enabled.
///
/// Insertion order is the advertised order. Duplicates are dropped on
/// construction. An empty set means no encoding is usable and every
/// notification is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySet {
    encodings: Vec<Encoding>,
}

impl CapabilitySet {
    /// Build a set from an ordered list, dropping duplicates.
    pub fn new(encodings: &[Encoding]) -> Self {
        let mut out = Vec::with_capacity(encodings.len());
        for &encoding in encodings {
            if !out.contains(&encoding) {
                out.push(encoding);
            }
        }
        Self { encodings: out }
    }

    /// The empty set: nothing enabled, everything rejected.
    pub fn none() -> Self {
        Self {
            encodings: Vec::new(),
        }
    }

    /// Whether the given encoding is enabled.
    pub fn contains(&self, encoding: Encoding) -> bool {
        self.encodings.contains(&encoding)
    }

    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }

    /// Enabled encodings in advertised order.
    pub fn iter(&self) -> impl Iterator<Item = Encoding> + '_ {
        self.encodings.iter().copied()
    }

    /// Capability URNs in advertised order.
    pub fn urns(&self) -> Vec<&'static str> {
        self.encodings.iter().map(|e| e.urn()).collect()
    }
}

impl Default for CapabilitySet {
    /// Both encodings enabled, JSON URN advertised before XML URN.
    fn default() -> Self {
        Self::new(&[Encoding::Json, Encoding::Xml])
    }
}

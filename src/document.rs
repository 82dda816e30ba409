// Generic decoded manifest document.
//
// Manifests are YAML; the diff does not care about any particular schema,
// so decoding produces a plain tagged tree (scalar | sequence | mapping)
// rather than typed records. Mappings use `BTreeMap`, which gives the
// lexical key order the diff's determinism contract relies on. Parsing is
// lenient by construction: unknown fields are just map keys.

use std::collections::BTreeMap;
use std::fmt;

/// Error type for manifest decoding.
#[derive(Debug, thiserror::Error)]
#[error("manifest parse error: {0}")]
pub struct DecodeError(#[from] serde_yaml::Error);

/// A decoded manifest: scalars, sequences, and string-keyed mappings.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Document>),
    Map(BTreeMap<String, Document>),
}

/// Decode raw manifest bytes into a [`Document`].
pub fn decode(bytes: &[u8]) -> Result<Document, DecodeError> {
    let value: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
    Ok(from_value(value))
}

fn from_value(value: serde_yaml::Value) -> Document {
    use serde_yaml::Value;
    match value {
        Value::Null => Document::Null,
        Value::Bool(b) => Document::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Document::Int(i),
            // u64 values above i64::MAX and true floats both land here.
            None => Document::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Document::Str(s),
        Value::Sequence(seq) => Document::Seq(seq.into_iter().map(from_value).collect()),
        Value::Mapping(map) => Document::Map(
            map.into_iter()
                .map(|(k, v)| (key_string(k), from_value(v)))
                .collect(),
        ),
        // Tagged values (`!sometag x`) degrade to their underlying value.
        Value::Tagged(tagged) => from_value(tagged.value),
    }
}

/// YAML permits non-string mapping keys; render them through the scalar
/// display form so the index stays string-keyed.
fn key_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        other => from_value(other).to_string(),
    }
}

/// Rendering used verbatim in diff lines: quoted strings, bare numbers and
/// bools, `null`, and a compact summary for containers (containers only
/// appear in lines reporting a shape mismatch).
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Null => write!(f, "null"),
            Document::Bool(b) => write!(f, "{b}"),
            Document::Int(i) => write!(f, "{i}"),
            Document::Float(x) => write!(f, "{x}"),
            Document::Str(s) => write!(f, "{s:?}"),
            Document::Seq(items) => write!(f, "<sequence[{}]>", items.len()),
            Document::Map(map) => write!(f, "<mapping{{{}}}>", map.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scalars_and_containers() {
        let doc = decode(b"name: nats\nversion: 1.2\nports: [4222, 4223]\nfinal: true\n")
            .unwrap();
        let Document::Map(map) = doc else {
            panic!("expected mapping")
        };
        assert_eq!(map["name"], Document::Str("nats".into()));
        assert_eq!(map["version"], Document::Float(1.2));
        assert_eq!(
            map["ports"],
            Document::Seq(vec![Document::Int(4222), Document::Int(4223)])
        );
        assert_eq!(map["final"], Document::Bool(true));
    }

    #[test]
    fn mapping_keys_are_lexically_ordered() {
        let doc = decode(b"zebra: 1\napple: 2\nmango: 3\n").unwrap();
        let Document::Map(map) = doc else {
            panic!("expected mapping")
        };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["apple", "mango", "zebra"]);
    }

    #[test]
    fn quoted_version_stays_a_string() {
        let doc = decode(b"version: \"1.2\"\n").unwrap();
        let Document::Map(map) = doc else {
            panic!("expected mapping")
        };
        assert_eq!(map["version"], Document::Str("1.2".into()));
    }

    #[test]
    fn null_and_empty_document() {
        assert_eq!(decode(b"~\n").unwrap(), Document::Null);
        assert_eq!(decode(b"").unwrap(), Document::Null);
    }

    #[test]
    fn malformed_yaml_is_a_decode_error() {
        assert!(decode(b"key: [unclosed\n").is_err());
    }

    #[test]
    fn scalar_rendering() {
        assert_eq!(Document::Str("1.2".into()).to_string(), "\"1.2\"");
        assert_eq!(Document::Int(7).to_string(), "7");
        assert_eq!(Document::Null.to_string(), "null");
        assert_eq!(Document::Seq(vec![Document::Null]).to_string(), "<sequence[1]>");
    }
}

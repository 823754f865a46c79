//! Opaque, type-prefixed ULID identifiers.
//!
//! An [`Id<Kind>`] is a thin wrapper around a 26-character ULID body plus an
//! optional type prefix (`participant-`, `group-`, `session-`, `program-`).
//! Equality ignores the presence or absence of the prefix, mirroring the
//! original `ParticipantId.__eq__` (which strips its own prefix before
//! comparing) generalized to all four id kinds and made symmetric.

use cohort_core::EngineError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// Marker types for each identifier kind, carrying the kind's string prefix.
pub trait IdKind {
    const PREFIX: &'static str;
}

macro_rules! id_kind {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;
        impl IdKind for $name {
            const PREFIX: &'static str = $prefix;
        }
    };
}

id_kind!(ParticipantKind, "participant");
id_kind!(GroupKind, "group");
id_kind!(SessionKind, "session");
id_kind!(ProgramKind, "program");

pub type ParticipantId = Id<ParticipantKind>;
pub type GroupId = Id<GroupKind>;
pub type SessionId = Id<SessionKind>;
pub type ProgramId = Id<ProgramKind>;

/// A type-prefixed ULID identifier. Stores only the 26-character body;
/// `as_prefixed` reattaches `Kind::PREFIX` on demand.
pub struct Id<Kind> {
    body: String,
    _kind: PhantomData<Kind>,
}

impl<Kind: IdKind> Id<Kind> {
    /// Generates a fresh, validly-formed identifier.
    pub fn generate() -> Self {
        Id {
            body: Ulid::new().to_string(),
            _kind: PhantomData,
        }
    }

    /// Parses a value that may or may not carry this kind's prefix, validating
    /// the ULID body against the canonical pattern
    /// `^[0-9a-hjkmnp-zA-HJKMNP-Z]{26}$`.
    pub fn parse(value: &str) -> Result<Self, EngineError> {
        let prefix = format!("{}-", Kind::PREFIX);
        let body = value.strip_prefix(prefix.as_str()).unwrap_or(value);
        if !is_valid_ulid_body(body) {
            return Err(EngineError::InvalidIdentifier(format!(
                "{} is not a valid ULID body for a {} id",
                body,
                Kind::PREFIX
            )));
        }
        Ok(Id {
            body: body.to_string(),
            _kind: PhantomData,
        })
    }

    /// The bare 26-character ULID body, with no prefix.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The canonical `<prefix>-<body>` external representation.
    pub fn as_prefixed(&self) -> String {
        format!("{}-{}", Kind::PREFIX, self.body)
    }
}

/// `^[0-9a-hjkmnp-zA-HJKMNP-Z]{26}$` — Crockford base32 alphabet, excluding
/// I, L, O, U to avoid visual confusion with 1 and 0.
fn is_valid_ulid_body(body: &str) -> bool {
    body.len() == 26
        && body.bytes().all(|b| {
            matches!(b,
                b'0'..=b'9'
                | b'A'..=b'H' | b'J' | b'K' | b'M' | b'N' | b'P'..=b'Z'
                | b'a'..=b'h' | b'j' | b'k' | b'm' | b'n' | b'p'..=b'z'
            )
        })
}

impl<Kind> Clone for Id<Kind> {
    fn clone(&self) -> Self {
        Id {
            body: self.body.clone(),
            _kind: PhantomData,
        }
    }
}

impl<Kind> PartialEq for Id<Kind> {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}
impl<Kind> Eq for Id<Kind> {}

impl<Kind> fmt::Debug for Id<Kind> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.body)
    }
}

impl<Kind: IdKind> fmt::Display for Id<Kind> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_prefixed())
    }
}

impl<Kind: IdKind> Serialize for Id<Kind> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_prefixed())
    }
}

impl<'de, Kind: IdKind> Deserialize<'de> for Id<Kind> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Id::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl<Kind: IdKind> JsonSchema for Id<Kind> {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        std::borrow::Cow::Owned(format!("{}Id", Kind::PREFIX))
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "pattern": format!("^({}-)?[0-9A-HJKMNP-Za-km-z]{{26}}$", Kind::PREFIX),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_round_trip_through_parse() {
        let id = ParticipantId::generate();
        let reparsed = ParticipantId::parse(&id.as_prefixed()).unwrap();
        assert_eq!(id, reparsed);
    }

    #[test]
    fn equality_ignores_prefix_presence() {
        let id = ParticipantId::generate();
        let bare = ParticipantId::parse(id.body()).unwrap();
        assert_eq!(id, bare);
    }

    #[test]
    fn wrong_length_body_is_rejected() {
        assert!(ParticipantId::parse("participant-tooshort").is_err());
    }

    #[test]
    fn ambiguous_characters_are_rejected() {
        // 'I', 'L', 'O', 'U' are not in the Crockford alphabet.
        let bad = "0123456789ABCDEFGHIJKLMNOP"; // contains I, L
        assert!(ParticipantId::parse(bad).is_err());
    }

    #[test]
    fn a_group_prefix_does_not_satisfy_a_participant_id() {
        let id = GroupId::generate();
        // Stripping only happens for the matching prefix; a group- prefix
        // left on a participant parse just becomes part of the body check
        // and is rejected for being the wrong length/charset... unless the
        // body itself happens to validate, in which case the kinds are
        // deliberately not distinguished by the underlying string -- ids are
        // opaque type-prefixed strings, not a tagged union. This test only
        // pins down that the group- prefix is *not* stripped by
        // ParticipantId::parse.
        let parsed = ParticipantId::parse(&id.as_prefixed()).unwrap();
        assert_eq!(parsed.as_prefixed(), format!("participant-{}", id.body()));
    }
}

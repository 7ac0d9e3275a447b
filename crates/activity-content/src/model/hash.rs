//! Content hashes attached to media links.
//!
//! The library accepts pre-computed digests only; it never hashes content
//! itself.

use crate::model::AdditionalFields;

/// Declared wire members of a hash object.
pub(crate) const HASH_FIELDS: &[&str] = &["algorithm", "value"];

/// Hash algorithms with a prescribed digest shape.
///
/// Algorithms outside the supported set are carried verbatim as `Other`;
/// the validator rejects links whose hashes are all unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Keccak256,
    Sha256,
    /// Any other algorithm name, preserved verbatim.
    Other(String),
}

impl HashAlgorithm {
    /// Returns the wire name of this algorithm.
    pub fn wire_name(&self) -> &str {
        match self {
            HashAlgorithm::Keccak256 => "keccak256",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Other(name) => name,
        }
    }

    /// Maps a wire name onto the algorithm set. Total: unknown names become
    /// `Other`.
    pub fn from_wire(name: &str) -> HashAlgorithm {
        match name {
            "keccak256" => HashAlgorithm::Keccak256,
            "sha256" => HashAlgorithm::Sha256,
            other => HashAlgorithm::Other(other.to_string()),
        }
    }

    /// Returns the prescribed digest length in hex characters, or None for
    /// unsupported algorithms.
    pub fn digest_hex_len(&self) -> Option<usize> {
        match self {
            HashAlgorithm::Keccak256 | HashAlgorithm::Sha256 => Some(64),
            HashAlgorithm::Other(_) => None,
        }
    }
}

/// A pre-computed content hash: algorithm plus hex digest.
///
/// The digest serializes under the wire member `value`. A leading `0x`
/// prefix is accepted and preserved verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Hash {
    pub algorithm: HashAlgorithm,
    pub digest: String,
    pub additional_fields: AdditionalFields,
}

impl Hash {
    /// Creates a hash with no extension fields.
    pub fn new(algorithm: HashAlgorithm, digest: impl Into<String>) -> Self {
        Self {
            algorithm,
            digest: digest.into(),
            additional_fields: AdditionalFields::new(),
        }
    }

    /// The digest without any `0x` prefix.
    pub fn digest_hex(&self) -> &str {
        self.digest.strip_prefix("0x").unwrap_or(&self.digest)
    }
}

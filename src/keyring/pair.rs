//! Deterministic Ed25519 keypairs from derivation URIs.
//!
//! # Responsibilities
//! - Parse derivation URIs of the form `[phrase]//Junction[//Junction...]`
//! - Derive a keypair by hard seed chaining (hash of parent seed + junction)
//! - Sign transaction payloads
//!
//! # Design Decisions
//! - Hard junctions only; Ed25519 has no soft derivation
//! - An omitted phrase falls back to the well-known dev phrase, so
//!   `//Alice` is the same key on every machine

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::keyring::address::Address;
use crate::keyring::{KeyringError, KeyringResult};

/// Well-known development seed phrase. Public knowledge; never use for funds.
pub const DEV_PHRASE: &str =
    "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

/// Domain separation tag for hard junction derivation.
const HDKD_TAG: &[u8] = b"Ed25519HDKD";

/// A signing identity derived from a URI.
pub struct Pair {
    signing: SigningKey,
}

impl Pair {
    /// Derive a keypair from a URI such as `//Alice` or `phrase//Alice//stash`.
    ///
    /// The part before the first `//` is the seed phrase; when empty the
    /// well-known [`DEV_PHRASE`] is used. Each `//Name` junction hardens the
    /// seed deterministically.
    pub fn from_uri(uri: &str) -> KeyringResult<Self> {
        if uri.is_empty() {
            return Err(KeyringError::EmptyUri);
        }

        let (phrase, path) = match uri.find("//") {
            Some(idx) => (&uri[..idx], &uri[idx..]),
            None => (uri, ""),
        };

        if phrase.contains('/') {
            // A single slash before the first junction is a soft path.
            let soft = phrase.split('/').nth(1).unwrap_or_default();
            return Err(KeyringError::SoftJunction(soft.to_string()));
        }

        let phrase = if phrase.is_empty() { DEV_PHRASE } else { phrase };
        let mut seed = seed_from_phrase(phrase);

        for junction in parse_junctions(path)? {
            seed = derive_hard(&seed, junction);
        }

        Ok(Self {
            signing: SigningKey::from_bytes(&seed),
        })
    }

    /// The public key bytes.
    pub fn public(&self) -> [u8; 32] {
        self.signing.verifying_key().to_bytes()
    }

    /// The printable address of this identity.
    pub fn address(&self) -> Address {
        Address::from_public(self.public())
    }

    /// Sign a message, returning the 64-byte Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing.sign(message).to_bytes()
    }

    /// Verify a signature against an address.
    pub fn verify(address: &Address, message: &[u8], signature: &[u8; 64]) -> bool {
        let Ok(verifying) = VerifyingKey::from_bytes(address.as_bytes()) else {
            return false;
        };
        let signature = ed25519_dalek::Signature::from_bytes(signature);
        verifying.verify_strict(message, &signature).is_ok()
    }
}

impl std::fmt::Debug for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secret key is redacted; only the address is printable.
        f.debug_struct("Pair")
            .field("address", &self.address())
            .finish()
    }
}

/// Hash the phrase into a 32-byte root seed.
fn seed_from_phrase(phrase: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(phrase.as_bytes());
    hasher.finalize().into()
}

/// Harden the seed with one junction name.
fn derive_hard(seed: &[u8; 32], junction: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(HDKD_TAG);
    hasher.update(seed);
    hasher.update((junction.len() as u64).to_le_bytes());
    hasher.update(junction.as_bytes());
    hasher.finalize().into()
}

/// Split a `//A//B` path into its junction names.
fn parse_junctions(path: &str) -> KeyringResult<Vec<&str>> {
    if path.is_empty() {
        return Ok(Vec::new());
    }

    let mut junctions = Vec::new();
    for raw in path.split("//").skip(1) {
        if raw.is_empty() {
            return Err(KeyringError::EmptyJunction);
        }
        if raw.contains('/') {
            let soft = raw.split('/').nth(1).unwrap_or_default();
            return Err(KeyringError::SoftJunction(soft.to_string()));
        }
        junctions.push(raw);
    }
    Ok(junctions)
}

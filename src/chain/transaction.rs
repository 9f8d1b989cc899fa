//! Transaction building, signing, and wire encoding.
//!
//! # Responsibilities
//! - Build set-username calls
//! - Sign the canonical payload with the submitting identity
//! - Encode the signed envelope to its hex wire form
//!
//! # Design Decisions
//! - The signing payload is the canonical JSON of (call, signer, nonce);
//!   struct field order fixes the byte layout
//! - The transaction hash is the sha256 of the encoded envelope, matching
//!   what the node reports back on submission

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::chain::types::{ChainError, ChainResult, TxHash};
use crate::keyring::{Address, Pair};

/// Pallet name on the node.
pub const PALLET: &str = "usernameStorage";

/// Call name on the node.
pub const SET_USERNAME: &str = "setUsername";

/// The set-username call payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetUsernameCall {
    /// Target pallet.
    pub pallet: String,

    /// Call within the pallet.
    pub call: String,

    /// Username to store.
    pub username: String,
}

impl SetUsernameCall {
    /// Build a set-username call.
    pub fn new(username: &str) -> Self {
        Self {
            pallet: PALLET.to_string(),
            call: SET_USERNAME.to_string(),
            username: username.to_string(),
        }
    }
}

/// Signing payload; serialized form is what gets signed.
#[derive(Serialize)]
struct SigningPayload<'a> {
    call: &'a SetUsernameCall,
    signer: &'a Address,
    nonce: u64,
}

/// A signed transaction envelope ready for submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// The call being dispatched.
    pub call: SetUsernameCall,

    /// Address of the signing identity.
    pub signer: Address,

    /// Signer nonce at submission time.
    pub nonce: u64,

    /// Hex-encoded 64-byte Ed25519 signature over the signing payload.
    pub signature: String,
}

impl SignedTransaction {
    /// Sign a call with the given identity and nonce.
    pub fn new(pair: &Pair, call: SetUsernameCall, nonce: u64) -> ChainResult<Self> {
        let signer = pair.address();
        let payload = signing_payload(&call, &signer, nonce)?;
        let signature = pair.sign(&payload);

        Ok(Self {
            call,
            signer,
            nonce,
            signature: hex::encode(signature),
        })
    }

    /// Encode the envelope to its 0x-hex wire form.
    pub fn encode(&self) -> ChainResult<String> {
        let bytes = serde_json::to_vec(self).map_err(|e| ChainError::Codec(e.to_string()))?;
        Ok(format!("0x{}", hex::encode(bytes)))
    }

    /// Decode an envelope from its wire form.
    pub fn decode(wire: &str) -> ChainResult<Self> {
        let stripped = wire.strip_prefix("0x").unwrap_or(wire);
        let bytes = hex::decode(stripped).map_err(|e| ChainError::Codec(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ChainError::Codec(e.to_string()))
    }

    /// Check the signature against the signer address.
    pub fn verify(&self) -> ChainResult<()> {
        let payload = signing_payload(&self.call, &self.signer, self.nonce)?;
        let raw = hex::decode(&self.signature)
            .map_err(|_| ChainError::BadSignature)?;
        let signature: [u8; 64] = raw.try_into().map_err(|_| ChainError::BadSignature)?;

        if Pair::verify(&self.signer, &payload, &signature) {
            Ok(())
        } else {
            Err(ChainError::BadSignature)
        }
    }

    /// The transaction hash: sha256 of the encoded envelope.
    pub fn hash(&self) -> ChainResult<TxHash> {
        let wire = self.encode()?;
        let stripped = wire.strip_prefix("0x").unwrap_or(&wire);
        let bytes = hex::decode(stripped).map_err(|e| ChainError::Codec(e.to_string()))?;
        let digest: [u8; 32] = Sha256::digest(&bytes).into();
        Ok(TxHash::from_bytes(digest))
    }
}

/// Canonical bytes the signature covers.
fn signing_payload(
    call: &SetUsernameCall,
    signer: &Address,
    nonce: u64,
) -> ChainResult<Vec<u8>> {
    let payload = SigningPayload { call, signer, nonce };
    serde_json::to_vec(&payload).map_err(|e| ChainError::Codec(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Pair {
        Pair::from_uri("//Alice").unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let tx =
            SignedTransaction::new(&alice(), SetUsernameCall::new("alice_username"), 0).unwrap();
        assert!(tx.verify().is_ok());
    }

    #[test]
    fn test_tampered_call_fails_verification() {
        let mut tx =
            SignedTransaction::new(&alice(), SetUsernameCall::new("alice_username"), 0).unwrap();
        tx.call.username = "mallory".to_string();
        assert!(matches!(tx.verify(), Err(ChainError::BadSignature)));
    }

    #[test]
    fn test_wire_roundtrip() {
        let tx = SignedTransaction::new(&alice(), SetUsernameCall::new("alice_username"), 3)
            .unwrap();
        let wire = tx.encode().unwrap();
        assert!(wire.starts_with("0x"));

        let decoded = SignedTransaction::decode(&wire).unwrap();
        assert_eq!(decoded.call, tx.call);
        assert_eq!(decoded.signer, tx.signer);
        assert_eq!(decoded.nonce, 3);
        assert!(decoded.verify().is_ok());
    }

    #[test]
    fn test_hash_is_stable_and_nonce_sensitive() {
        let pair = alice();
        let call = SetUsernameCall::new("alice_username");
        let a = SignedTransaction::new(&pair, call.clone(), 0).unwrap();
        let b = SignedTransaction::new(&pair, call.clone(), 0).unwrap();
        let c = SignedTransaction::new(&pair, call, 1).unwrap();

        assert_eq!(a.hash().unwrap(), b.hash().unwrap());
        assert_ne!(a.hash().unwrap(), c.hash().unwrap());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(SignedTransaction::decode("0xzz").is_err());
        assert!(SignedTransaction::decode("0x00ff").is_err());
    }
}

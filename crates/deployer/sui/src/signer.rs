//! Deployer key loaded from hex-encoded Ed25519 secret key material.

use deployer_core::{Address, DeployError, Result, SigningIdentity};
use shared_crypto::intent::{Intent, IntentMessage};
use sui_types::base_types::SuiAddress;
use sui_types::crypto::{AccountKeyPair, Signature, SuiKeyPair, ToFromBytes};
use sui_types::transaction::TransactionData;

/// Signing identity backed by an in-memory Ed25519 key pair.
pub struct SuiSigner {
    keypair: SuiKeyPair,
    address: SuiAddress,
}

impl SuiSigner {
    /// Load a 32-byte Ed25519 secret key from hex (optional `0x` prefix).
    ///
    /// # Errors
    ///
    /// Returns `Config` if the string is not hex or not a valid key.
    pub fn from_hex(secret_key: &str) -> Result<Self> {
        let hex_str = secret_key.trim();
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str)
            .map_err(|e| DeployError::Config(format!("Private key is not valid hex: {}", e)))?;

        if bytes.len() != 32 {
            return Err(DeployError::Config(format!(
                "Ed25519 private key must be 32 bytes, got {}",
                bytes.len()
            )));
        }

        let keypair = AccountKeyPair::from_bytes(&bytes)
            .map_err(|e| DeployError::Config(format!("Invalid Ed25519 private key: {}", e)))?;

        Ok(Self::new(SuiKeyPair::Ed25519(keypair)))
    }

    pub fn new(keypair: SuiKeyPair) -> Self {
        let address = SuiAddress::from(&keypair.public());
        Self { keypair, address }
    }

    pub fn sui_address(&self) -> SuiAddress {
        self.address
    }

    /// Sign transaction data with the Sui transaction intent.
    pub fn sign_transaction(&self, tx_data: &TransactionData) -> Signature {
        Signature::new_secure(
            &IntentMessage::new(Intent::sui_transaction(), tx_data),
            &self.keypair,
        )
    }
}

impl SigningIdentity for SuiSigner {
    fn address(&self) -> Address {
        Address::new(self.address.to_string())
    }
}

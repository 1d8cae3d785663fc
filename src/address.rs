use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address as EvmAddress;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::network::DEFAULT_ADDRESS;

/// Length of a `0x`-prefixed 20-byte hex address
pub const ADDRESS_LEN: usize = 42;

/// How much checking the validator applies before accepting input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// `0x` + 40 hex characters, normalized to lowercase
    #[default]
    Strict,
    /// Anything non-empty, kept as typed (trimmed)
    Lenient,
}

/// An address accepted by the validator. Equality ignores ASCII case.
#[derive(Debug, Clone, Eq)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// EIP-55 checksummed form, when the address is well-formed hex
    pub fn checksummed(&self) -> Option<String> {
        EvmAddress::from_str(&self.0)
            .ok()
            .map(|addr| addr.to_checksum(None))
    }
}

impl Default for Address {
    /// The PoSELedger contract shown at startup
    fn default() -> Self {
        Address(DEFAULT_ADDRESS.to_lowercase())
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes candidate addresses typed by the user or read from config
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressValidator {
    strictness: Strictness,
}

impl AddressValidator {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Trim and validate a candidate address
    pub fn normalize(&self, input: &str) -> Result<Address, ValidationError> {
        let trimmed = input.trim();

        match self.strictness {
            Strictness::Strict => Self::normalize_strict(trimmed),
            Strictness::Lenient => {
                if trimmed.is_empty() {
                    Err(ValidationError::Empty)
                } else {
                    Ok(Address(trimmed.to_string()))
                }
            }
        }
    }

    fn normalize_strict(trimmed: &str) -> Result<Address, ValidationError> {
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidFormat(String::new()));
        }

        let Some(hex_part) = trimmed.strip_prefix("0x") else {
            return Err(ValidationError::InvalidFormat(trimmed.to_string()));
        };

        if trimmed.len() != ADDRESS_LEN || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidFormat(trimmed.to_string()));
        }

        // No checksum enforcement: mixed-case input is accepted as-is
        EvmAddress::from_str(trimmed)
            .map_err(|_| ValidationError::InvalidFormat(trimmed.to_string()))?;

        Ok(Address(trimmed.to_lowercase()))
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::helper::*;
use crate::error::FetchError;

// ============================================================================
// Domain Types
// ============================================================================

/// Balance for one address on one source. Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRecord {
    /// Amount in the network's native unit (ETH, MATIC)
    pub native_amount: Decimal,
    /// `None` when the backend could not price the balance (not the same as zero)
    pub usd_estimate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub value_native: Decimal,
}

/// Payload of the core API liveness endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CoreHealth {
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of the Emergent Agent liveness endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AgentHealth {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

impl AgentHealth {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// `/eth/balance/{address}` and `/polygon/balance/{address}`
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerBalanceWire {
    pub balance_eth: f64,
    #[serde(default)]
    pub balance_usd: Option<f64>,
}

/// `/emergent/etherscan/balance/{address}`
#[derive(Debug, Clone, Deserialize)]
pub struct AgentBalanceWire {
    #[serde(default)]
    pub balance_eth: Option<f64>,
    #[serde(default)]
    pub usd_estimate: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One element of `/eth/txs/{address}` and `/polygon/txs/{address}`
#[derive(Debug, Clone, Deserialize)]
pub struct TxWire {
    pub hash: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub value_eth: f64,
}

// ============================================================================
// Conversions
// ============================================================================

impl TryFrom<ExplorerBalanceWire> for BalanceRecord {
    type Error = FetchError;

    fn try_from(wire: ExplorerBalanceWire) -> Result<Self, Self::Error> {
        Ok(Self {
            native_amount: decimal_from_f64(wire.balance_eth)?,
            usd_estimate: wire.balance_usd.map(decimal_from_f64).transpose()?,
        })
    }
}

impl TryFrom<AgentBalanceWire> for BalanceRecord {
    type Error = FetchError;

    fn try_from(wire: AgentBalanceWire) -> Result<Self, Self::Error> {
        if wire.status.as_deref() == Some("error") {
            let message = wire
                .error
                .or(wire.message)
                .unwrap_or_else(|| "Emergent Agent returned an error".to_string());
            return Err(FetchError::transport(message));
        }

        let balance = wire
            .balance_eth
            .ok_or_else(|| FetchError::decode("missing field `balance_eth`"))?;

        Ok(Self {
            native_amount: decimal_from_f64(balance)?,
            usd_estimate: wire.usd_estimate.map(decimal_from_f64).transpose()?,
        })
    }
}

impl TryFrom<TxWire> for TransactionRecord {
    type Error = FetchError;

    fn try_from(wire: TxWire) -> Result<Self, Self::Error> {
        Ok(Self {
            hash: wire.hash,
            timestamp: wire.timestamp,
            value_native: decimal_from_f64(wire.value_eth)?,
        })
    }
}

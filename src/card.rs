//! Per-network card: a generation-tokened fetch state machine.
//!
//! Every transition into `Loading` bumps the card's generation and hands out a
//! [`FetchTicket`]. The ticket is run off the UI loop and its [`CardOutcome`]
//! carries the generation back; [`NetworkCard::apply`] drops any outcome whose
//! generation is no longer current, so a slow response for a superseded
//! address (or an earlier retry) can never overwrite fresher state.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::address::Address;
use crate::error::FetchError;
use crate::network::{NetworkId, NetworkMeta};
use crate::source::{BalanceRecord, DataSourceClient, TransactionRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum CardState {
    Idle,
    Loading,
    Loaded {
        balance: BalanceRecord,
        /// Most recent first, at most the card's page size
        transactions: Vec<TransactionRecord>,
        fetched_at: DateTime<Utc>,
    },
    Failed(String),
}

/// Both halves of a successful card fetch
#[derive(Debug, Clone, PartialEq)]
pub struct CardPayload {
    pub balance: BalanceRecord,
    pub transactions: Vec<TransactionRecord>,
}

/// Permission to fetch for one generation of one card
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub network: NetworkId,
    pub generation: u64,
    pub address: Address,
    pub tx_limit: usize,
}

/// Result of running a ticket, routed back to the card that issued it
#[derive(Debug, Clone)]
pub struct CardOutcome {
    pub network: NetworkId,
    pub generation: u64,
    pub result: Result<CardPayload, FetchError>,
}

impl FetchTicket {
    pub async fn run(self, client: &DataSourceClient) -> CardOutcome {
        let result = load_card(client, self.network.meta(), &self.address, self.tx_limit).await;
        CardOutcome {
            network: self.network,
            generation: self.generation,
            result,
        }
    }
}

/// Fetch balance and transactions concurrently; either failure fails the card.
pub async fn load_card(
    client: &DataSourceClient,
    meta: &NetworkMeta,
    address: &Address,
    tx_limit: usize,
) -> Result<CardPayload, FetchError> {
    let (balance, transactions) = tokio::try_join!(
        client.fetch_balance(meta, address),
        client.fetch_transactions(meta, address, tx_limit)
    )?;

    Ok(CardPayload {
        balance,
        transactions,
    })
}

pub struct NetworkCard {
    meta: &'static NetworkMeta,
    address: Option<Address>,
    generation: u64,
    state: CardState,
    tx_limit: usize,
}

impl NetworkCard {
    pub fn new(meta: &'static NetworkMeta, tx_limit: usize) -> Self {
        Self {
            meta,
            address: None,
            generation: 0,
            state: CardState::Idle,
            tx_limit,
        }
    }

    pub fn meta(&self) -> &'static NetworkMeta {
        self.meta
    }

    pub fn network(&self) -> NetworkId {
        self.meta.id
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, CardState::Failed(_))
    }

    /// Switch to a new address; whatever was shown before is dropped
    pub fn set_address(&mut self, address: Address) -> FetchTicket {
        self.address = Some(address);
        self.begin_load()
    }

    /// Re-issue the fetch pair for the current address
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.address.is_none() {
            return None;
        }
        info!(network = %self.meta.id, "retrying card");
        Some(self.begin_load())
    }

    fn begin_load(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = CardState::Loading;

        let address = self.address.clone().unwrap_or_default();
        debug!(
            network = %self.meta.id,
            generation = self.generation,
            address = %address,
            "card loading"
        );

        FetchTicket {
            network: self.meta.id,
            generation: self.generation,
            address,
            tx_limit: self.tx_limit,
        }
    }

    /// Apply a fetch outcome. Returns false when the outcome was stale.
    pub fn apply(&mut self, generation: u64, result: Result<CardPayload, FetchError>) -> bool {
        if generation != self.generation {
            debug!(
                network = %self.meta.id,
                stale = generation,
                current = self.generation,
                "discarding stale card result"
            );
            return false;
        }

        self.state = match result {
            Ok(CardPayload {
                balance,
                mut transactions,
            }) => {
                transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                transactions.truncate(self.tx_limit);
                info!(
                    network = %self.meta.id,
                    txs = transactions.len(),
                    "card loaded"
                );
                CardState::Loaded {
                    balance,
                    transactions,
                    fetched_at: Utc::now(),
                }
            }
            Err(err) => {
                warn!(network = %self.meta.id, error = %err, "card fetch failed");
                CardState::Failed(err.to_string())
            }
        };
        true
    }
}

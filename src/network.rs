//! Static metadata for every data source shown on the dashboard.

use std::fmt;

/// Default address shown at startup (PoSELedger on Polygon Amoy)
pub const DEFAULT_ADDRESS: &str = "0xC5c39D1f465cf664dcE5F3745836597CEe4EA028";

/// Default backend origin used when no backend URL is configured
pub const DEFAULT_ORIGIN: &str = "http://localhost:8001";

/// Transactions requested per card
pub const DEFAULT_TX_LIMIT: usize = 3;

/// Core API liveness endpoint
pub const CORE_HEALTH_PATH: &str = "/";

/// Emergent Agent liveness endpoint
pub const AGENT_HEALTH_PATH: &str = "/emergent/health";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkId {
    EmergentAgent,
    Ethereum,
    Polygon,
}

impl NetworkId {
    pub const ALL: [NetworkId; 3] = [Self::EmergentAgent, Self::Ethereum, Self::Polygon];

    pub fn meta(self) -> &'static NetworkMeta {
        match self {
            Self::EmergentAgent => &EMERGENT_AGENT,
            Self::Ethereum => &ETHEREUM,
            Self::Polygon => &POLYGON,
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.meta().name)
    }
}

/// Shape of the balance payload a source returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceFlavor {
    /// `{balance_eth, balance_usd}`
    Explorer,
    /// `{balance_eth, usd_estimate, status}`
    Agent,
}

/// Everything that differs between cards
#[derive(Debug)]
pub struct NetworkMeta {
    pub id: NetworkId,
    pub name: &'static str,
    /// Native unit label (ETH, MATIC)
    pub unit: &'static str,
    pub balance_path: &'static str,
    pub balance_flavor: BalanceFlavor,
    /// `None` for balance-only sources
    pub txs_path: Option<&'static str>,
    pub explorer_address_url: &'static str,
    pub explorer_tx_url: Option<&'static str>,
    /// (prefix, suffix) characters kept when truncating addresses and hashes
    pub truncate_window: (usize, usize),
}

impl NetworkMeta {
    pub fn has_transactions(&self) -> bool {
        self.txs_path.is_some()
    }

    pub fn address_url(&self, address: &str) -> String {
        self.explorer_address_url.replace("{address}", address)
    }

    pub fn tx_url(&self, hash: &str) -> Option<String> {
        self.explorer_tx_url.map(|t| t.replace("{hash}", hash))
    }
}

pub static EMERGENT_AGENT: NetworkMeta = NetworkMeta {
    id: NetworkId::EmergentAgent,
    name: "Emergent Agent",
    unit: "ETH",
    balance_path: "/emergent/etherscan/balance/{address}",
    balance_flavor: BalanceFlavor::Agent,
    txs_path: None,
    explorer_address_url: "https://etherscan.io/address/{address}",
    explorer_tx_url: None,
    truncate_window: (8, 6),
};

pub static ETHEREUM: NetworkMeta = NetworkMeta {
    id: NetworkId::Ethereum,
    name: "Ethereum",
    unit: "ETH",
    balance_path: "/eth/balance/{address}",
    balance_flavor: BalanceFlavor::Explorer,
    txs_path: Some("/eth/txs/{address}"),
    explorer_address_url: "https://etherscan.io/address/{address}",
    explorer_tx_url: Some("https://etherscan.io/tx/{hash}"),
    truncate_window: (6, 4),
};

pub static POLYGON: NetworkMeta = NetworkMeta {
    id: NetworkId::Polygon,
    name: "Polygon Amoy",
    unit: "MATIC",
    balance_path: "/polygon/balance/{address}",
    balance_flavor: BalanceFlavor::Explorer,
    txs_path: Some("/polygon/txs/{address}"),
    explorer_address_url: "https://amoy.polygonscan.com/address/{address}",
    explorer_tx_url: Some("https://amoy.polygonscan.com/tx/{hash}"),
    truncate_window: (6, 4),
};

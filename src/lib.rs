//! chainboard - Terminal dashboard for the PoSELedger address
//!
//! Shows native balance and recent transactions for one address across
//! several networks, side by side with backend health.

pub mod address;
pub mod app;
pub mod card;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod network;
pub mod source;
pub mod ui;

// Re-export commonly used types
pub use address::{Address, AddressValidator, Strictness};
pub use app::App;
pub use card::{CardOutcome, CardState, FetchTicket, NetworkCard};
pub use config::Config;
pub use error::{FetchError, ValidationError};
pub use health::{HealthProbe, HealthReport, HealthStatus, SystemHealth};
pub use network::{NetworkId, NetworkMeta};

use crate::address::{Address, AddressValidator};
use crate::card::{CardOutcome, FetchTicket, NetworkCard};
use crate::config::Config;
use crate::error::ValidationError;
use crate::health::HealthReport;
use crate::network::{NetworkId, NetworkMeta};
use tracing::{debug, info, warn};
use tui_input::Input;

pub struct App {
    pub config: Config,
    validator: AddressValidator,
    /// Address every card is showing
    address: Address,
    /// Uncommitted text in the input box
    pub input: Input,
    /// Rejection message for the last submit, if it was refused
    pub notice: Option<String>,
    cards: Vec<NetworkCard>,
    pub focused_card: usize,
    pub health: HealthReport,
    health_round: u64,
    pub selected_history_index: Option<usize>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let validator = AddressValidator::new(config.strictness);
        let address = validator
            .normalize(&config.default_address)
            .unwrap_or_else(|err| {
                warn!(error = %err, "configured default address rejected, using built-in");
                Address::default()
            });

        let cards = NetworkId::ALL
            .iter()
            .map(|id| NetworkCard::new(id.meta(), config.tx_limit.max(1)))
            .collect();

        Self {
            input: Input::new(config.default_address.trim().to_string()),
            config,
            validator,
            address,
            notice: None,
            cards,
            focused_card: 0,
            health: HealthReport::default(),
            health_round: 0,
            selected_history_index: None,
            should_quit: false,
        }
    }

    /// Fan the committed address out to every card
    pub fn start(&mut self) -> Vec<FetchTicket> {
        let address = self.address.clone();
        info!(address = %address, "loading cards");
        self.cards
            .iter_mut()
            .map(|card| card.set_address(address.clone()))
            .collect()
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn cards(&self) -> &[NetworkCard] {
        &self.cards
    }

    pub fn card(&self, network: NetworkId) -> Option<&NetworkCard> {
        self.cards.iter().find(|c| c.network() == network)
    }

    /// True when viewing the built-in PoSELedger address
    pub fn is_default_address(&self) -> bool {
        self.address == Address::default()
    }

    pub fn card_title(&self, meta: &NetworkMeta) -> String {
        match meta.id {
            NetworkId::EmergentAgent => meta.name.to_string(),
            _ if self.is_default_address() => format!("PoSELedger ({})", meta.name),
            NetworkId::Ethereum => "Ethereum Address".to_string(),
            NetworkId::Polygon => "Polygon Address".to_string(),
        }
    }

    /// Commit the selected history entry or the input box.
    ///
    /// On rejection the committed address is left untouched and `notice`
    /// explains why. Re-submitting the committed address issues no fetches.
    pub fn submit(&mut self) -> Result<Vec<FetchTicket>, ValidationError> {
        let candidate = match self.get_selected_history_query() {
            Some(query) => query,
            None => self.input.value().to_string(),
        };
        self.clear_history_selection();

        let address = match self.validator.normalize(&candidate) {
            Ok(address) => address,
            Err(err) => {
                warn!(input = %candidate.trim(), error = %err, "address rejected");
                self.notice = Some(err.to_string());
                return Err(err);
            }
        };

        self.notice = None;
        self.input = Input::new(address.to_string());

        if address == self.address {
            debug!(address = %address, "address unchanged");
            return Ok(Vec::new());
        }

        info!(address = %address, "address committed");
        if let Err(e) = self.config.add_recent_address(address.as_str()) {
            warn!(error = %e, "failed to save recent addresses");
        }
        self.address = address;

        Ok(self.start())
    }

    pub fn apply_card_outcome(&mut self, outcome: CardOutcome) -> bool {
        match self.cards.iter_mut().find(|c| c.network() == outcome.network) {
            Some(card) => card.apply(outcome.generation, outcome.result),
            None => false,
        }
    }

    pub fn retry_focused(&mut self) -> Option<FetchTicket> {
        self.cards.get_mut(self.focused_card)?.retry()
    }

    pub fn retry_failed(&mut self) -> Vec<FetchTicket> {
        self.cards
            .iter_mut()
            .filter(|c| c.is_failed())
            .filter_map(|c| c.retry())
            .collect()
    }

    pub fn focus_next(&mut self) {
        if !self.cards.is_empty() {
            self.focused_card = (self.focused_card + 1) % self.cards.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.cards.is_empty() {
            self.focused_card = (self.focused_card + self.cards.len() - 1) % self.cards.len();
        }
    }

    /// Start a health probe round; results from older rounds are ignored
    pub fn begin_health_check(&mut self) -> u64 {
        self.health_round += 1;
        self.health_round
    }

    pub fn apply_health(&mut self, round: u64, report: HealthReport) -> bool {
        if round != self.health_round {
            debug!(round, current = self.health_round, "discarding stale health report");
            return false;
        }
        self.health = report;
        true
    }

    pub fn get_recent_addresses(&self) -> &[String] {
        &self.config.recent_addresses
    }

    pub fn select_history_prev(&mut self) {
        let len = self.config.recent_addresses.len();
        if len == 0 {
            return;
        }

        self.selected_history_index = match self.selected_history_index {
            None => Some(len - 1),
            Some(0) => None, // Wrap to input
            Some(i) => Some(i - 1),
        };
    }

    pub fn select_history_next(&mut self) {
        let len = self.config.recent_addresses.len();
        if len == 0 {
            return;
        }

        self.selected_history_index = match self.selected_history_index {
            None => Some(0),
            Some(i) if i >= len - 1 => None, // Wrap to input
            Some(i) => Some(i + 1),
        };
    }

    pub fn get_selected_history_query(&self) -> Option<String> {
        self.selected_history_index
            .and_then(|i| self.config.recent_addresses.get(i).cloned())
    }

    pub fn clear_history_selection(&mut self) {
        self.selected_history_index = None;
    }

    pub fn delete_selected_history(&mut self) {
        let Some(idx) = self.selected_history_index else {
            return;
        };
        if idx >= self.config.recent_addresses.len() {
            return;
        }

        if let Err(e) = self.config.remove_recent_address(idx) {
            warn!(error = %e, "failed to save recent addresses");
        }

        // Adjust selection
        let len = self.config.recent_addresses.len();
        if len == 0 {
            self.selected_history_index = None;
        } else if idx >= len {
            self.selected_history_index = Some(len - 1);
        }
    }
}

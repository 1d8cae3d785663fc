use tracing::{info, warn};

use crate::source::DataSourceClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Checking,
    Healthy(String),
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy(_))
    }

    pub fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Healthy(_) => "healthy",
            Self::Unhealthy(_) => "unhealthy",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Checking => None,
            Self::Healthy(msg) | Self::Unhealthy(msg) => Some(msg),
        }
    }
}

/// One status per probed service. The two are never folded into a boolean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub core: HealthStatus,
    pub agent: HealthStatus,
}

impl Default for HealthReport {
    fn default() -> Self {
        Self {
            core: HealthStatus::Checking,
            agent: HealthStatus::Checking,
        }
    }
}

/// Overall reading of a [`HealthReport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemHealth {
    Checking,
    AllHealthy,
    /// One service is down while the other answers
    PartialDegradation,
    Outage,
}

impl HealthReport {
    pub fn summary(&self) -> SystemHealth {
        if matches!(self.core, HealthStatus::Checking)
            || matches!(self.agent, HealthStatus::Checking)
        {
            return SystemHealth::Checking;
        }

        match (self.core.is_healthy(), self.agent.is_healthy()) {
            (true, true) => SystemHealth::AllHealthy,
            (false, false) => SystemHealth::Outage,
            _ => SystemHealth::PartialDegradation,
        }
    }
}

pub struct HealthProbe {
    client: DataSourceClient,
}

impl HealthProbe {
    pub fn new(client: DataSourceClient) -> Self {
        Self { client }
    }

    /// Probe both services concurrently. Each call settles on its own: a
    /// failure becomes that service's `Unhealthy` and leaves the other intact.
    pub async fn check_all(&self) -> HealthReport {
        let (core, agent) = tokio::join!(self.client.core_health(), self.client.agent_health());

        let core = match core {
            Ok(health) => HealthStatus::Healthy(health.message.unwrap_or_else(|| "ok".to_string())),
            Err(err) => HealthStatus::Unhealthy(err.to_string()),
        };

        let agent = match agent {
            Ok(health) if health.is_healthy() => {
                HealthStatus::Healthy(health.message.unwrap_or_else(|| "ok".to_string()))
            }
            Ok(health) => HealthStatus::Unhealthy(
                health
                    .message
                    .unwrap_or_else(|| format!("status: {}", health.status)),
            ),
            Err(err) => HealthStatus::Unhealthy(err.to_string()),
        };

        let report = HealthReport { core, agent };
        match report.summary() {
            SystemHealth::AllHealthy => info!("all services healthy"),
            summary => warn!(
                ?summary,
                core = report.core.label(),
                agent = report.agent.label(),
                "health probe"
            ),
        }
        report
    }
}

use std::env;

/// Distinguishes runtime behavior for different stages of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for services embedding the engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub rewards: RewardsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("PANEL_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("PANEL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let expiry_months = match env::var("PANEL_REWARD_EXPIRY_MONTHS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidExpiryMonths { value: raw })?,
            Err(_) => RewardsConfig::DEFAULT_EXPIRY_MONTHS,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            rewards: RewardsConfig { expiry_months },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Reward ledger settings shared by the dashboard-facing aggregations.
///
/// The expiry window is passed into the summary computation explicitly so the
/// engine itself holds no process-wide constants.
#[derive(Debug, Clone, Copy)]
pub struct RewardsConfig {
    pub expiry_months: u32,
}

impl RewardsConfig {
    pub const DEFAULT_EXPIRY_MONTHS: u32 = 2;
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PANEL_REWARD_EXPIRY_MONTHS must be a whole number of months, got '{value}'")]
    InvalidExpiryMonths { value: String },
}

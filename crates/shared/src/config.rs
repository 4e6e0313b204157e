//! Application configuration management.
//!
//! The billing engine never reads configuration on its own. Callers load an
//! [`AppConfig`] once and hand the relevant pieces to the engine explicitly.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Billing configuration.
    #[serde(default)]
    pub billing: BillingConfig,
}

/// Billing configuration: locale, rounding and the wording of generated lines.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Locale of the landlord (e.g. "fr-FR"). Drives number and date notation
    /// in generated line descriptions.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Number of decimal places kept on every computed amount.
    #[serde(default = "default_amount_scale")]
    pub amount_scale: u32,
    /// Label appended to VAT lines.
    #[serde(default = "default_vat_label")]
    pub vat_label: String,
    /// Label of the line carrying an unpaid previous balance.
    #[serde(default = "default_debt_label")]
    pub debt_label: String,
    /// Label of the contract discount line.
    #[serde(default = "default_discount_label")]
    pub discount_label: String,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_amount_scale() -> u32 {
    2
}

fn default_vat_label() -> String {
    "VAT".to_string()
}

fn default_debt_label() -> String {
    "Balance carried forward".to_string()
}

fn default_discount_label() -> String {
    "Contract discount".to_string()
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            amount_scale: default_amount_scale(),
            vat_label: default_vat_label(),
            debt_label: default_debt_label(),
            discount_label: default_discount_label(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// - `config/default`
    /// - `config/{RUN_MODE}` (`RUN_MODE` defaults to `development`)
    /// - `RENTLOOP__*` environment variables (e.g. `RENTLOOP__BILLING__LOCALE`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RENTLOOP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

//! Explicit collaborators handed to every stage.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use rentloop_shared::BillingConfig;

use crate::term::TermKey;

/// Wording of the lines the engine generates itself.
pub trait LineLabels: fmt::Debug + Send + Sync {
    /// Description of the VAT line computed on the line described by `base`.
    fn vat(&self, base: &str, rate: Decimal) -> String;

    /// Description of the contract discount line.
    fn contract_discount(&self) -> String;

    /// Description of the debt carried from term `previous`.
    fn carried_debt(&self, previous: TermKey) -> String;
}

/// How numbers and dates are written in line descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    /// `5.5`, `2024-02-01`.
    Iso,
    /// `5,5`, `01/02/2024`.
    DecimalComma,
}

impl Notation {
    fn from_locale(locale: &str) -> Self {
        let language = locale.split(['-', '_']).next().unwrap_or_default();
        match language.to_ascii_lowercase().as_str() {
            "fr" | "de" | "es" | "it" | "pt" | "nl" => Self::DecimalComma,
            _ => Self::Iso,
        }
    }

    fn number(self, value: Decimal) -> String {
        match self {
            Self::Iso => value.to_string(),
            Self::DecimalComma => value.to_string().replace('.', ","),
        }
    }

    const fn date_format(self) -> &'static str {
        match self {
            Self::Iso => "%Y-%m-%d",
            Self::DecimalComma => "%d/%m/%Y",
        }
    }
}

/// Labels built from [`BillingConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultLabels {
    vat_label: String,
    debt_label: String,
    discount_label: String,
    notation: Notation,
}

impl DefaultLabels {
    /// Labels from billing configuration.
    #[must_use]
    pub fn from_config(config: &BillingConfig) -> Self {
        Self {
            vat_label: config.vat_label.clone(),
            debt_label: config.debt_label.clone(),
            discount_label: config.discount_label.clone(),
            notation: Notation::from_locale(&config.locale),
        }
    }
}

impl Default for DefaultLabels {
    fn default() -> Self {
        Self::from_config(&BillingConfig::default())
    }
}

impl LineLabels for DefaultLabels {
    fn vat(&self, base: &str, rate: Decimal) -> String {
        let percent = self.notation.number((rate * Decimal::ONE_HUNDRED).normalize());
        format!("{base} {} ({percent}%)", self.vat_label)
    }

    fn contract_discount(&self) -> String {
        self.discount_label.clone()
    }

    fn carried_debt(&self, previous: TermKey) -> String {
        match previous.date() {
            Ok(date) => format!(
                "{} ({})",
                self.debt_label,
                date.format(self.notation.date_format())
            ),
            Err(_) => self.debt_label.clone(),
        }
    }
}

/// Settings shared by all stages of a run.
#[derive(Debug, Clone)]
pub struct ComputeContext {
    /// Decimal places kept on computed amounts.
    pub scale: u32,
    /// Line wording.
    pub labels: Arc<dyn LineLabels>,
}

impl ComputeContext {
    /// Context with the given scale and labels.
    #[must_use]
    pub fn new(scale: u32, labels: Arc<dyn LineLabels>) -> Self {
        Self { scale, labels }
    }

    /// Context from billing configuration.
    #[must_use]
    pub fn from_config(config: &BillingConfig) -> Self {
        Self::new(
            config.amount_scale,
            Arc::new(DefaultLabels::from_config(config)),
        )
    }
}

impl Default for ComputeContext {
    fn default() -> Self {
        Self::from_config(&BillingConfig::default())
    }
}

use gc_api_types::ShopConfig;

/// Renders server amounts as `$45.00 MXN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    symbol: String,
    suffix: String,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::from_config(&ShopConfig::default())
    }
}

impl MoneyFormat {
    pub fn new(symbol: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            suffix: suffix.into(),
        }
    }

    pub fn from_config(config: &ShopConfig) -> Self {
        Self::new(config.currency_symbol.clone(), config.currency_suffix.clone())
    }

    pub fn format(&self, amount: f64) -> String {
        if self.suffix.is_empty() {
            format!("{}{:.2}", self.symbol, amount)
        } else {
            format!("{}{:.2} {}", self.symbol, amount, self.suffix)
        }
    }
}

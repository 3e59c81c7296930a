//! Market records and currency quotes.

use uuid::Uuid;

/// Validation failures for market input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketValidationError {
    /// The market name was blank.
    #[error("market name must not be blank")]
    BlankName,
    /// The searched name was blank.
    #[error("search name must not be blank")]
    BlankSearch,
    /// The currency code was blank.
    #[error("currency code must not be blank")]
    BlankCurrency,
}

/// Unsaved market fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketDraft {
    name: String,
    description: Option<String>,
}

impl MarketDraft {
    /// Validate and build a draft. The name is trimmed; a blank description
    /// is stored as `None`.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, MarketValidationError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(MarketValidationError::BlankName);
        }
        let description = description.filter(|text| !text.trim().is_empty());
        Ok(Self { name, description })
    }

    /// Market name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Attach an identifier.
    pub fn into_market(self, id: Uuid) -> Market {
        Market {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

/// A stored market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    id: Uuid,
    name: String,
    description: Option<String>,
}

impl Market {
    /// Store-assigned identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Market name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Upper-cased, non-blank currency code such as `USD` or `USD-BRL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Normalise and validate a code.
    ///
    /// # Examples
    /// ```
    /// use ada_backend::domain::CurrencyCode;
    ///
    /// let code = CurrencyCode::new(" usd ").expect("valid code");
    /// assert_eq!(code.as_str(), "USD");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MarketValidationError> {
        let code = raw.as_ref().trim().to_uppercase();
        if code.is_empty() {
            return Err(MarketValidationError::BlankCurrency);
        }
        Ok(Self(code))
    }

    /// Borrow the code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Quote as returned by the quotes API. Values stay textual.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurrencyQuote {
    /// Source currency.
    pub code: String,
    /// Target currency.
    pub codein: String,
    /// Human-readable pair name.
    pub name: String,
    /// Daily high.
    pub high: String,
    /// Daily low.
    pub low: String,
    /// Bid price.
    pub bid: String,
    /// Ask price.
    pub ask: String,
    /// Quote timestamp as formatted by the provider.
    pub create_date: String,
}

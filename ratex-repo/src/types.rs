//! Database row types.

use sqlx::FromRow;

use ratex_types::{CurrencyRate, CurrencySymbol, StoreError};

/// Rate row from database.
#[derive(FromRow)]
pub struct DbRate {
    pub currency_code: String,
    pub rate: f64,
}

impl DbRate {
    pub fn into_domain(self) -> Result<CurrencyRate, StoreError> {
        if !self.rate.is_finite() {
            return Err(StoreError::Decode(format!(
                "non-finite rate for {}",
                self.currency_code
            )));
        }
        Ok(CurrencyRate::new(self.currency_code, self.rate))
    }
}

/// Symbol row from database.
#[derive(FromRow)]
pub struct DbSymbol {
    pub code: String,
    pub name: String,
}

impl DbSymbol {
    pub fn into_domain(self) -> CurrencySymbol {
        CurrencySymbol::new(self.code, self.name)
    }
}

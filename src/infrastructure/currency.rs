use crate::domain::money::Money;
use crate::domain::ports::Currency;
use rust_decimal::RoundingStrategy;

/// Default currency collaborator: banker's rounding to a fixed number of
/// decimal places (two for the major currencies this engine bills in).
#[derive(Clone)]
pub struct BankersRounding {
    decimal_places: u32,
}

impl BankersRounding {
    pub fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }
}

impl Default for BankersRounding {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Currency for BankersRounding {
    fn round(&self, amount: Money) -> Money {
        Money::new(
            amount
                .value()
                .round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointNearestEven),
        )
    }
}

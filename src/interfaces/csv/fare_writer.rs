use crate::domain::fare::FareCalculation;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct FareRow {
    version_id: u64,
    pre_multiplier_subtotal: Decimal,
    multiplier: Decimal,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
    platform_commission: Decimal,
    driver_earnings: Decimal,
}

impl From<&FareCalculation> for FareRow {
    fn from(fare: &FareCalculation) -> Self {
        Self {
            version_id: fare.version_id,
            pre_multiplier_subtotal: fare.pre_multiplier_subtotal.value(),
            multiplier: fare.multipliers.total.value(),
            subtotal: fare.subtotal.value(),
            tax: fare.tax_amount.value(),
            total: fare.total.value(),
            platform_commission: fare.platform_commission.value(),
            driver_earnings: fare.driver_earnings.value(),
        }
    }
}

/// Writes computed fares as CSV, one row per calculation.
pub struct FareWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> FareWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_fare(&mut self, fare: &FareCalculation) -> Result<()> {
        self.writer.serialize(FareRow::from(fare))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fare::MultiplierStack;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_writes_header_and_row() {
        let fare = FareCalculation {
            version_id: 1,
            lines: Vec::new(),
            multipliers: MultiplierStack::NEUTRAL,
            pre_multiplier_subtotal: Money::new(dec!(24.00)),
            subtotal: Money::new(dec!(24.00)),
            tax_amount: Money::new(dec!(0.00)),
            total: Money::new(dec!(24.00)),
            platform_commission: Money::new(dec!(4.80)),
            driver_earnings: Money::new(dec!(19.20)),
        };

        let mut out = Vec::new();
        {
            let mut writer = FareWriter::new(&mut out);
            writer.write_fare(&fare).unwrap();
            writer.flush().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "version_id,pre_multiplier_subtotal,multiplier,subtotal,tax,total,\
             platform_commission,driver_earnings"
        );
        assert_eq!(lines.next().unwrap(), "1,24.00,1,24.00,0.00,24.00,4.80,19.20");
    }
}

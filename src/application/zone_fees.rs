use crate::domain::config::RideType;
use crate::domain::fare::FareLine;
use crate::domain::money::Money;
use crate::domain::ports::ZoneFeeStoreBox;
use crate::domain::zone_fee::ZoneFee;
use crate::error::Result;
use chrono::NaiveDateTime;

/// Resolves applicable zone fees for a trip's pickup and dropoff zones.
///
/// Percentage fees apply against the pre-multiplier running subtotal
/// (base + distance + time charges). All matches sum; each match yields one
/// breakdown line.
pub struct ZoneFeeResolver {
    store: ZoneFeeStoreBox,
}

enum TripEnd {
    Pickup,
    Dropoff,
}

impl ZoneFeeResolver {
    pub fn new(store: ZoneFeeStoreBox) -> Self {
        Self { store }
    }

    pub async fn resolve(
        &self,
        pickup_zone: Option<u32>,
        dropoff_zone: Option<u32>,
        ride_type: RideType,
        local: NaiveDateTime,
        pre_fee_subtotal: Money,
    ) -> Result<(Money, Vec<FareLine>)> {
        let mut total = Money::ZERO;
        let mut lines = Vec::new();

        for (zone, end) in [
            (pickup_zone, TripEnd::Pickup),
            (dropoff_zone, TripEnd::Dropoff),
        ] {
            let Some(zone_id) = zone else { continue };
            for fee in self.store.fees_for_zone(zone_id).await? {
                if applies(&fee, &end, ride_type, local) {
                    let amount = fee.charge(pre_fee_subtotal);
                    total += amount;
                    lines.push(FareLine::zone_fee(
                        fee.zone_id,
                        &fee.zone_name,
                        &fee.fee_type,
                        amount,
                    ));
                }
            }
        }

        Ok((total, lines))
    }
}

fn applies(fee: &ZoneFee, end: &TripEnd, ride_type: RideType, local: NaiveDateTime) -> bool {
    let end_ok = match end {
        TripEnd::Pickup => fee.applies_pickup,
        TripEnd::Dropoff => fee.applies_dropoff,
    };
    fee.active && end_ok && fee.applies_to_ride(ride_type) && fee.in_schedule(local)
}

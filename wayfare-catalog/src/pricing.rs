use rust_decimal::{Decimal, RoundingStrategy};

/// Children travel at half the adult fare.
pub const CHILD_FARE_RATIO: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Currency precision for stored amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Largest total a booking may carry (`NUMERIC(10, 2)`): 99 999 999.99.
pub const MAX_TOTAL_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, CURRENCY_SCALE);

/// Total for a party: `price * adults + price * 0.5 * children`, at 2 decimal places.
///
/// Does not enforce `adults >= 1`; submission parsing rejects empty parties
/// before a price is ever computed.
pub fn compute_total_price(price: Decimal, adults: u32, children: u32) -> Decimal {
    let adult_total = price * Decimal::from(adults);
    let child_total = price * CHILD_FARE_RATIO * Decimal::from(children);

    let mut total = (adult_total + child_total)
        .round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    total.rescale(CURRENCY_SCALE);
    total
}

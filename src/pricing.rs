use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const CURRENCY_EUR: &str = "EUR";
pub const CURRENCY_TND: &str = "TND";

/// Fixed EUR→TND rate applied for Tunisian clients.
pub const TND_RATE: Decimal = dec!(3.3);

/// Flat base price of an order assembled from saved designs.
pub const COMBINED_BASE_PRICE: Decimal = dec!(5.99);

/// Per-unit price of an order, derived from its stored total. Quantity is
/// clamped to 1 so legacy zero-quantity rows don't divide by zero.
pub fn unit_price(total_price: Decimal, quantity: i32) -> Decimal {
    total_price / Decimal::from(quantity.max(1))
}

/// Total for `quantity` units, rounded to cents.
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    (unit_price * Decimal::from(quantity)).round_dp(2)
}

/// Design price for a multi-side combination. Only 2–4 sides are sellable.
pub fn combination_price(side_count: usize) -> Option<Decimal> {
    match side_count {
        2 => Some(dec!(19.99)),
        3 => Some(dec!(29.99)),
        4 => Some(dec!(39.99)),
        _ => None,
    }
}

/// Resolve the billed total and currency for an admin-order snapshot.
///
/// An explicit currency from the request wins verbatim and suppresses the
/// derived conversion. Otherwise the total stays in EUR unless the client's
/// country is Tunisia (matched case-insensitively), which converts at
/// [`TND_RATE`].
pub fn localize(
    total_price: Decimal,
    country: Option<&str>,
    currency_override: Option<&str>,
) -> (Decimal, String) {
    if let Some(currency) = currency_override {
        return (total_price, currency.to_string());
    }

    let tunisian = country.is_some_and(|c| c.trim().eq_ignore_ascii_case("tunisia"));
    if tunisian {
        ((total_price * TND_RATE).round_dp(2), CURRENCY_TND.to_string())
    } else {
        (total_price, CURRENCY_EUR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_price_divides_by_quantity() {
        assert_eq!(unit_price(dec!(30.00), 2), dec!(15.00));
    }

    #[test]
    fn unit_price_clamps_zero_quantity() {
        assert_eq!(unit_price(dec!(30.00), 0), dec!(30.00));
    }

    #[test]
    fn requantified_total_uses_the_unit_price() {
        // 30.00 for 2 units, resubmitted for 3 → 45.00.
        let unit = unit_price(dec!(30.00), 2);
        assert_eq!(line_total(unit, 3), dec!(45.00));
    }

    #[test]
    fn tunisia_converts_to_tnd_at_fixed_rate() {
        let (total, currency) = localize(dec!(45.00), Some("Tunisia"), None);
        assert_eq!(total, dec!(148.50));
        assert_eq!(currency, CURRENCY_TND);
    }

    #[test]
    fn tunisia_match_is_case_insensitive() {
        for country in ["tunisia", "TUNISIA", "TuNiSiA", " tunisia "] {
            let (_, currency) = localize(dec!(10.00), Some(country), None);
            assert_eq!(currency, CURRENCY_TND);
        }
    }

    #[test]
    fn other_countries_stay_in_eur() {
        let (total, currency) = localize(dec!(45.00), Some("France"), None);
        assert_eq!(total, dec!(45.00));
        assert_eq!(currency, CURRENCY_EUR);

        let (_, currency) = localize(dec!(45.00), None, None);
        assert_eq!(currency, CURRENCY_EUR);
    }

    #[test]
    fn explicit_currency_suppresses_conversion() {
        let (total, currency) = localize(dec!(45.00), Some("Tunisia"), Some("USD"));
        assert_eq!(total, dec!(45.00));
        assert_eq!(currency, "USD");
    }

    #[test]
    fn combination_price_table() {
        assert_eq!(combination_price(2), Some(dec!(19.99)));
        assert_eq!(combination_price(3), Some(dec!(29.99)));
        assert_eq!(combination_price(4), Some(dec!(39.99)));
        assert_eq!(combination_price(1), None);
        assert_eq!(combination_price(5), None);
    }

    #[test]
    fn combined_total_adds_base_price() {
        let design_price = combination_price(2).unwrap();
        assert_eq!(COMBINED_BASE_PRICE + design_price, dec!(25.98));
    }
}

use rust_decimal::Decimal;

use crate::state::StoreConfig;

/// Builds the `upi://pay` deep link scanned by payment apps. `pn` and `tn`
/// may contain spaces and are percent encoded; the payee address and
/// currency code are passed through verbatim.
pub fn payment_string(store: &StoreConfig, amount: Decimal, reference: &str) -> String {
    let note = format!("Order Payment {reference}");
    format!(
        "upi://pay?pa={}&pn={}&am={:.2}&cu={}&tn={}",
        store.upi_id,
        urlencoding::encode(&store.business_name),
        amount,
        store.currency,
        urlencoding::encode(&note),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_the_payment_fields() {
        let store = StoreConfig::default();
        let amount = Decimal::new(24950, 2);
        let upi = payment_string(&store, amount, "ORD-123-abcdefghi");
        assert_eq!(
            upi,
            "upi://pay?pa=merchant@paytm&pn=FoodStore&am=249.50&cu=INR\
             &tn=Order%20Payment%20ORD-123-abcdefghi"
        );
    }

    #[test]
    fn percent_encodes_business_names_with_spaces() {
        let store = StoreConfig {
            upi_id: "shop@upi".to_string(),
            business_name: "Sharma Kirana".to_string(),
            currency: "INR".to_string(),
        };
        let upi = payment_string(&store, Decimal::new(100, 0), "ORD-1-aaaaaaaaa");
        assert!(upi.contains("pn=Sharma%20Kirana"));
        assert!(upi.contains("am=100.00"));
    }
}

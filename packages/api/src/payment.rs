use chrono::Utc;

pub mod qr;
pub mod upi;

/// Human facing order reference, e.g. `ORD-1755700000000-x4k9qm2pa`.
/// Shown to the customer and embedded in the payment note.
pub fn order_reference() -> String {
    format!(
        "ORD-{}-{}",
        Utc::now().timestamp_millis(),
        kirana_types::random_base36(9)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_shape() {
        let reference = order_reference();
        let parts: Vec<&str> = reference.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn references_do_not_collide() {
        assert_ne!(order_reference(), order_reference());
    }
}

pub use anyhow::{Error, Result, anyhow, bail};
pub use serde_json as json;
pub use serde_json::Value;

pub use rand;
pub use tokio;

pub mod utils;

/// Collision resistant ids for every persisted row.
pub fn create_id() -> String {
    cuid2::create_id()
}

/// Lowercase base36 string of the given length, used for human facing
/// references where a full cuid would be overkill.
pub fn random_base36(len: usize) -> String {
    use rand::Rng;

    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = create_id();
        let b = create_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn base36_has_requested_length_and_alphabet() {
        let suffix = random_base36(9);
        assert_eq!(suffix.len(), 9);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }
}

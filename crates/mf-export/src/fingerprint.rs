//! Content fingerprint of an export.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the export text.
pub fn fingerprint(export: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(export.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_stability() {
        let a = fingerprint("mission \"m\" {\n}\n");
        let b = fingerprint("mission \"m\" {\n}\n");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn fingerprint_differs_for_different_inputs() {
        assert_ne!(fingerprint("mission \"a\" {\n}\n"), fingerprint("mission \"b\" {\n}\n"));
    }
}

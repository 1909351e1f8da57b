/// Generate a URL-safe random ID of a given length.
#[must_use]
pub fn nice_id(length: usize) -> String {
    const URL_SAFE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_";
    (0..length)
        .map(|_| {
            let idx = rand::random_range(0..URL_SAFE.len());
            URL_SAFE[idx] as char
        })
        .collect()
}

/// Human readable code, e.g. `ADS-7KQ2MX`. Uppercase letters and digits only.
#[must_use]
pub fn collab_code(prefix: &str, length: usize) -> String {
    const CODE_CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let suffix: String = (0..length)
        .map(|_| CODE_CHARS[rand::random_range(0..CODE_CHARS.len())] as char)
        .collect();
    format!("{prefix}-{suffix}")
}

/// Logs a warning message with an 'ALERT:' prefix.
#[macro_export]
macro_rules! alert {
    ($($arg:tt)*) => {
        tracing::warn!("ALERT: {}", format_args!($($arg)*));
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_id_has_requested_length() {
        let id = nice_id(12);
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn collab_code_uses_prefix() {
        let code = collab_code("BNR", 6);
        assert!(code.starts_with("BNR-"));
        assert_eq!(code.len(), 10);
        assert!(!code.contains('O') && !code.contains('0'));
    }
}

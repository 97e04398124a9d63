//! Unique identifier generation for platform resources.

/// Generate a fresh platform resource identifier.
///
/// Identifiers are 20 lowercase hexadecimal-ish characters drawn from a v4
/// UUID. The platform rejects ids that start with a digit, so a leading
/// digit is folded into the `g`..`p` range.
///
/// # Examples
///
/// ```
/// use gatherly_platform::unique_id;
///
/// let id = unique_id();
/// assert_eq!(id.len(), 20);
/// assert!(id.chars().next().is_some_and(|c| c.is_ascii_alphabetic()));
/// assert_ne!(unique_id(), unique_id());
/// ```
#[must_use]
pub fn unique_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    let mut out = String::with_capacity(20);
    for (index, ch) in hex.chars().take(20).enumerate() {
        if index == 0 && ch.is_ascii_digit() {
            // '0'..'9' -> 'g'..'p'
            out.push((b'g' + (ch as u8 - b'0')) as char);
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::unique_id;

    #[test]
    fn test_ids_are_twenty_chars() {
        for _ in 0..64 {
            let id = unique_id();
            assert_eq!(id.len(), 20);
        }
    }

    #[test]
    fn test_ids_start_with_a_letter() {
        for _ in 0..256 {
            let id = unique_id();
            let first = id.chars().next();
            assert!(first.is_some_and(|c| c.is_ascii_lowercase() && c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let a = unique_id();
        let b = unique_id();
        assert_ne!(a, b);
    }
}

pub mod logging;

/// First `len` characters of an opaque id, for display.
pub fn short_id(id: &str, len: usize) -> &str {
    match id.char_indices().nth(len) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("A1B2C3D4-E5F6", 8), "A1B2C3D4");
        assert_eq!(short_id("abc", 8), "abc");
    }
}

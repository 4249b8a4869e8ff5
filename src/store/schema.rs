/// Blob holding the per-item progress map, serialized as a flat JSON object.
pub const PROGRESS_KEY: &str = "progress.json";

/// Blob holding the advanced-mode flag as the literal text `true`/`false`.
pub const MODE_KEY: &str = "advanced_mode";

pub fn encode_mode(advanced: bool) -> String {
    advanced.to_string()
}

/// Anything other than `true` reads as plain mode.
pub fn decode_mode(raw: &str) -> bool {
    raw.trim().parse::<bool>().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_flag_round_trips_as_text() {
        assert_eq!(encode_mode(true), "true");
        assert!(decode_mode("true\n"));
        assert!(!decode_mode(&encode_mode(false)));
    }

    #[test]
    fn garbage_mode_flag_is_plain() {
        assert!(!decode_mode("yes"));
        assert!(!decode_mode(""));
    }
}

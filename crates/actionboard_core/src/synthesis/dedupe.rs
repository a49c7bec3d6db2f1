//! Prefix-based near-duplicate filter.
//!
//! This is an intentionally cheap approximation, not similarity scoring. It
//! is order-sensitive and asymmetric: an earlier string may suppress a later
//! one without the reverse holding.

/// Drops strings whose leading `prefix_len` characters (case-insensitive)
/// already occur inside an accepted string.
///
/// Order-preserving; the first occurrence wins. Strings shorter than
/// `prefix_len` compare with their whole text.
pub fn dedupe<S: AsRef<str>>(texts: &[S], prefix_len: usize) -> Vec<String> {
    let mut accepted: Vec<String> = Vec::new();
    let mut accepted_lowered: Vec<String> = Vec::new();

    for text in texts {
        let text = text.as_ref();
        let lowered = text.to_lowercase();
        let prefix: String = lowered.chars().take(prefix_len).collect();

        if accepted_lowered
            .iter()
            .any(|existing| existing.contains(prefix.as_str()))
        {
            continue;
        }

        accepted.push(text.to_string());
        accepted_lowered.push(lowered);
    }

    accepted
}

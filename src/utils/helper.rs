use crate::models::address::Address;

/// Truncate a string to a maximum length in bytes.
/// Descriptions come from external metadata documents, so the cut must land
/// on a char boundary rather than a raw byte index.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut cut = max_len.saturating_sub(3);
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

/// Format an address for display (truncated)
pub fn format_address(address: &Address) -> String {
    let s = address.as_str();
    format!("{}...{}", &s[..6], &s[s.len() - 4..])
}

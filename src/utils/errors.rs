/// Extract a user-presentable message from an upstream API error string
///
/// Removes technical prefixes like:
/// "HTTP Error (500): upstream exploded" or "Request Error: connection reset"
///
/// Returns only the meaningful tail: "upstream exploded"
pub fn extract_clean_error(error_msg: &str) -> String {
    const PREFIXES: [&str; 4] = ["HTTP Error", "Server Error", "Request Error", "API Error"];

    if PREFIXES.iter().any(|p| error_msg.starts_with(p)) {
        if let Some(idx) = error_msg.find(": ") {
            let tail = error_msg[idx + 2..].trim();
            if !tail.is_empty() {
                return tail.to_string();
            }
        }
    }

    error_msg.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_known_prefixes() {
        assert_eq!(
            extract_clean_error("HTTP Error (500): upstream exploded"),
            "upstream exploded"
        );
        assert_eq!(
            extract_clean_error("Request Error: connection reset"),
            "connection reset"
        );
    }

    #[test]
    fn leaves_plain_messages_alone() {
        assert_eq!(extract_clean_error("nothing to strip"), "nothing to strip");
    }
}

//! Newline-delimited list parsing.

/// Split `text` into one item per line, trimmed, with blank lines dropped.
pub fn parse_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trims_and_skips_blank_lines() {
        let text = "  Ann \n\n\tBea\r\n   \nCid";
        assert_eq!(parse_items(text), vec!["Ann", "Bea", "Cid"]);
    }

    #[test]
    fn empty_text_gives_no_items() {
        assert!(parse_items("").is_empty());
        assert!(parse_items("\n \n").is_empty());
    }
}

//! Assembling page text into one document string.

/// Join each page's text items with single spaces, ending every page with a
/// newline.
pub fn join_pages<S: AsRef<str>>(pages: &[Vec<S>]) -> String {
    let mut text = String::new();
    for items in pages {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(item.as_ref());
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_space_joined_pages_newline_terminated() {
        let pages = vec![
            vec!["KKH", "Information", "file"],
            vec!["Neonatal", "care"],
        ];
        assert_eq!(join_pages(&pages), "KKH Information file\nNeonatal care\n");
    }

    #[test]
    fn empty_pages_still_emit_newline() {
        let pages: Vec<Vec<String>> = vec![vec![], vec!["text".into()], vec![]];
        assert_eq!(join_pages(&pages), "\ntext\n\n");
        assert_eq!(join_pages::<String>(&[]), "");
    }
}

/// Telegram refuses messages longer than 4096 characters.
pub const MESSAGE_LIMIT: usize = 4000;

/// Splits `text` into pages of at most `limit` characters.
/// Pages break at line ends where possible. A line that alone exceeds the limit
/// is cut on a char boundary, never inside an HTML entity such as `&amp;`.
pub fn paginate(text: &str, limit: usize) -> Vec<String> {
    assert!(limit > 0, "page limit must be positive");

    let mut pages = Vec::new();
    let mut page = String::new();
    let mut page_len = 0;

    for line in text.lines() {
        let line_len = line.chars().count();
        // +1 for the newline joining it to the page
        let needed = if page.is_empty() { line_len } else { line_len + 1 };

        if page_len + needed <= limit {
            if !page.is_empty() {
                page.push('\n');
            }
            page.push_str(line);
            page_len += needed;
            continue;
        }

        if !page.is_empty() {
            let full = std::mem::take(&mut page);
            if !full.trim().is_empty() {
                pages.push(full);
            }
            page_len = 0;
        }

        if line_len <= limit {
            page.push_str(line);
            page_len = line_len;
        } else {
            let mut pieces = split_long_line(line, limit);
            // the tail can still share a page with what follows
            if let Some(last) = pieces.pop() {
                pages.extend(pieces);
                page_len = last.chars().count();
                page = last;
            }
        }
    }

    if !page.trim().is_empty() {
        pages.push(page);
    }
    pages
}

fn split_long_line(line: &str, limit: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut pieces = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = (start + limit).min(chars.len());
        if end < chars.len() {
            if let Some(amp) = open_entity_start(&chars[start..end]) {
                if amp > 0 {
                    end = start + amp;
                }
            }
        }
        pieces.push(chars[start..end].iter().collect());
        start = end;
    }
    pieces
}

/// Position of a trailing `&` that has no `;` after it within the chunk.
fn open_entity_start(chunk: &[char]) -> Option<usize> {
    let amp = chunk.iter().rposition(|c| *c == '&')?;
    if chunk[amp..].contains(&';') {
        None
    } else {
        Some(amp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_page() {
        assert_eq!(paginate("one\ntwo", 100), vec!["one\ntwo".to_string()]);
    }

    #[test]
    fn empty_text_has_no_pages() {
        assert!(paginate("", 10).is_empty());
        assert!(paginate("\n\n", 10).is_empty());
    }

    #[test]
    fn blank_lines_never_make_a_page_of_their_own() {
        assert_eq!(paginate("  \nxxxxxxxxx", 10), vec!["xxxxxxxxx".to_string()]);
        let pages = paginate("aaaa\n   \n   \nbbbbbbbbbb", 10);
        assert!(pages.iter().all(|p| !p.trim().is_empty()));
    }

    #[test]
    fn breaks_at_line_ends() {
        let pages = paginate("aaaa\nbbbb\ncccc", 9);
        assert_eq!(pages, vec!["aaaa\nbbbb", "cccc"]);
    }

    #[test]
    fn long_lines_are_cut_by_chars_not_bytes() {
        let line = "ب".repeat(25);
        let pages = paginate(&line, 10);
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|p| p.chars().count() <= 10));
        assert_eq!(pages.concat(), line);
    }

    #[test]
    fn tail_of_a_long_line_shares_the_next_page() {
        let pages = paginate("abcdefghijkl\nxy", 10);
        assert_eq!(pages, vec!["abcdefghij", "kl\nxy"]);
    }

    #[test]
    fn entities_are_not_split() {
        let pages = paginate("abcdefg&amp;xyz", 10);
        assert_eq!(pages[0], "abcdefg");
        assert_eq!(pages[1], "&amp;xyz");
    }

    #[test]
    fn every_page_respects_the_limit() {
        let text: String = (0..500).map(|i| format!("line number {i}\n")).collect();
        let pages = paginate(&text, MESSAGE_LIMIT);
        assert!(pages.len() > 1);
        assert!(pages.iter().all(|p| p.chars().count() <= MESSAGE_LIMIT));
        assert_eq!(pages.join("\n"), text.trim_end());
    }
}

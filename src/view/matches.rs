use serde::{Deserialize, Serialize};

/// A run of text that either matched the search term or did not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSegment {
    pub text: String,
    pub matched: bool,
}

/// Splits `text` around every case-insensitive occurrence of `term`. The
/// segments concatenate back to `text`.
pub fn segments(text: &str, term: &str) -> Vec<MatchSegment> {
    let term = term.trim();
    if term.is_empty() || text.is_empty() {
        return vec![MatchSegment {
            text: text.to_string(),
            matched: false,
        }];
    }

    let haystack = fold(text);
    let needle = fold(term);

    let mut segments = vec![];
    let mut cursor = 0;
    let mut search_from = 0;
    while let Some(offset) = find_chars(&haystack[search_from..], &needle) {
        let start = search_from + offset;
        let end = start + needle.len();
        if start > cursor {
            segments.push(unmatched(&haystack, cursor, start));
        }
        segments.push(MatchSegment {
            text: collect(&haystack, start, end),
            matched: true,
        });
        cursor = end;
        search_from = end;
    }
    if cursor < haystack.len() {
        segments.push(unmatched(&haystack, cursor, haystack.len()));
    }

    segments
}

// Pairs each original char with its simple lowercase form so offsets line up
// with the original text even when lowercasing changes byte lengths.
fn fold(text: &str) -> Vec<(char, char)> {
    text.chars()
        .map(|c| (c, c.to_lowercase().next().unwrap_or(c)))
        .collect()
}

fn find_chars(haystack: &[(char, char)], needle: &[(char, char)]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }

    haystack.windows(needle.len()).position(|window| {
        window
            .iter()
            .zip(needle)
            .all(|((_, a), (_, b))| a == b)
    })
}

fn collect(chars: &[(char, char)], start: usize, end: usize) -> String {
    chars[start..end].iter().map(|(original, _)| original).collect()
}

fn unmatched(chars: &[(char, char)], start: usize, end: usize) -> MatchSegment {
    MatchSegment {
        text: collect(chars, start, end),
        matched: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(segments: &[MatchSegment]) -> String {
        segments
            .iter()
            .map(|s| {
                if s.matched {
                    format!("[{}]", s.text)
                } else {
                    s.text.clone()
                }
            })
            .collect()
    }

    #[test]
    fn marks_every_occurrence() {
        let result = segments("Coupon expired, coupon missing", "COUPON");
        assert_eq!(render(&result), "[Coupon] expired, [coupon] missing");
    }

    #[test]
    fn empty_term_yields_single_unmatched_segment() {
        let result = segments("Unable to redeem", " ");
        assert_eq!(
            result,
            vec![MatchSegment {
                text: "Unable to redeem".to_string(),
                matched: false,
            }]
        );
    }

    #[test]
    fn no_match_yields_original_text() {
        let result = segments("Missing tokens", "refund");
        assert_eq!(render(&result), "Missing tokens");
        assert!(result.iter().all(|s| !s.matched));
    }

    #[test]
    fn segments_concatenate_to_input() {
        let text = "CVS y más: Más ExtraBucks";
        let result = segments(text, "más");
        let joined: String = result.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, text);
        assert_eq!(render(&result), "CVS y [más]: [Más] ExtraBucks");
    }
}

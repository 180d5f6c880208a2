//! Search suggestions
//!
//! Type-ahead suggestions for the header search box, drawn from a fixed
//! vocabulary.

/// Terms offered as search suggestions, in display order.
pub const VOCABULARY: [&str; 15] = [
    "Women's Fashion",
    "Men's Fashion",
    "Shoes",
    "Accessories",
    "Bags",
    "Watches",
    "Jewelry",
    "Sunglasses",
    "T-shirts",
    "Jeans",
    "Dresses",
    "Jackets",
    "Sneakers",
    "Boots",
    "Sandals",
];

/// Most suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 5;

/// A run of suggestion text, highlighted when it matches the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Text of the run
    pub text: String,

    /// Whether the run matches the query
    pub highlighted: bool,
}

/// A suggested search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The term
    pub term: &'static str,

    /// The term split into plain and highlighted runs
    pub segments: Vec<Segment>,
}

impl Suggestion {
    /// The term with highlighted runs wrapped in `open` and `close`.
    pub fn marked(&self, open: &str, close: &str) -> String {
        self.segments
            .iter()
            .map(|segment| {
                if segment.highlighted {
                    format!("{open}{}{close}", segment.text)
                } else {
                    segment.text.clone()
                }
            })
            .collect()
    }
}

/// Suggestions for `query`: the first [`MAX_SUGGESTIONS`] vocabulary terms
/// containing it, ignoring case. A blank query suggests nothing.
pub fn suggest(query: &str) -> Vec<Suggestion> {
    let query = query.trim();

    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();

    VOCABULARY
        .iter()
        .copied()
        .filter(|term| term.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .map(|term| Suggestion {
            term,
            segments: highlight(term, query),
        })
        .collect()
}

/// Split `text` into runs, marking every case-insensitive occurrence of
/// `query` as highlighted.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let needle: Vec<char> = query.chars().collect();
    let chars: Vec<char> = text.chars().collect();

    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut rest = chars.as_slice();

    while let Some((first, tail)) = rest.split_first() {
        if !needle.is_empty()
            && let Some((hit, after)) = rest.split_at_checked(needle.len())
            && hit
                .iter()
                .zip(&needle)
                .all(|(left, right)| same_letter(*left, *right))
        {
            if !plain.is_empty() {
                segments.push(Segment {
                    text: std::mem::take(&mut plain),
                    highlighted: false,
                });
            }

            segments.push(Segment {
                text: hit.iter().collect(),
                highlighted: true,
            });

            rest = after;
        } else {
            plain.push(*first);
            rest = tail;
        }
    }

    if !plain.is_empty() {
        segments.push(Segment {
            text: plain,
            highlighted: false,
        });
    }

    segments
}

fn same_letter(left: char, right: char) -> bool {
    left == right || left.to_lowercase().eq(right.to_lowercase())
}

//! Relevance search over loaded notes
//!
//! A linear scan: every call scores every note against the query. Matching is
//! case-insensitive and all positions are counted in chars.

use notes_types::SearchHit;
use std::cmp::Ordering;

use super::note::Note;

const FILENAME_WEIGHT: f64 = 3.0;
const SUMMARY_WEIGHT: f64 = 2.0;
const BODY_WEIGHT: f64 = 1.0;
/// Added once per tag containing the query
const TAG_SCORE: f64 = 1.5;

const EXACT_SCORE: f64 = 10.0;
const SUBSTRING_SCORE: f64 = 5.0;
/// Scaled by the fraction of query words found
const WORDS_SCORE: f64 = 2.0;

/// Chars of context kept on each side of a substring match
const CONTEXT_CHARS: usize = 30;
/// Chars of preview kept for a word-level match
const PREVIEW_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

/// How one field matched the query
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub score: f64,
    /// Excerpt of the field shown to the user
    pub text: String,
}

/// A note that scored above zero
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    pub note: &'a Note,
    pub score: f64,
    /// One labelled explanation per contributing field, e.g. `Summary: ...`
    pub matches: Vec<String>,
}

impl SearchResult<'_> {
    pub fn to_hit(&self) -> SearchHit {
        SearchHit {
            filename: self.note.filename.clone(),
            score: self.score,
            summary: self.note.metadata.summary.clone(),
            tags: self.note.metadata.tags.clone(),
            created: self.note.metadata.created.clone(),
            matches: self.matches.clone(),
        }
    }
}

/// Lowercase char by char so that indices line up with the original text
fn fold(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn find(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn contains(haystack: &[char], needle: &[char]) -> bool {
    find(haystack, needle).is_some()
}

/// Score `text` against `query`. Returns `None` when nothing matched.
pub fn match_field(text: &str, query: &str) -> Option<FieldMatch> {
    if text.is_empty() {
        return None;
    }

    let chars: Vec<char> = text.chars().collect();
    let folded = fold(text);
    let folded_query = fold(query);

    if folded == folded_query {
        return Some(FieldMatch {
            score: EXACT_SCORE,
            text: text.to_string(),
        });
    }

    if let Some(index) = find(&folded, &folded_query) {
        let start = index.saturating_sub(CONTEXT_CHARS);
        let end = (index + folded_query.len() + CONTEXT_CHARS).min(chars.len());
        let mut excerpt = String::new();
        if start > 0 {
            excerpt.push_str(ELLIPSIS);
        }
        excerpt.extend(&chars[start..end]);
        if end < chars.len() {
            excerpt.push_str(ELLIPSIS);
        }
        return Some(FieldMatch {
            score: SUBSTRING_SCORE,
            text: excerpt,
        });
    }

    let words: Vec<Vec<char>> = query.split_whitespace().map(fold).collect();
    let found = words.iter().filter(|w| contains(&folded, w)).count();
    if found == 0 {
        return None;
    }

    let mut preview: String = chars.iter().take(PREVIEW_CHARS).collect();
    if chars.len() > PREVIEW_CHARS {
        preview.push_str(ELLIPSIS);
    }
    Some(FieldMatch {
        score: found as f64 / words.len() as f64 * WORDS_SCORE,
        text: preview,
    })
}

/// Score every note, keep those above zero, best first. Ties are ordered by
/// filename. A non-empty `tag_filter` keeps only notes with at least one of
/// those tags. A blank query matches nothing.
pub fn search_notes<'a>(notes: &'a [Note], query: &str, tag_filter: &[String]) -> Vec<SearchResult<'a>> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let folded_query = fold(query);

    let mut results: Vec<SearchResult<'a>> = notes
        .iter()
        .filter(|note| tag_filter.is_empty() || note.has_any_tag(tag_filter))
        .filter_map(|note| {
            let mut score = 0.0;
            let mut matches = Vec::new();

            let fields = [
                ("Title", note.filename.as_str(), FILENAME_WEIGHT),
                ("Summary", note.metadata.summary.as_str(), SUMMARY_WEIGHT),
                ("Content", note.body.as_str(), BODY_WEIGHT),
            ];
            for (label, text, weight) in fields {
                if let Some(m) = match_field(text, query) {
                    score += m.score * weight;
                    matches.push(format!("{}: {}", label, m.text));
                }
            }

            let matching_tags: Vec<&str> = note
                .metadata
                .tags
                .iter()
                .filter(|tag| contains(&fold(tag), &folded_query))
                .map(String::as_str)
                .collect();
            if !matching_tags.is_empty() {
                score += matching_tags.len() as f64 * TAG_SCORE;
                matches.push(format!("Tags: {}", matching_tags.join(", ")));
            }

            (score > 0.0).then_some(SearchResult { note, score, matches })
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.note.filename.cmp(&b.note.filename))
    });
    results
}

//! Edit-distance similarity and best-candidate search.
//!
//! Comparisons are character-wise and exact; callers fold case and
//! diacritics beforehand when they want them ignored.

use rapidfuzz::distance::levenshtein;

/// Minimum number of single-character inserts, deletes, and substitutions
/// turning `a` into `b`.
pub fn distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// `1 - distance / max_len`, in `[0, 1]`. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - distance(a, b) as f64 / max_len as f64
}

/// Highest-scoring candidate of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch<'a> {
    pub candidate: &'a str,
    pub score: f64,
    /// Position in the candidate list.
    pub index: usize,
}

/// Finds the candidate most similar to `target`.
///
/// Returns `None` for an empty list. Ties keep the earliest candidate.
pub fn find_best_match<'a, S>(target: &str, candidates: &'a [S]) -> Option<BestMatch<'a>>
where
    S: AsRef<str>,
{
    let mut best: Option<BestMatch<'a>> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let candidate = candidate.as_ref();
        let score = similarity(target, candidate);
        if best.is_none_or(|current| score > current.score) {
            best = Some(BestMatch {
                candidate,
                score,
                index,
            });
        }
    }
    best
}

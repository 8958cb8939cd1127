//! Character-level metrics: Levenshtein, longest common substring, Hamming

use super::{MetricError, MetricResult};

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`.
///
/// Two-row dynamic programming; the shorter string spans the row.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (long, short) = if a.len() < b.len() { (b, a) } else { (a, b) };

    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let insertion = prev[j + 1] + 1;
            let deletion = curr[j] + 1;
            let substitution = prev[j] + usize::from(lc != sc);
            curr[j + 1] = insertion.min(deletion).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Length of the longest contiguous run shared by `a` and `b`.
///
/// Larger means more similar, so this is not a distance.
pub fn lc_substring_length(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut longest = 0;

    for ac in &a {
        for (j, bc) in b.iter().enumerate() {
            curr[j + 1] = if ac == bc { prev[j] + 1 } else { 0 };
            longest = longest.max(curr[j + 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    longest
}

/// Number of positions at which `a` and `b` hold the *same* character.
///
/// This is the complement of the textbook Hamming distance: identical
/// strings score their full length and fully different strings score 0.
/// Inputs must have equal length.
pub fn hamming(a: &str, b: &str) -> MetricResult<usize> {
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    if a_len != b_len {
        return Err(MetricError::InvalidArgument(format!(
            "hamming requires equal lengths, got {a_len} and {b_len}"
        )));
    }

    Ok(a.chars().zip(b.chars()).filter(|(x, y)| x == y).count())
}

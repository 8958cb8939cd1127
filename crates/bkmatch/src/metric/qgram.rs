//! q-gram profiles and the distances built on them

use ahash::AHashMap;

use super::{MetricError, MetricResult};

/// Ordered length-`q` windows of `a` and `b`.
///
/// Fails when `q` is zero or longer than either string.
pub fn q_gram_profile(a: &str, b: &str, q: usize) -> MetricResult<(Vec<String>, Vec<String>)> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if q == 0 {
        return Err(MetricError::InvalidArgument(
            "q-gram window must be at least 1".to_string(),
        ));
    }
    if q > a.len() || q > b.len() {
        return Err(MetricError::InvalidArgument(format!(
            "q value {q} larger than string length ({} and {})",
            a.len(),
            b.len()
        )));
    }

    Ok((windows(&a, q), windows(&b, q)))
}

fn windows(chars: &[char], q: usize) -> Vec<String> {
    chars.windows(q).map(|w| w.iter().collect()).collect()
}

/// Size of the multiset intersection of two gram lists.
fn shared_grams(left: &[String], right: &[String]) -> usize {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for gram in left {
        *counts.entry(gram.as_str()).or_default() += 1;
    }

    let mut shared = 0;
    for gram in right {
        if let Some(remaining) = counts.get_mut(gram.as_str()) {
            if *remaining > 0 {
                *remaining -= 1;
                shared += 1;
            }
        }
    }
    shared
}

/// Grams present in one profile but not matched in the other:
/// `|A| + |B| - 2 * |A ∩ B|`.
pub fn q_gram_distance(a: &str, b: &str, q: usize) -> MetricResult<usize> {
    let (left, right) = q_gram_profile(a, b, q)?;
    let shared = shared_grams(&left, &right);
    Ok(left.len() + right.len() - 2 * shared)
}

/// `1 - |A ∩ B| / |A ∪ B|` over the q-gram multisets.
pub fn jaccard(a: &str, b: &str, q: usize) -> MetricResult<f64> {
    let (left, right) = q_gram_profile(a, b, q)?;
    let shared = shared_grams(&left, &right);
    // q <= both lengths, so each profile holds at least one gram
    let union = left.len() + right.len() - shared;
    Ok(1.0 - shared as f64 / union as f64)
}

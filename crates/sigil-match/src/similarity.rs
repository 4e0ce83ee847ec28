// crates/sigil-match/src/similarity.rs
//
// Low-level similarity measures used by the matching engine.

use std::collections::BTreeSet;

/// Cosine similarity over two vectors, clamped to [0,1].
///
/// The shorter vector is zero-padded. A zero vector on either side yields 0.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().max(b.len());
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0.0);
        let y = b.get(i).copied().unwrap_or(0.0);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }
    let v = dot / (norm_a.sqrt() * norm_b.sqrt());
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Jaccard similarity |A ∩ B| / |A ∪ B|; 0 when both sets are empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Closeness of two 0..=100 scores: 1 when equal, 0 at maximum distance.
pub fn closeness(a: f64, b: f64) -> f64 {
    let a = a.clamp(0.0, 100.0);
    let b = b.clamp(0.0, 100.0);
    1.0 - (a - b).abs() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = [0.3, 0.7, 0.1];
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn cosine_handles_zero_and_unequal_lengths() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine(&[], &[1.0]), 0.0);
        // Zero-padding: [1,0] vs [1] are identical after padding.
        assert!((cosine(&[1.0, 0.0], &[1.0]) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn jaccard_basics() {
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&["a"]), &set(&[])), 0.0);
        assert!((jaccard(&set(&["a", "b"]), &set(&["b", "c"])) - 1.0 / 3.0).abs() < 1e-10);
        assert!((jaccard(&set(&["a", "b"]), &set(&["a", "b"])) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn closeness_is_symmetric_and_bounded() {
        assert!((closeness(80.0, 80.0) - 1.0).abs() < 1e-10);
        assert!((closeness(0.0, 100.0)).abs() < 1e-10);
        assert_eq!(closeness(30.0, 70.0), closeness(70.0, 30.0));
        // Out-of-range inputs are clamped first.
        assert!((closeness(150.0, 100.0) - 1.0).abs() < 1e-10);
    }
}

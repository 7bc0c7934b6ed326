//! Pairwise similarity between answer options.
//!
//! Two independent measures behind one dispatch point in the scorer:
//! numeric options compare by relative magnitude, text options by a
//! matching-blocks ratio over case-folded strings.

/// Relative similarity of two numbers in [0, 1].
///
/// `1 - min(|a - b| / max(|a|, |b|), 1)`; the `(0, 0)` pair is defined as
/// 1.0 so identical zeros never divide by zero.
pub fn numeric_similarity(a: f64, b: f64) -> f64 {
    let max_val = a.abs().max(b.abs());
    if max_val == 0.0 {
        return 1.0;
    }
    1.0 - ((a - b).abs() / max_val).min(1.0)
}

/// Matching-blocks ratio of two strings in [0, 1], case-insensitive.
///
/// `2 * M / (len_a + len_b)` where `M` is the total length of the matching
/// contiguous blocks: the longest common block, then the same recursively on
/// the pieces left of it and right of it. Two empty strings rate 1.0.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_len(&a, &b) as f64 / total as f64
}

/// Total length of matching contiguous blocks between `a` and `b`.
fn matching_len(a: &[char], b: &[char]) -> usize {
    let (i, j, k) = longest_common_block(a, b);
    if k == 0 {
        return 0;
    }
    k + matching_len(&a[..i], &b[..j]) + matching_len(&a[i + k..], &b[j + k..])
}

/// Longest common contiguous block as `(start_a, start_b, len)`.
/// Ties resolve to the earliest start in `a`, then in `b`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // lengths[j] holds the run length ending at (i - 1, j - 1)
    let mut prev = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        let mut cur = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                cur[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = cur;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_identity_is_one() {
        assert_eq!(numeric_similarity(10.0, 10.0), 1.0);
        assert_eq!(numeric_similarity(-3.5, -3.5), 1.0);
    }

    #[test]
    fn numeric_zero_pair_is_one() {
        assert_eq!(numeric_similarity(0.0, 0.0), 1.0);
    }

    #[test]
    fn numeric_is_symmetric() {
        assert_eq!(numeric_similarity(3.0, 7.0), numeric_similarity(7.0, 3.0));
        assert_eq!(
            numeric_similarity(-2.0, 5.0),
            numeric_similarity(5.0, -2.0)
        );
    }

    #[test]
    fn numeric_distant_values_floor_at_zero() {
        // |10 - (-10)| / 10 = 2, capped at 1
        assert_eq!(numeric_similarity(10.0, -10.0), 0.0);
    }

    #[test]
    fn numeric_close_values_score_high() {
        let sim = numeric_similarity(100.0, 90.0);
        assert!((sim - 0.9).abs() < 1e-9, "got {sim}");
    }

    #[test]
    fn text_identity_ignores_case() {
        assert_eq!(text_similarity("Paris", "paris"), 1.0);
        assert_eq!(text_similarity("paris", "Paris"), 1.0);
    }

    #[test]
    fn text_is_symmetric() {
        assert_eq!(
            text_similarity("abcd", "bcde"),
            text_similarity("bcde", "abcd")
        );
    }

    #[test]
    fn text_disjoint_is_zero() {
        assert_eq!(text_similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn text_partial_overlap() {
        // "abcd" vs "bcde": block "bcd" of length 3 -> 2*3/8
        assert_eq!(text_similarity("abcd", "bcde"), 0.75);
    }

    #[test]
    fn text_counts_multiple_blocks() {
        // "ab__cd" vs "abxxcd": "ab" and "cd" both match -> 2*4/12
        let sim = text_similarity("ab__cd", "abxxcd");
        assert!((sim - 2.0 / 3.0).abs() < 1e-9, "got {sim}");
    }

    #[test]
    fn text_empty_pair_is_one() {
        assert_eq!(text_similarity("", ""), 1.0);
        assert_eq!(text_similarity("a", ""), 0.0);
    }
}

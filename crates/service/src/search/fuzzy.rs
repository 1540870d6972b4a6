/// Minimum edit distance between `pattern` and any substring of `text`.
///
/// Sellers' variant of Levenshtein: the first DP row is all zeros so a match
/// may start anywhere, and the answer is the minimum over the last row so it
/// may end anywhere. Two rows are kept.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    if pattern.is_empty() {
        return 0;
    }
    if text.is_empty() {
        return pattern.len();
    }

    let mut prev = vec![0usize; text.len() + 1];
    let mut curr = vec![0usize; text.len() + 1];

    for (i, p) in pattern.iter().enumerate() {
        curr[0] = i + 1;
        for (j, t) in text.iter().enumerate() {
            let cost = usize::from(p != t);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev.into_iter().min().unwrap_or(pattern.len())
}

/// Normalized score in `[0, 1]`: 0 is an exact substring hit, 1 shares nothing.
pub fn field_score(pattern: &[char], text: &[char]) -> f64 {
    if pattern.is_empty() {
        return 0.0;
    }
    let d = substring_distance(pattern, text).min(pattern.len());
    d as f64 / pattern.len() as f64
}

/// Lowercased characters used for case-insensitive comparison.
pub fn fold(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(p: &str, t: &str) -> usize { substring_distance(&fold(p), &fold(t)) }

    #[test]
    fn exact_substring_is_zero() {
        assert_eq!(dist("roof", "Exterior & Roofing"), 0);
        assert_eq!(dist("ROOF", "roof"), 0);
    }

    #[test]
    fn typos_cost_one_each() {
        assert_eq!(dist("rofing", "roofing"), 1);
        assert_eq!(dist("plumbimg", "Plumbing Services"), 1);
        assert_eq!(dist("kitchin", "Kitchen Remodeling"), 1);
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(dist("", "anything"), 0);
        assert_eq!(dist("abc", ""), 3);
    }

    #[test]
    fn score_is_normalized() {
        let s = field_score(&fold("abcd"), &fold("xxab"));
        assert!((s - 0.5).abs() < 1e-9);
        assert_eq!(field_score(&fold("zzz"), &fold("aaa")), 1.0);
    }
}

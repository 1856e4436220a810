//! Shannon entropy.

use std::collections::HashMap;

/// Shannon entropy (bits per character) of the lowercased text, rounded to 6 decimals.
///
/// Empty text and text made of a single distinct character both have entropy
/// exactly `0.0`.
///
/// # Examples
///
/// ```
/// use phishscore::features::shannon_entropy;
///
/// assert_eq!(shannon_entropy("aaaa"), 0.0);
/// assert_eq!(shannon_entropy("ab"), 1.0);
/// ```
pub fn shannon_entropy(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut length = 0usize;
    for c in lowered.chars() {
        *counts.entry(c).or_insert(0) += 1;
        length += 1;
    }

    if counts.len() <= 1 {
        return 0.0;
    }

    // Sum in a fixed order so repeated calls are bit-identical
    let mut frequencies: Vec<usize> = counts.into_values().collect();
    frequencies.sort_unstable();

    let len = length as f64;
    let entropy: f64 = frequencies
        .into_iter()
        .map(|count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum();

    round_to(entropy, 6)
}

/// Rounds to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_empty_and_uniform() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("a"), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        // Case is folded before counting
        assert_eq!(shannon_entropy("aAaA"), 0.0);
    }

    #[test]
    fn test_entropy_two_symbols() {
        assert_eq!(shannon_entropy("abab"), 1.0);
    }

    #[test]
    fn test_entropy_alphabet() {
        let entropy = shannon_entropy("abcdefghijklmnopqrstuvwxyz");
        assert!(entropy > 4.0);
        assert!((entropy - 26f64.log2()).abs() < 1e-5);
    }

    #[test]
    fn test_entropy_is_deterministic() {
        let url = "http://secure-login.paypal.example.tk/verify?id=12345";
        assert_eq!(shannon_entropy(url), shannon_entropy(url));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456789, 6), 0.123457);
        assert_eq!(round_to(0.33336, 4), 0.3334);
        assert_eq!(round_to(1.0, 4), 1.0);
    }
}

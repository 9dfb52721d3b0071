//! Shannon entropy scoring.

/// Shannon entropy of `data` in bits per symbol: `H = -Σ p·log2(p)`.
///
/// Symbols are bytes. Returns `0.0` for empty input.
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut counts = [0usize; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }

    let total = data.len() as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_empty() {
        assert_eq!(shannon_entropy(b""), 0.0);
    }

    #[test]
    fn test_single_symbol() {
        assert!(shannon_entropy(b"aaaa").abs() < EPSILON);
    }

    #[test]
    fn test_uniform_symbols() {
        assert!((shannon_entropy(b"ab") - 1.0).abs() < EPSILON);
        assert!((shannon_entropy(b"abcd") - 2.0).abs() < EPSILON);
        assert!((shannon_entropy(b"0123456789abcdef") - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_skewed_symbols() {
        // p = 3/4, 1/4
        let expected = -(0.75f64 * 0.75f64.log2() + 0.25 * 0.25f64.log2());
        assert!((shannon_entropy(b"aaab") - expected).abs() < EPSILON);
    }

    #[test]
    fn test_order_independent() {
        assert_eq!(shannon_entropy(b"abcabd"), shannon_entropy(b"dbacba"));
    }
}

//! Substring matching used by the incident classifier.

const BASE: u64 = 256;
const MODULUS: u64 = 1_000_000_007;

/// Returns `true` iff `pattern` occurs as a contiguous substring of `text`.
///
/// Rabin-Karp over the UTF-8 bytes: a rolling hash of every `pattern.len()` window is compared with the
/// pattern's hash, and every hash hit is confirmed by an exact comparison, so collisions never produce a
/// false positive. An empty pattern matches every text.
pub fn contains(text: &str, pattern: &str) -> bool {
    let text = text.as_bytes();
    let pattern = pattern.as_bytes();
    let m = pattern.len();

    if m == 0 {
        return true;
    }
    if m > text.len() {
        return false;
    }

    // BASE^(m-1), weight of the byte that leaves the window.
    let mut leading_weight: u64 = 1;
    for _ in 1..m {
        leading_weight = leading_weight * BASE % MODULUS;
    }

    let pattern_hash = hash(pattern);
    let mut window_hash = hash(&text[..m]);

    for start in 0..=text.len() - m {
        if window_hash == pattern_hash && &text[start..start + m] == pattern {
            return true;
        }

        if start + m < text.len() {
            let outgoing = text[start] as u64 * leading_weight % MODULUS;
            window_hash = (window_hash + MODULUS - outgoing) % MODULUS;
            window_hash = (window_hash * BASE + text[start + m] as u64) % MODULUS;
        }
    }

    return false;
}

fn hash(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0, |acc, &b| (acc * BASE + b as u64) % MODULUS)
}

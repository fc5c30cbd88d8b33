//! Iterated string transform
//!
//! Each iteration reverses the text, swaps ASCII case, then rotates ASCII
//! letters forward by one (`z` wraps to `a`, `Z` to `A`). Other characters
//! are only moved by the reversal.

/// Input used by the native suite
pub const DEFAULT_INPUT: &str = "The Quick Brown Fox Jumps Over The Lazy Dog 1234567890";

/// Apply the reverse / swap-case / rotate cycle `iterations` times
pub fn transform(input: &str, iterations: usize) -> String {
    let mut chars: Vec<char> = input.chars().collect();

    for _ in 0..iterations {
        chars.reverse();

        for c in chars.iter_mut() {
            if c.is_ascii_lowercase() {
                *c = c.to_ascii_uppercase();
            } else if c.is_ascii_uppercase() {
                *c = c.to_ascii_lowercase();
            }
        }

        for c in chars.iter_mut() {
            *c = rotate_letter(*c);
        }
    }

    chars.into_iter().collect()
}

fn rotate_letter(c: char) -> char {
    match c {
        'z' => 'a',
        'Z' => 'A',
        'a'..='y' | 'A'..='Y' => (c as u8 + 1) as char,
        _ => c,
    }
}

/// First `n` characters of `s`, for progress lines
pub fn preview(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

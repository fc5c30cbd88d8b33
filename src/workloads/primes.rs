//! Prime generation
//!
//! `sieve` is the sieve of Eratosthenes used by the native suite.
//! `trial_division_primes` is the deliberately slow divisor scan used by the
//! mixed loop.

/// All primes `p` with `2 <= p <= limit`
pub fn sieve(limit: u32) -> Vec<u32> {
    if limit < 2 {
        return Vec::new();
    }

    let limit = limit as usize;
    let mut is_prime = vec![true; limit + 1];
    is_prime[0] = false;
    is_prime[1] = false;

    let mut i = 2;
    while i * i <= limit {
        if is_prime[i] {
            let mut j = i * i;
            while j <= limit {
                is_prime[j] = false;
                j += i;
            }
        }
        i += 1;
    }

    is_prime
        .iter()
        .enumerate()
        .filter(|(_, &prime)| prime)
        .map(|(n, _)| n as u32)
        .collect()
}

/// All primes up to `limit`, found by testing divisors `2..=sqrt(n)`
pub fn trial_division_primes(limit: u32) -> Vec<u32> {
    (2..=limit)
        .filter(|&n| {
            let mut d = 2u32;
            while d.saturating_mul(d) <= n {
                if n % d == 0 {
                    return false;
                }
                d += 1;
            }
            true
        })
        .collect()
}

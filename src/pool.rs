// 🎲 Number Pool - bounded random draws with rejection sampling
// Produces distinct, digit-repetition-free numbers of a fixed length

use rand::Rng;
use std::collections::HashSet;

/// Upper bound on raw draws per requested number before the whole call
/// gives up and reports failure instead of spinning near the ceiling.
const MAX_DRAWS_PER_NUMBER: u64 = 10_000;

// ============================================================================
// CAPACITY
// ============================================================================

/// Maximum count of digit-repetition-free integers of length `digits`
/// with a nonzero leading digit: the product of descending factors
/// starting at 9 (9, 72, 504, ...). The factor sequence stops before
/// reaching zero, so 10-digit numbers share the 9-digit ceiling; beyond
/// 10 digits no repetition-free number exists at all.
pub fn capacity(digits: u32) -> u64 {
    if digits == 0 || digits > 10 {
        return 0;
    }

    (0..digits as u64)
        .map(|k| 9 - k)
        .take_while(|&factor| factor > 0)
        .product()
}

// ============================================================================
// DIGIT CHECK
// ============================================================================

/// True when any decimal digit of `n` occurs more than once.
pub fn has_repeating_digits(mut n: u64) -> bool {
    let mut seen = 0u16;

    loop {
        let digit = n % 10;
        if seen & (1 << digit) != 0 {
            return true;
        }
        seen |= 1 << digit;

        n /= 10;
        if n == 0 {
            return false;
        }
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Draw `count` distinct, digit-repetition-free numbers of `digits` length,
/// none of which is in `excluded`. Accepted numbers are added to `excluded`
/// so later draws (in this call and the next) avoid them.
///
/// Returns an empty vec - never a partial result - when `excluded` plus the
/// request would exceed the capacity ceiling for `digits`.
pub fn generate(count: usize, digits: u32, excluded: &mut HashSet<u64>) -> Vec<u64> {
    generate_with(&mut rand::thread_rng(), count, digits, excluded)
}

/// Same as [`generate`] with an explicit RNG, so tests can drive a seeded
/// source instead of the thread-local one.
pub fn generate_with<R: Rng>(
    rng: &mut R,
    count: usize,
    digits: u32,
    excluded: &mut HashSet<u64>,
) -> Vec<u64> {
    let mut numbers = Vec::new();

    if count == 0 || digits == 0 {
        return numbers;
    }

    let ceiling = capacity(digits);
    if excluded.len() as u64 + count as u64 > ceiling {
        return numbers;
    }

    // Uniform over the full digit-length range; rejection handles the rest.
    let min = 10u64.pow(digits - 1);
    let max = 10u64.pow(digits) - 1;

    let mut draws_left = (count as u64).saturating_mul(MAX_DRAWS_PER_NUMBER);

    while numbers.len() < count {
        if draws_left == 0 {
            // Safety cap hit: undo this call's reservations and fail whole.
            for n in &numbers {
                excluded.remove(n);
            }
            numbers.clear();
            return numbers;
        }
        draws_left -= 1;

        let candidate = rng.gen_range(min..=max);

        // `excluded` already contains this call's accepted numbers, so a
        // single membership test also rejects within-call duplicates.
        if has_repeating_digits(candidate) || excluded.contains(&candidate) {
            continue;
        }

        numbers.push(candidate);
        excluded.insert(candidate);
    }

    numbers
}

// ============================================================================
// TESTS
// ============================================================================

//! Verhoeff checksum over decimal digit strings.
//!
//! Dihedral-group arithmetic catches all single-digit and adjacent-
//! transposition errors. The multiplication table `D` and permutation
//! table `P` are the published constants and must not be re-derived;
//! any deviation silently breaks validation.

/// Dihedral group D5 multiplication table.
const D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

/// Position-dependent permutation table, cycle length 8.
const P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

/// Validate a digit string, rightmost digit first. Returns false for
/// any non-digit input.
pub fn validate(digits: &str) -> bool {
    let mut c = 0u8;
    for (i, ch) in digits.chars().rev().enumerate() {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };
        c = D[c as usize][P[i % 8][digit as usize] as usize];
    }
    c == 0
}

/// Compute the check digit that makes `payload` + digit validate.
pub fn check_digit(payload: &str) -> Option<char> {
    (0..10u32).map(|d| char::from_digit(d, 10).unwrap_or('0')).find(|d| {
        let mut candidate = payload.to_string();
        candidate.push(*d);
        validate(&candidate)
    })
}

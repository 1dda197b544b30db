//! ISBN normalization and checksum validation.
//!
//! The lookup itself only trims identifiers and never validates them; these helpers are for callers that want to
//! check an identifier before spending a request on it.

/// The ISBN variants that can be validated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IsbnKind {
    /// Ten characters, the last may be `X`.
    Isbn10,
    /// Thirteen digits.
    Isbn13,
}

impl std::fmt::Display for IsbnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Isbn10 => f.write_str("ISBN-10"),
            Self::Isbn13 => f.write_str("ISBN-13"),
        }
    }
}

/// Upper cases `isbn` and drops everything that is not a digit or `X`.
///
/// ```
/// assert_eq!("080442957X", isbn_lookup::isbn::normalize("0-8044-2957-x"));
/// ```
#[must_use]
pub fn normalize(isbn: &str) -> String {
    isbn.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_digit() || *c == 'X')
        .collect()
}

/// Validates the checksum of `isbn` after [normalizing](normalize) it.
///
/// Returns the kind of ISBN when the checksum is correct.
#[must_use]
pub fn validate(isbn: &str) -> Option<IsbnKind> {
    let isbn = normalize(isbn);
    match isbn.len() {
        10 if isbn10_checksum(isbn.as_bytes()) => Some(IsbnKind::Isbn10),
        13 if isbn13_checksum(isbn.as_bytes()) => Some(IsbnKind::Isbn13),
        _ => None,
    }
}

/// Whether `isbn` is a valid ISBN-10 or ISBN-13.
#[must_use]
pub fn is_valid(isbn: &str) -> bool {
    validate(isbn).is_some()
}

fn digit(b: u8) -> Option<u32> {
    char::from(b).to_digit(10)
}

// weights 10..=2 over the first nine digits, the check digit makes the sum divisible by 11
fn isbn10_checksum(isbn: &[u8]) -> bool {
    let (body, check) = isbn.split_at(9);

    let sum = body
        .iter()
        .zip((2..=10).rev())
        .try_fold(0, |acc, (&b, weight)| digit(b).map(|d| acc + d * weight));

    let check = match check[0] {
        b'X' => Some(10),
        b => digit(b),
    };

    matches!((sum, check), (Some(sum), Some(check)) if (sum + check) % 11 == 0)
}

// alternating weights 1 and 3, the total including the check digit is divisible by 10
fn isbn13_checksum(isbn: &[u8]) -> bool {
    isbn.iter()
        .zip([1, 3].into_iter().cycle())
        .try_fold(0, |acc, (&b, weight)| digit(b).map(|d| acc + d * weight))
        .is_some_and(|sum| sum % 10 == 0)
}

#[cfg(test)]
mod tests {
    use super::{is_valid, normalize, validate, IsbnKind};

    #[test]
    fn normalize_strips_separators() {
        assert_eq!("9780735619678", normalize("978-0-7356-1967-8"));
        assert_eq!("9780735619678", normalize(" 978 0735619678 "));
    }

    #[test]
    fn valid_isbn_10() {
        assert_eq!(Some(IsbnKind::Isbn10), validate("0735619670"));
        assert_eq!(Some(IsbnKind::Isbn10), validate("0-8044-2957-X"));
    }

    #[test]
    fn valid_isbn_13() {
        assert_eq!(Some(IsbnKind::Isbn13), validate("978-0-7356-1967-8"));
        assert_eq!(Some(IsbnKind::Isbn13), validate("9780441013593"));
    }

    #[test]
    fn wrong_check_digit_is_invalid() {
        assert!(!is_valid("0735619671"));
        assert!(!is_valid("9780735619679"));
    }

    #[test]
    fn x_is_only_allowed_as_isbn_10_check_digit() {
        assert!(!is_valid("X735619670"));
        assert!(!is_valid("978073561967X"));
    }

    #[test]
    fn wrong_length_is_invalid() {
        assert!(!is_valid(""));
        assert!(!is_valid("12345"));
        assert!(!is_valid("not an isbn"));
    }
}

//! Age-eligibility check against an item's recorded minimum age
//!
//! Purely local: operates on an already-resolved item and fresh user
//! input, with no network I/O and no persistence.

/// Message shown when the item carries no age data
pub const NO_AGE_DATA: &str = "No age data available for this item";

/// Message shown when the entered age does not parse or is out of range
pub const INVALID_AGE_INPUT: &str = "Please enter a valid age between 4 and 99";

const MIN_INPUT_AGE: i32 = 4;
const MAX_INPUT_AGE: i32 = 99;

/// Outcome of an age-eligibility check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// User-facing message
    pub message: String,
    /// Whether the message should be rendered with the error style; always
    /// the negation of `passed`
    pub is_error: bool,
    /// Whether the check passed
    pub passed: bool,
}

impl VerificationOutcome {
    fn failure(message: &str) -> Self {
        Self {
            message: message.to_string(),
            is_error: true,
            passed: false,
        }
    }
}

/// Parse the leading integer of a user-entered string: optional sign
/// followed by a digit run, anything after it ignored (so "17.5" and
/// "17abc" both read as 17). `None` when no leading digits exist.
fn parse_leading_int(input: &str) -> Option<i32> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let run_end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let run = &digits[..run_end];
    if run.is_empty() {
        return None;
    }

    let value = run.parse::<i32>().ok()?;
    Some(if negative { -value } else { value })
}

/// Compare a self-reported age against an item's recorded minimum age
///
/// A missing or zero `item_age` means the item has no age data. The
/// entered age is read as a leading integer and must fall between 4 and 99
/// inclusive. The check passes when the entered age is strictly less than
/// the item's recorded age; the comparison direction looks inverted
/// relative to a "must be at least this old" rule and is flagged for
/// product review, not corrected here.
pub fn check_age(item_age: Option<i32>, entered_age: &str) -> VerificationOutcome {
    let item_age = match item_age {
        Some(age) if age != 0 => age,
        _ => return VerificationOutcome::failure(NO_AGE_DATA),
    };

    let entered = match parse_leading_int(entered_age) {
        Some(age) if (MIN_INPUT_AGE..=MAX_INPUT_AGE).contains(&age) => age,
        _ => return VerificationOutcome::failure(INVALID_AGE_INPUT),
    };

    let passed = entered < item_age;
    VerificationOutcome {
        message: if passed {
            "Age verification passed".to_string()
        } else {
            "Age verification failed".to_string()
        },
        is_error: !passed,
        passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_age_data_on_item() {
        let outcome = check_age(None, "21");
        assert_eq!(outcome.message, NO_AGE_DATA);
        assert!(outcome.is_error);
        assert!(!outcome.passed);
    }

    #[test]
    fn zero_age_treated_as_no_data() {
        let outcome = check_age(Some(0), "21");
        assert_eq!(outcome.message, NO_AGE_DATA);
    }

    #[test]
    fn unparseable_input_rejected() {
        let outcome = check_age(Some(18), "abc");
        assert_eq!(outcome.message, INVALID_AGE_INPUT);
        assert!(outcome.is_error);
        assert!(!outcome.passed);
    }

    #[test]
    fn out_of_range_input_rejected() {
        assert_eq!(check_age(Some(18), "150").message, INVALID_AGE_INPUT);
        assert_eq!(check_age(Some(18), "3").message, INVALID_AGE_INPUT);
        assert_eq!(check_age(Some(18), "100").message, INVALID_AGE_INPUT);
        assert_eq!(check_age(Some(18), "-5").message, INVALID_AGE_INPUT);
    }

    #[test]
    fn range_boundaries_are_inclusive() {
        assert_ne!(check_age(Some(50), "4").message, INVALID_AGE_INPUT);
        assert_ne!(check_age(Some(50), "99").message, INVALID_AGE_INPUT);
    }

    #[test]
    fn passes_when_entered_age_is_below_item_age() {
        let outcome = check_age(Some(18), "17");
        assert!(outcome.passed);
        assert!(!outcome.is_error);
        assert_eq!(outcome.message, "Age verification passed");
    }

    #[test]
    fn fails_when_entered_age_equals_item_age() {
        let outcome = check_age(Some(18), "18");
        assert!(!outcome.passed);
        assert!(outcome.is_error);
        assert_eq!(outcome.message, "Age verification failed");
    }

    #[test]
    fn fails_when_entered_age_is_above_item_age() {
        let outcome = check_age(Some(18), "30");
        assert!(!outcome.passed);
    }

    #[test]
    fn input_is_trimmed_before_parsing() {
        assert!(check_age(Some(18), " 17 ").passed);
    }

    #[test]
    fn trailing_garbage_after_digits_is_ignored() {
        assert!(check_age(Some(18), "17.5").passed);
        assert!(check_age(Some(18), "17abc").passed);
        assert!(check_age(Some(18), "17 years").passed);
    }

    #[test]
    fn explicit_plus_sign_is_accepted() {
        assert!(check_age(Some(18), "+17").passed);
    }

    #[test]
    fn input_without_leading_digits_rejected() {
        assert_eq!(check_age(Some(18), ".5").message, INVALID_AGE_INPUT);
        assert_eq!(check_age(Some(18), "x17").message, INVALID_AGE_INPUT);
        assert_eq!(check_age(Some(18), "").message, INVALID_AGE_INPUT);
    }

    #[test]
    fn overlong_digit_run_rejected() {
        assert_eq!(
            check_age(Some(18), "99999999999999999999").message,
            INVALID_AGE_INPUT
        );
    }
}

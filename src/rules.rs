//! Stock field validators.
//!
//! Each constructor returns a [`ValidatorFn`] with a default message.
//! Wrap any rule with [`with_message`] to customize what the host shows.
//!
//! # Example
//!
//! ```rust
//! use intake::rules;
//!
//! let required = rules::non_empty();
//! assert_eq!(required(""), Some("required".to_string()));
//! assert_eq!(required("x"), None);
//!
//! let short = rules::with_message(rules::max_len(3), "too long");
//! assert_eq!(short("abcd"), Some("too long".to_string()));
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::validator::ValidatorFn;

/// Wraps an ad-hoc closure as a [`ValidatorFn`].
pub fn from_fn(f: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> ValidatorFn {
    Arc::new(f)
}

/// Replaces a rule's message with a fixed custom message.
pub fn with_message(rule: ValidatorFn, message: impl Into<String>) -> ValidatorFn {
    let message = message.into();
    Arc::new(move |value: &str| rule(value).map(|_| message.clone()))
}

/// Rejects the empty string with "required".
pub fn non_empty() -> ValidatorFn {
    Arc::new(|value: &str| {
        if value.is_empty() {
            Some("required".to_string())
        } else {
            None
        }
    })
}

/// Requires at least `min` characters (Unicode scalar values).
pub fn min_len(min: usize) -> ValidatorFn {
    Arc::new(move |value: &str| {
        let len = value.chars().count();
        if len < min {
            Some(format!("must be at least {} characters, got {}", min, len))
        } else {
            None
        }
    })
}

/// Allows at most `max` characters (Unicode scalar values).
pub fn max_len(max: usize) -> ValidatorFn {
    Arc::new(move |value: &str| {
        let len = value.chars().count();
        if len > max {
            Some(format!("must be at most {} characters, got {}", max, len))
        } else {
            None
        }
    })
}

/// Requires the value to match a regex pattern.
///
/// Returns an error if the pattern itself is invalid. The empty string is
/// still checked against the pattern; combine with [`non_empty`] in a chain
/// when a field is also required.
pub fn pattern(pattern: &str) -> Result<ValidatorFn, regex::Error> {
    let regex = Regex::new(pattern)?;
    let description = pattern.to_string();
    Ok(Arc::new(move |value: &str| {
        if regex.is_match(value) {
            None
        } else {
            Some(format!("must match pattern {}", description))
        }
    }))
}

/// Requires an email-shaped value (`local@domain.tld`, no whitespace).
pub fn email() -> ValidatorFn {
    let regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid");
    Arc::new(move |value: &str| {
        if regex.is_match(value) {
            None
        } else {
            Some("must be a valid email address".to_string())
        }
    })
}

/// Requires the value to be one of a fixed set of options.
pub fn one_of<I, S>(allowed: I) -> ValidatorFn
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    Arc::new(move |value: &str| {
        if allowed.iter().any(|option| option == value) {
            None
        } else {
            Some(format!("must be one of: {}", allowed.join(", ")))
        }
    })
}

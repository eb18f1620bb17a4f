//! Checks that a custom pattern only uses date fields or only time fields

use crate::error::FormatError;

const TIME_FIELDS: &[char] = &[':', 't', 'f', 'F', 'h', 'H', 'm', 's', 'z', 'K'];
const DATE_FIELDS: &[char] = &['d', 'M', 'y', '/', 'z', 'k'];

fn validate_fields(pattern: &str, forbidden: &[char]) -> Result<(), FormatError> {
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next().ok_or(FormatError::TrailingEscape)?;
            }
            '\'' | '"' => {
                if !chars.by_ref().any(|next| next == c) {
                    return Err(FormatError::UnterminatedQuote(c));
                }
            }
            c if forbidden.contains(&c) => return Err(FormatError::InvalidString),
            _ => {}
        }
    }
    Ok(())
}

/// Reject patterns containing time fields (`: t f F h H m s z K`)
///
/// # Examples
/// ```
/// use culture_format::formatter::validate_custom_date_format;
///
/// assert!(validate_custom_date_format("yyyy-MM-dd").is_ok());
/// assert!(validate_custom_date_format("yyyy-MM-dd HH").is_err());
/// assert!(validate_custom_date_format("'at' dd").is_ok());
/// ```
pub fn validate_custom_date_format(pattern: &str) -> Result<(), FormatError> {
    validate_fields(pattern, TIME_FIELDS)
}

/// Reject patterns containing date fields (`d M y / z k`)
pub fn validate_custom_time_format(pattern: &str) -> Result<(), FormatError> {
    validate_fields(pattern, DATE_FIELDS)
}

/// Whether [`validate_custom_date_format`] accepts `pattern`
pub fn is_valid_custom_date_format(pattern: &str) -> bool {
    validate_custom_date_format(pattern).is_ok()
}

/// Whether [`validate_custom_time_format`] accepts `pattern`
///
/// # Examples
/// ```
/// use culture_format::formatter::is_valid_custom_time_format;
///
/// assert!(is_valid_custom_time_format("HH:mm:ss.fff"));
/// assert!(!is_valid_custom_time_format("HH:mm dd"));
/// assert!(!is_valid_custom_time_format("HH 'open"));
/// ```
pub fn is_valid_custom_time_format(pattern: &str) -> bool {
    validate_custom_time_format(pattern).is_ok()
}

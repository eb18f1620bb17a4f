//! Culture-specific symbols consulted by the number parser

use std::sync::OnceLock;

/// Signs, separators and special-value symbols of one culture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormatInfo {
    /// Positive sign, usually "+"
    pub positive_sign: String,
    /// Negative sign, usually "-"
    pub negative_sign: String,
    /// Decimal separator for plain numbers
    pub number_decimal_separator: String,
    /// Group separator for plain numbers
    pub number_group_separator: String,
    /// Currency symbol
    pub currency_symbol: String,
    /// Decimal separator used in currency mode
    pub currency_decimal_separator: String,
    /// Group separator used in currency mode
    pub currency_group_separator: String,
    /// Negative number pattern, 0..=4; pattern 2 ("- n") allows white after a leading sign
    pub number_negative_pattern: u8,
    /// Symbol for positive infinity
    pub positive_infinity_symbol: String,
    /// Symbol for negative infinity
    pub negative_infinity_symbol: String,
    /// Symbol for not-a-number
    pub nan_symbol: String,
}

impl Default for NumberFormatInfo {
    fn default() -> Self {
        Self {
            positive_sign: "+".to_string(),
            negative_sign: "-".to_string(),
            number_decimal_separator: ".".to_string(),
            number_group_separator: ",".to_string(),
            currency_symbol: "\u{a4}".to_string(),
            currency_decimal_separator: ".".to_string(),
            currency_group_separator: ",".to_string(),
            number_negative_pattern: 1,
            positive_infinity_symbol: "Infinity".to_string(),
            negative_infinity_symbol: "-Infinity".to_string(),
            nan_symbol: "NaN".to_string(),
        }
    }
}

static INVARIANT: OnceLock<NumberFormatInfo> = OnceLock::new();

/// Hyphen-like characters that stand in for an ASCII '-' negative sign
const HYPHEN_LIKE: [char; 7] = [
    '\u{2012}', '\u{207B}', '\u{208B}', '\u{2212}', '\u{2796}', '\u{FE63}', '\u{FF0D}',
];

impl NumberFormatInfo {
    /// Culture-independent symbols
    pub fn invariant() -> &'static NumberFormatInfo {
        INVARIANT.get_or_init(NumberFormatInfo::default)
    }

    /// True when the signs are exactly "+" and "-"
    pub fn has_invariant_number_signs(&self) -> bool {
        self.positive_sign == "+" && self.negative_sign == "-"
    }

    /// True when the negative sign is a single hyphen-like character,
    /// in which case an ASCII '-' is also accepted
    pub fn allow_hyphen_during_parsing(&self) -> bool {
        let mut chars = self.negative_sign.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => HYPHEN_LIKE.contains(&c),
            _ => false,
        }
    }

    /// Builder method to set both signs
    pub fn with_signs(mut self, positive: &str, negative: &str) -> Self {
        self.positive_sign = positive.to_string();
        self.negative_sign = negative.to_string();
        self
    }

    /// Builder method to set the plain-number separators
    pub fn with_number_separators(mut self, decimal: &str, group: &str) -> Self {
        self.number_decimal_separator = decimal.to_string();
        self.number_group_separator = group.to_string();
        self
    }

    /// Builder method to set the currency symbol and its separators
    pub fn with_currency(mut self, symbol: &str, decimal: &str, group: &str) -> Self {
        self.currency_symbol = symbol.to_string();
        self.currency_decimal_separator = decimal.to_string();
        self.currency_group_separator = group.to_string();
        self
    }

    /// Builder method to set the negative number pattern
    pub fn with_number_negative_pattern(mut self, pattern: u8) -> Self {
        self.number_negative_pattern = pattern;
        self
    }

    /// Builder method to set the infinity and NaN symbols
    pub fn with_special_symbols(mut self, positive_infinity: &str, negative_infinity: &str, nan: &str) -> Self {
        self.positive_infinity_symbol = positive_infinity.to_string();
        self.negative_infinity_symbol = negative_infinity.to_string();
        self.nan_symbol = nan.to_string();
        self
    }
}

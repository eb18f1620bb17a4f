//! Intermediate decimal representation produced by the tokenizer

/// Which family of targets a buffer is being filled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberBufferKind {
    /// Trailing zeros are not retained as significant digits
    Integer,
    /// Scale is kept even when every digit is zero
    Decimal,
    /// Trailing fractional zeros are trimmed after tokenizing
    FloatingPoint,
}

/// Significant digits with a decimal exponent: the value is
/// `0.d1d2d3... * 10^scale`, negated when `negative` is set
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NumberBuffer {
    kind: NumberBufferKind,
    capacity: usize,
    digits: Vec<u8>,
    scale: i32,
    negative: bool,
    has_non_zero_tail: bool,
}

impl NumberBuffer {
    /// Empty buffer retaining at most `capacity` digits
    pub(crate) fn new(kind: NumberBufferKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            digits: Vec::with_capacity(capacity),
            scale: 0,
            negative: false,
            has_non_zero_tail: false,
        }
    }

    pub(crate) fn kind(&self) -> NumberBufferKind {
        self.kind
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an ASCII digit; ignored once the buffer is full
    pub(crate) fn push_digit(&mut self, digit: u8) {
        debug_assert!(digit.is_ascii_digit());
        if self.digits.len() < self.capacity {
            self.digits.push(digit);
        }
        self.check_consistency();
    }

    /// Number of significant digits
    pub(crate) fn digits_count(&self) -> usize {
        self.digits.len()
    }

    /// Drop stored digits beyond `count`
    pub(crate) fn truncate(&mut self, count: usize) {
        self.digits.truncate(count);
        self.check_consistency();
    }

    /// Decimal exponent: the value is `0.digits * 10^scale`
    pub(crate) fn scale(&self) -> i32 {
        self.scale
    }

    /// Move the decimal point by `delta` places
    pub(crate) fn shift_scale(&mut self, delta: i32) {
        self.scale += delta;
        self.check_consistency();
    }

    /// Zero value: the scale carries no information
    pub(crate) fn reset_scale(&mut self) {
        self.scale = 0;
        self.check_consistency();
    }

    pub(crate) fn is_negative(&self) -> bool {
        self.negative
    }

    pub(crate) fn set_negative(&mut self, negative: bool) {
        self.negative = negative;
        self.check_consistency();
    }

    /// Whether a non-zero digit was dropped past the capacity
    pub(crate) fn has_non_zero_tail(&self) -> bool {
        self.has_non_zero_tail
    }

    pub(crate) fn mark_non_zero_tail(&mut self) {
        self.has_non_zero_tail = true;
        self.check_consistency();
    }

    fn check_consistency(&self) {
        debug_assert!(self.digits.len() <= self.capacity);
        debug_assert!(self.digits.iter().all(u8::is_ascii_digit));
        // Leading zeros are never stored
        debug_assert!(self.digits.first() != Some(&b'0'));
        // A dropped tail follows at least one stored digit
        debug_assert!(!self.has_non_zero_tail || !self.digits.is_empty());
    }

    /// Significant digits as ASCII bytes
    pub(crate) fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Digit at `index` as a value, 0 past the significant digits
    pub(crate) fn digit(&self, index: usize) -> u8 {
        self.digits.get(index).map_or(0, |d| d - b'0')
    }

    /// Digits as text, for building float literals
    pub(crate) fn digits_str(&self) -> &str {
        std::str::from_utf8(&self.digits).unwrap_or_default()
    }
}

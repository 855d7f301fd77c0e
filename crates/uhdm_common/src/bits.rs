//! Four-state constant bit vectors for folded literal values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single four-state bit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Bit {
    /// Logic low.
    Zero,
    /// Logic high.
    One,
    /// Unknown.
    X,
    /// High impedance.
    Z,
}

impl Bit {
    /// Parses a bit from a literal digit character. `?` is an alias for `z`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            'x' | 'X' => Some(Bit::X),
            'z' | 'Z' | '?' => Some(Bit::Z),
            _ => None,
        }
    }

    /// Returns `true` for `Zero` and `One`.
    pub fn is_known(self) -> bool {
        matches!(self, Bit::Zero | Bit::One)
    }

    fn from_flag(flag: bool) -> Self {
        if flag {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Bit::Zero => '0',
            Bit::One => '1',
            Bit::X => 'x',
            Bit::Z => 'z',
        };
        write!(f, "{c}")
    }
}

/// Errors produced while parsing literal digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitsError {
    /// No digits after removing separators.
    #[error("literal has no digits")]
    Empty,
    /// A digit is not valid in the literal's radix.
    #[error("invalid digit '{digit}' for radix {radix}")]
    InvalidDigit {
        /// The offending character.
        digit: char,
        /// The radix being parsed.
        radix: u32,
    },
    /// The radix is not one of 2, 8, 10 or 16.
    #[error("unsupported radix {0}")]
    UnsupportedRadix(u32),
    /// A decimal literal exceeds 128 bits.
    #[error("decimal literal '{0}' does not fit in 128 bits")]
    Overflow(String),
}

/// A constant four-state bit vector, stored least significant bit first.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ConstBits {
    bits: Vec<Bit>,
    signed: bool,
}

impl ConstBits {
    /// Creates a vector of `width` copies of `bit`.
    pub fn fill(bit: Bit, width: u32) -> Self {
        Self {
            bits: vec![bit; width.max(1) as usize],
            signed: false,
        }
    }

    /// Creates an unsigned vector from the low `width` bits of `value`.
    pub fn from_u64(value: u64, width: u32) -> Self {
        let bits = (0..width.max(1))
            .map(|i| Bit::from_flag(i < 64 && (value >> i) & 1 == 1))
            .collect();
        Self {
            bits,
            signed: false,
        }
    }

    /// Creates a signed two's complement vector of `width` bits.
    pub fn from_i64(value: i64, width: u32) -> Self {
        let raw = value as u64;
        let bits = (0..width.max(1))
            .map(|i| Bit::from_flag((raw >> i.min(63)) & 1 == 1))
            .collect();
        Self { bits, signed: true }
    }

    /// Creates a single-bit vector.
    pub fn from_bool(value: bool) -> Self {
        Self {
            bits: vec![Bit::from_flag(value)],
            signed: false,
        }
    }

    /// Encodes a string literal at eight bits per character, first character
    /// in the most significant byte. The empty string encodes as one zero byte.
    pub fn from_str_bytes(s: &str) -> Self {
        let mut bits = Vec::with_capacity(s.len() * 8);
        for byte in s.bytes().rev() {
            bits.extend((0..8).map(|i| Bit::from_flag((byte >> i) & 1 == 1)));
        }
        if bits.is_empty() {
            bits = vec![Bit::Zero; 8];
        }
        Self {
            bits,
            signed: false,
        }
    }

    /// Parses literal digits in the given radix.
    ///
    /// Underscores are ignored. In radix 2, 8 and 16 an `x`/`z` digit expands
    /// to the full digit width. A decimal literal is either a plain number or a
    /// single `x`/`z` digit filling the whole vector. With `width` set the
    /// result is truncated or extended to it; otherwise the natural width of the
    /// digits is kept.
    pub fn from_digits(radix: u32, digits: &str, width: Option<u32>) -> Result<Self, BitsError> {
        let cleaned: Vec<char> = digits.chars().filter(|c| *c != '_').collect();
        if cleaned.is_empty() {
            return Err(BitsError::Empty);
        }

        let mut bits = Vec::new();
        match radix {
            2 | 8 | 16 => {
                let per_digit = match radix {
                    2 => 1,
                    8 => 3,
                    _ => 4,
                };
                for &c in cleaned.iter().rev() {
                    match Bit::from_char(c) {
                        Some(b @ (Bit::X | Bit::Z)) => {
                            bits.extend(std::iter::repeat(b).take(per_digit))
                        }
                        _ => {
                            let v = c
                                .to_digit(radix)
                                .ok_or(BitsError::InvalidDigit { digit: c, radix })?;
                            bits.extend((0..per_digit).map(|i| Bit::from_flag((v >> i) & 1 == 1)));
                        }
                    }
                }
            }
            10 => {
                if let [c] = cleaned.as_slice() {
                    if let Some(b @ (Bit::X | Bit::Z)) = Bit::from_char(*c) {
                        return Ok(Self::fill(b, width.unwrap_or(32)));
                    }
                }
                if let Some(&bad) = cleaned.iter().find(|c| !c.is_ascii_digit()) {
                    return Err(BitsError::InvalidDigit { digit: bad, radix });
                }
                let text: String = cleaned.iter().collect();
                let value: u128 = text.parse().map_err(|_| BitsError::Overflow(text.clone()))?;
                let natural = (128 - value.leading_zeros()).max(1);
                bits.extend((0..natural).map(|i| Bit::from_flag((value >> i) & 1 == 1)));
            }
            other => return Err(BitsError::UnsupportedRadix(other)),
        }

        let mut out = Self {
            bits,
            signed: false,
        };
        if let Some(w) = width {
            out.resize(w);
        }
        Ok(out)
    }

    /// Truncates or extends to `width` bits.
    ///
    /// Extension repeats an `x`/`z` most significant bit, sign-extends signed
    /// vectors, and zero-fills otherwise.
    pub fn resize(&mut self, width: u32) {
        let width = width.max(1) as usize;
        if width <= self.bits.len() {
            self.bits.truncate(width);
            return;
        }
        let fill = match self.bits.last().copied().unwrap_or(Bit::Zero) {
            Bit::X => Bit::X,
            Bit::Z => Bit::Z,
            Bit::One if self.signed => Bit::One,
            _ => Bit::Zero,
        };
        self.bits.resize(width, fill);
    }

    /// Marks the vector signed or unsigned.
    pub fn set_signed(&mut self, signed: bool) {
        self.signed = signed;
    }

    /// Returns `true` if the vector is signed.
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Number of bits.
    pub fn width(&self) -> u32 {
        self.bits.len() as u32
    }

    /// Returns bit `index`, counting from the least significant bit.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(&self, index: u32) -> Bit {
        self.bits[index as usize]
    }

    /// All bits, least significant first.
    pub fn as_slice(&self) -> &[Bit] {
        &self.bits
    }

    /// Returns `true` if no bit is `x` or `z`.
    pub fn is_fully_known(&self) -> bool {
        self.bits.iter().all(|b| b.is_known())
    }

    /// Converts to `u64` if every bit is known and the value fits.
    pub fn to_u64(&self) -> Option<u64> {
        let mut value = 0u64;
        for (i, bit) in self.bits.iter().enumerate() {
            match bit {
                Bit::Zero => {}
                Bit::One if i < 64 => value |= 1 << i,
                _ => return None,
            }
        }
        Some(value)
    }
}

impl fmt::Display for ConstBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.signed { "s" } else { "" };
        write!(f, "{}'{sign}b", self.width())?;
        for bit in self.bits.iter().rev() {
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u64_truncates_to_width() {
        let v = ConstBits::from_u64(0x1ff, 8);
        assert_eq!(v.width(), 8);
        assert_eq!(v.to_u64(), Some(0xff));
    }

    #[test]
    fn from_i64_negative_is_all_ones() {
        let v = ConstBits::from_i64(-1, 32);
        assert!(v.is_signed());
        assert!(v.as_slice().iter().all(|b| *b == Bit::One));
    }

    #[test]
    fn hex_digits_with_unknowns() {
        let v = ConstBits::from_digits(16, "f_x", None).unwrap();
        assert_eq!(v.width(), 8);
        assert_eq!(v.to_string(), "8'b1111xxxx");
    }

    #[test]
    fn sized_binary_extends_with_z() {
        let v = ConstBits::from_digits(2, "z1", Some(4)).unwrap();
        assert_eq!(v.to_string(), "4'bzzz1");
    }

    #[test]
    fn sized_binary_zero_extends() {
        let v = ConstBits::from_digits(2, "101", Some(6)).unwrap();
        assert_eq!(v.to_string(), "6'b000101");
    }

    #[test]
    fn decimal_natural_width() {
        let v = ConstBits::from_digits(10, "5", None).unwrap();
        assert_eq!(v.width(), 3);
        assert_eq!(v.to_u64(), Some(5));
    }

    #[test]
    fn decimal_x_fills_width() {
        let v = ConstBits::from_digits(10, "x", Some(4)).unwrap();
        assert_eq!(v.to_string(), "4'bxxxx");
    }

    #[test]
    fn octal_digits() {
        let v = ConstBits::from_digits(8, "17", None).unwrap();
        assert_eq!(v.to_u64(), Some(0o17));
        assert_eq!(v.width(), 6);
    }

    #[test]
    fn invalid_digit_rejected() {
        let err = ConstBits::from_digits(2, "102", None).unwrap_err();
        assert_eq!(err, BitsError::InvalidDigit { digit: '2', radix: 2 });
    }

    #[test]
    fn empty_and_bad_radix() {
        assert_eq!(ConstBits::from_digits(16, "__", None), Err(BitsError::Empty));
        assert_eq!(
            ConstBits::from_digits(7, "1", None),
            Err(BitsError::UnsupportedRadix(7))
        );
    }

    #[test]
    fn decimal_overflow() {
        let huge = "9".repeat(60);
        assert!(matches!(
            ConstBits::from_digits(10, &huge, None),
            Err(BitsError::Overflow(_))
        ));
    }

    #[test]
    fn string_bytes_first_char_is_msb() {
        let v = ConstBits::from_str_bytes("AB");
        assert_eq!(v.width(), 16);
        assert_eq!(v.to_u64(), Some(0x4142));
    }

    #[test]
    fn signed_resize_sign_extends() {
        let mut v = ConstBits::from_i64(-2, 4);
        v.resize(8);
        assert_eq!(v.to_u64(), Some(0xfe));
    }

    #[test]
    fn unknown_bits_have_no_integer_value() {
        let v = ConstBits::fill(Bit::X, 3);
        assert!(!v.is_fully_known());
        assert_eq!(v.to_u64(), None);
    }

    #[test]
    fn serde_roundtrip() {
        let v = ConstBits::from_digits(16, "a5", Some(12)).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        let back: ConstBits = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}

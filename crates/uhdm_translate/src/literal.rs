//! Constant folding of literal value text into constant nodes.
//!
//! Two spellings are accepted: the object model's encoded form
//! (`INT:5`, `BIN:10x1`, `HEX:ff`, `REAL:1.5`, `STRING:abc`, ...) and plain
//! source syntax (`8'hff`, `'1`, `42`).

use crate::context::TranslationContext;
use crate::errors::{error_malformed_literal, TranslateResult};
use crate::factory;
use uhdm_ast::{AstKind, ConstValue, NodeId};
use uhdm_common::{Bit, BitsError, ConstBits};
use uhdm_model::{ObjectId, Property};

/// Why a literal failed to parse.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LiteralError {
    /// No value text.
    #[error("no value")]
    Empty,
    /// An `INT:`/`UINT:` payload is not an integer.
    #[error("`{0}` is not an integer")]
    InvalidInteger(String),
    /// A `REAL:` payload is not a real number.
    #[error("`{0}` is not a real number")]
    InvalidReal(String),
    /// A width before `'` is not a positive integer.
    #[error("invalid width `{0}`")]
    InvalidWidth(String),
    /// The width exceeds [`MAX_LITERAL_WIDTH`].
    #[error("width {0} exceeds the {MAX_LITERAL_WIDTH}-bit limit")]
    TooWide(u64),
    /// No radix letter after `'`.
    #[error("missing radix after `'`")]
    MissingRadix,
    /// The digits do not parse in the literal's radix.
    #[error(transparent)]
    Digits(#[from] BitsError),
}

/// A folded literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A bit vector.
    Bits {
        /// The value.
        bits: ConstBits,
        /// Unbased unsized literal (`'0`, `'1`, `'x`, `'z`).
        is_unsized: bool,
        /// String literal.
        is_string: bool,
    },
    /// A real number.
    Real(f64),
}

impl Literal {
    fn bits(bits: ConstBits) -> Self {
        Literal::Bits {
            bits,
            is_unsized: false,
            is_string: false,
        }
    }
}

/// Widest literal folded into a constant, in bits.
pub const MAX_LITERAL_WIDTH: u32 = 1 << 20;

fn check_width(width: u64) -> Result<u32, LiteralError> {
    u32::try_from(width)
        .ok()
        .filter(|&w| w <= MAX_LITERAL_WIDTH)
        .ok_or(LiteralError::TooWide(width))
}

/// Parses literal value text. `size` is the declared width in bits, if known.
pub fn parse_literal(text: &str, size: Option<u32>) -> Result<Literal, LiteralError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LiteralError::Empty);
    }
    if let Some(size) = size {
        check_width(u64::from(size))?;
    }
    if let Some((prefix, payload)) = text.split_once(':') {
        if let Some(lit) = parse_encoded(prefix, payload, size)? {
            return Ok(lit);
        }
    }
    parse_source(text, size)
}

fn parse_encoded(prefix: &str, payload: &str, size: Option<u32>) -> Result<Option<Literal>, LiteralError> {
    let lit = match prefix {
        "INT" => {
            let v: i64 = payload
                .trim()
                .parse()
                .map_err(|_| LiteralError::InvalidInteger(payload.to_string()))?;
            Literal::bits(ConstBits::from_i64(v, size.unwrap_or(32)))
        }
        "UINT" => match payload.trim().parse::<u64>() {
            Ok(v) => Literal::bits(ConstBits::from_u64(v, size.unwrap_or(32))),
            Err(_) => Literal::bits(ConstBits::from_digits(10, payload.trim(), size.or(Some(32)))?),
        },
        "DEC" => Literal::bits(ConstBits::from_digits(10, payload.trim(), size.or(Some(32)))?),
        "BIN" => Literal::bits(ConstBits::from_digits(2, payload.trim(), size)?),
        "OCT" => Literal::bits(ConstBits::from_digits(8, payload.trim(), size)?),
        "HEX" => Literal::bits(ConstBits::from_digits(16, payload.trim(), size)?),
        "REAL" => Literal::Real(
            payload
                .trim()
                .parse()
                .map_err(|_| LiteralError::InvalidReal(payload.to_string()))?,
        ),
        "STRING" => Literal::Bits {
            bits: ConstBits::from_str_bytes(payload),
            is_unsized: false,
            is_string: true,
        },
        _ => return Ok(None),
    };
    Ok(Some(lit))
}

fn parse_source(text: &str, size: Option<u32>) -> Result<Literal, LiteralError> {
    let Some((width_text, rest)) = text.split_once('\'') else {
        let mut bits = ConstBits::from_digits(10, text, Some(size.unwrap_or(32)))?;
        bits.set_signed(true);
        return Ok(Literal::bits(bits));
    };

    let width_text = width_text.trim();
    if width_text.is_empty() {
        let mut chars = rest.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(bit) = Bit::from_char(c).filter(|_| c != '?') {
                return Ok(Literal::Bits {
                    bits: ConstBits::fill(bit, 1),
                    is_unsized: true,
                    is_string: false,
                });
            }
        }
    }

    let width = if width_text.is_empty() {
        None
    } else {
        let cleaned: String = width_text.chars().filter(|c| *c != '_').collect();
        match cleaned.parse::<u64>() {
            Ok(w) if w > 0 => Some(check_width(w)?),
            _ => return Err(LiteralError::InvalidWidth(width_text.to_string())),
        }
    };

    let (signed, rest) = match rest.strip_prefix(['s', 'S']) {
        Some(r) => (true, r),
        None => (false, rest),
    };
    let mut chars = rest.chars();
    let radix = match chars.next().map(|c| c.to_ascii_lowercase()) {
        Some('b') => 2,
        Some('o') => 8,
        Some('d') => 10,
        Some('h') => 16,
        _ => return Err(LiteralError::MissingRadix),
    };
    let digits = chars.as_str().trim();
    let mut bits = ConstBits::from_digits(radix, digits, width.or(size).or(Some(32)))?;
    bits.set_signed(signed);
    Ok(Literal::bits(bits))
}

fn declared_size(ctx: &TranslationContext<'_>, obj: ObjectId) -> Option<u32> {
    ctx.model
        .property(obj, Property::Size)
        .filter(|&s| s > 0)
        .and_then(|s| u32::try_from(s).ok())
}

/// Folds the value of `obj` into a constant node memoized under `obj`.
///
/// A malformed value is reported as `E302` and yields no node.
pub fn translate_constant(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
) -> TranslateResult<Option<NodeId>> {
    let Some(lit) = fold_value(ctx, obj)? else {
        return Ok(None);
    };
    let kind = match lit {
        Literal::Real(_) => AstKind::RealValue,
        Literal::Bits { .. } => AstKind::Constant,
    };
    let node = factory::make_named(ctx, obj, kind, String::new());
    apply_literal(ctx, node, lit);
    Ok(Some(node))
}

/// Folds the value of `obj` into an unmemoized constant node.
pub fn value_node(ctx: &mut TranslationContext<'_>, obj: ObjectId) -> TranslateResult<Option<NodeId>> {
    let Some(lit) = fold_value(ctx, obj)? else {
        return Ok(None);
    };
    let loc = ctx.loc_of(obj);
    let kind = match lit {
        Literal::Real(_) => AstKind::RealValue,
        Literal::Bits { .. } => AstKind::Constant,
    };
    let node = factory::synth(ctx, kind, "", loc);
    apply_literal(ctx, node, lit);
    Ok(Some(node))
}

fn fold_value(ctx: &mut TranslationContext<'_>, obj: ObjectId) -> TranslateResult<Option<Literal>> {
    let model = ctx.model;
    let text = model.value(obj).unwrap_or("");
    match parse_literal(text, declared_size(ctx, obj)) {
        Ok(lit) => Ok(Some(lit)),
        Err(err) => {
            let loc = ctx.loc_of(obj);
            ctx.report(error_malformed_literal(text, &err.to_string(), loc))?;
            Ok(None)
        }
    }
}

fn apply_literal(ctx: &mut TranslationContext<'_>, node: NodeId, lit: Literal) {
    let n = ctx.ast.get_mut(node);
    match lit {
        Literal::Bits {
            bits,
            is_unsized,
            is_string,
        } => {
            n.flags.is_signed = bits.is_signed();
            n.flags.is_unsized = is_unsized;
            n.flags.is_string = is_string;
            n.value = Some(ConstValue::Bits(bits));
        }
        Literal::Real(v) => n.value = Some(ConstValue::Real(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_of(lit: Literal) -> ConstBits {
        match lit {
            Literal::Bits { bits, .. } => bits,
            Literal::Real(v) => panic!("unexpected real {v}"),
        }
    }

    #[test]
    fn encoded_integers() {
        let b = bits_of(parse_literal("INT:-3", None).unwrap());
        assert_eq!(b.width(), 32);
        assert!(b.is_signed());
        let b = bits_of(parse_literal("UINT:5", Some(4)).unwrap());
        assert_eq!(b.width(), 4);
        assert_eq!(b.to_u64(), Some(5));
        assert!(!b.is_signed());
    }

    #[test]
    fn encoded_vectors_keep_x() {
        let b = bits_of(parse_literal("BIN:10x1", None).unwrap());
        assert_eq!(b.width(), 4);
        assert_eq!(b.get(1), Bit::X);
        let b = bits_of(parse_literal("HEX:ff", Some(12)).unwrap());
        assert_eq!(b.width(), 12);
        assert_eq!(b.to_u64(), Some(0xff));
    }

    #[test]
    fn strings_and_reals() {
        match parse_literal("STRING:ab", None).unwrap() {
            Literal::Bits { bits, is_string, .. } => {
                assert!(is_string);
                assert_eq!(bits.width(), 16);
                assert_eq!(bits.to_u64(), Some(0x6162));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(parse_literal("REAL:1.5", None).unwrap(), Literal::Real(1.5));
    }

    #[test]
    fn source_syntax() {
        let b = bits_of(parse_literal("8'hff", None).unwrap());
        assert_eq!(b.width(), 8);
        assert_eq!(b.to_u64(), Some(255));
        let b = bits_of(parse_literal("4'sb1010", None).unwrap());
        assert!(b.is_signed());
        let b = bits_of(parse_literal("42", None).unwrap());
        assert_eq!(b.width(), 32);
        assert!(b.is_signed());
        let b = bits_of(parse_literal("'hf", None).unwrap());
        assert_eq!(b.width(), 32);
    }

    #[test]
    fn unbased_unsized() {
        match parse_literal("'1", None).unwrap() {
            Literal::Bits {
                bits, is_unsized, ..
            } => {
                assert!(is_unsized);
                assert_eq!(bits.as_slice(), &[Bit::One]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn malformed() {
        assert!(matches!(
            parse_literal("8'hqq", None),
            Err(LiteralError::Digits(BitsError::InvalidDigit { digit: 'q', radix: 16 }))
        ));
        assert_eq!(parse_literal("8'", None), Err(LiteralError::MissingRadix));
        assert_eq!(parse_literal("x'h1", None), Err(LiteralError::InvalidWidth("x".into())));
        assert_eq!(parse_literal("", None), Err(LiteralError::Empty));
        assert_eq!(
            parse_literal("INT:abc", None),
            Err(LiteralError::InvalidInteger("abc".into()))
        );
    }

    #[test]
    fn oversized_widths_rejected() {
        assert_eq!(
            parse_literal("4000000000'h0", None),
            Err(LiteralError::TooWide(4_000_000_000))
        );
        assert_eq!(
            parse_literal("99999999999'b1", None),
            Err(LiteralError::TooWide(99_999_999_999))
        );
        assert_eq!(
            parse_literal("UINT:1", Some(MAX_LITERAL_WIDTH + 1)),
            Err(LiteralError::TooWide(u64::from(MAX_LITERAL_WIDTH) + 1))
        );
        let b = bits_of(parse_literal("HEX:1", Some(MAX_LITERAL_WIDTH)).unwrap());
        assert_eq!(b.width(), MAX_LITERAL_WIDTH);
    }
}

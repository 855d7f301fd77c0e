//! Integer-valued object properties and their typed decoders.
//!
//! Property values use the numeric codes of the standard object model, so a
//! model deserialized from a persisted design can hand them through unchanged.

use serde::{Deserialize, Serialize};

/// An integer property of a source object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Property {
    /// Port or argument direction, decoded by [`Direction`].
    Direction,
    /// Operator of an operation or compound assignment, decoded by [`OpType`].
    OpType,
    /// Constant encoding, decoded by [`ConstType`].
    ConstType,
    /// Constant width in bits; `-1` for unsized.
    Size,
    /// Non-zero for blocking assignments.
    Blocking,
    /// Net storage kind, decoded by [`NetType`].
    NetType,
    /// Non-zero for signed declarations.
    Signed,
    /// Case flavour, decoded by [`CaseType`].
    CaseType,
    /// Process flavour, decoded by [`AlwaysType`].
    AlwaysType,
    /// Non-zero for local parameters.
    LocalParam,
}

/// Port or argument direction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    /// `input`.
    Input,
    /// `output`.
    Output,
    /// `inout`.
    Inout,
    /// Mixed direction on a complex port.
    MixedIo,
    /// No direction.
    NoDirection,
}

impl Direction {
    /// Decodes a property value.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => Direction::Input,
            2 => Direction::Output,
            3 => Direction::Inout,
            4 => Direction::MixedIo,
            5 => Direction::NoDirection,
            _ => return None,
        })
    }

    /// The property value.
    pub fn code(self) -> i64 {
        match self {
            Direction::Input => 1,
            Direction::Output => 2,
            Direction::Inout => 3,
            Direction::MixedIo => 4,
            Direction::NoDirection => 5,
        }
    }

    /// `(is_input, is_output)` flags for this direction.
    pub fn flags(self) -> (bool, bool) {
        match self {
            Direction::Input => (true, false),
            Direction::Output => (false, true),
            Direction::Inout | Direction::MixedIo => (true, true),
            Direction::NoDirection => (false, false),
        }
    }
}

macro_rules! op_types {
    ($( $(#[$meta:meta])* $variant:ident = $code:literal, )*) => {
        /// Operator of an operation.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub enum OpType {
            $( $(#[$meta])* $variant, )*
        }

        impl OpType {
            /// Decodes a property value; `None` for codes this model does not name.
            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $( $code => Some(OpType::$variant), )*
                    _ => None,
                }
            }

            /// The property value.
            pub fn code(self) -> i64 {
                match self {
                    $( OpType::$variant => $code, )*
                }
            }
        }
    };
}

op_types! {
    /// Unary `-`.
    Minus = 1,
    /// Unary `+`.
    Plus = 2,
    /// `!`.
    Not = 3,
    /// `~`.
    BitNeg = 4,
    /// Unary `&`.
    UnaryAnd = 5,
    /// Unary `~&`.
    UnaryNand = 6,
    /// Unary `|`.
    UnaryOr = 7,
    /// Unary `~|`.
    UnaryNor = 8,
    /// Unary `^`.
    UnaryXor = 9,
    /// Unary `~^`.
    UnaryXnor = 10,
    /// Binary `-`.
    Sub = 11,
    /// `/`.
    Div = 12,
    /// `%`.
    Mod = 13,
    /// `==`.
    Eq = 14,
    /// `!=`.
    Neq = 15,
    /// `===`.
    CaseEq = 16,
    /// `!==`.
    CaseNeq = 17,
    /// `>`.
    Gt = 18,
    /// `>=`.
    Ge = 19,
    /// `<`.
    Lt = 20,
    /// `<=`.
    Le = 21,
    /// `<<`.
    LShift = 22,
    /// `>>`.
    RShift = 23,
    /// Binary `+`.
    Add = 24,
    /// `*`.
    Mult = 25,
    /// `&&`.
    LogAnd = 26,
    /// `||`.
    LogOr = 27,
    /// Binary `&`.
    BitAnd = 28,
    /// Binary `|`.
    BitOr = 29,
    /// Binary `^`.
    BitXor = 30,
    /// Binary `~^`.
    BitXnor = 31,
    /// `?:`.
    Condition = 32,
    /// `{a, b}`.
    Concat = 33,
    /// `{n{a}}`.
    MultiConcat = 34,
    /// `a or b` in an event list.
    EventOr = 35,
    /// Empty operation.
    Null = 36,
    /// `a, b` in an event list.
    List = 37,
    /// `min:typ:max`.
    MinTypMax = 38,
    /// `posedge`.
    Posedge = 39,
    /// `negedge`.
    Negedge = 40,
    /// `<<<`.
    ArithLShift = 41,
    /// `>>>`.
    ArithRShift = 42,
    /// `**`.
    Power = 43,
    /// `a++`.
    PostInc = 62,
    /// `++a`.
    PreInc = 63,
    /// `a--`.
    PostDec = 64,
    /// `--a`.
    PreDec = 65,
    /// `T'(x)`.
    Cast = 67,
    /// `==?`.
    WildEq = 69,
    /// `!=?`.
    WildNeq = 70,
    /// `{>>{...}}`.
    StreamLr = 71,
    /// `{<<{...}}`.
    StreamRl = 72,
    /// `'{...}`.
    AssignmentPattern = 75,
    /// `'{n{...}}`.
    MultiAssignmentPattern = 76,
    /// Plain `=` on an assignment.
    Assignment = 82,
    /// `->`.
    Implies = 94,
    /// `inside`.
    Inside = 95,
}

/// Encoding of a constant's value text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ConstType {
    /// Decimal.
    Dec,
    /// Real.
    Real,
    /// Binary.
    Binary,
    /// Octal.
    Oct,
    /// Hexadecimal.
    Hex,
    /// String.
    String,
    /// Signed integer.
    Int,
    /// Time.
    Time,
    /// Unsigned integer.
    UInt,
}

impl ConstType {
    /// Decodes a property value.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => ConstType::Dec,
            2 => ConstType::Real,
            3 => ConstType::Binary,
            4 => ConstType::Oct,
            5 => ConstType::Hex,
            6 => ConstType::String,
            7 => ConstType::Int,
            8 => ConstType::Time,
            9 => ConstType::UInt,
            _ => return None,
        })
    }

    /// The property value.
    pub fn code(self) -> i64 {
        match self {
            ConstType::Dec => 1,
            ConstType::Real => 2,
            ConstType::Binary => 3,
            ConstType::Oct => 4,
            ConstType::Hex => 5,
            ConstType::String => 6,
            ConstType::Int => 7,
            ConstType::Time => 8,
            ConstType::UInt => 9,
        }
    }
}

/// Net storage kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NetType {
    /// `wire`.
    Wire,
    /// `tri`.
    Tri,
    /// `supply0` / `supply1`.
    Supply,
    /// `uwire`.
    Uwire,
    /// `reg`.
    Reg,
    /// Any other resolved net type.
    Other(i64),
}

impl NetType {
    /// Decodes a property value.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => NetType::Wire,
            4 => NetType::Tri,
            10 | 11 => NetType::Supply,
            13 => NetType::Uwire,
            48 => NetType::Reg,
            other => NetType::Other(other),
        }
    }

    /// The property value.
    pub fn code(self) -> i64 {
        match self {
            NetType::Wire => 1,
            NetType::Tri => 4,
            NetType::Supply => 10,
            NetType::Uwire => 13,
            NetType::Reg => 48,
            NetType::Other(code) => code,
        }
    }
}

/// Process flavour.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AlwaysType {
    /// `always`.
    Always,
    /// `always_comb`.
    AlwaysComb,
    /// `always_ff`.
    AlwaysFf,
    /// `always_latch`.
    AlwaysLatch,
}

impl AlwaysType {
    /// Decodes a property value.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => AlwaysType::Always,
            2 => AlwaysType::AlwaysComb,
            3 => AlwaysType::AlwaysFf,
            4 => AlwaysType::AlwaysLatch,
            _ => return None,
        })
    }

    /// The property value.
    pub fn code(self) -> i64 {
        match self {
            AlwaysType::Always => 1,
            AlwaysType::AlwaysComb => 2,
            AlwaysType::AlwaysFf => 3,
            AlwaysType::AlwaysLatch => 4,
        }
    }
}

/// Case statement flavour.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CaseType {
    /// `case`.
    Exact,
    /// `casex`.
    X,
    /// `casez`.
    Z,
}

impl CaseType {
    /// Decodes a property value.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => CaseType::Exact,
            2 => CaseType::X,
            3 => CaseType::Z,
            _ => return None,
        })
    }

    /// The property value.
    pub fn code(self) -> i64 {
        match self {
            CaseType::Exact => 1,
            CaseType::X => 2,
            CaseType::Z => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_codes_roundtrip() {
        for op in [OpType::Minus, OpType::Power, OpType::PostInc, OpType::Inside] {
            assert_eq!(OpType::from_code(op.code()), Some(op));
        }
        assert_eq!(OpType::Inside.code(), 95);
        assert_eq!(OpType::from_code(999), None);
        assert_eq!(OpType::from_code(50), None);
    }

    #[test]
    fn direction_flags() {
        assert_eq!(Direction::Input.flags(), (true, false));
        assert_eq!(Direction::Inout.flags(), (true, true));
        assert_eq!(Direction::from_code(0), None);
    }

    #[test]
    fn net_type_keeps_unknown_codes() {
        assert_eq!(NetType::from_code(48), NetType::Reg);
        assert_eq!(NetType::from_code(7), NetType::Other(7));
        assert_eq!(NetType::Other(7).code(), 7);
    }

    #[test]
    fn case_and_always_types() {
        assert_eq!(CaseType::from_code(2), Some(CaseType::X));
        assert_eq!(AlwaysType::from_code(3), Some(AlwaysType::AlwaysFf));
        assert_eq!(ConstType::from_code(ConstType::Hex.code()), Some(ConstType::Hex));
    }
}

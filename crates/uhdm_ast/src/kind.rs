//! The closed set of AST node kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! ast_kinds {
    ($( $(#[$meta:meta])* $variant:ident => $text:literal, )*) => {
        /// Kind tag of an [`AstNode`](crate::AstNode).
        ///
        /// `Display` prints the `AST_*` spelling the downstream elaboration
        /// engine uses for the same node type.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub enum AstKind {
            $( $(#[$meta])* $variant, )*
        }

        impl AstKind {
            /// The `AST_*` spelling of this kind.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( AstKind::$variant => $text, )*
                }
            }
        }
    };
}

ast_kinds! {
    /// Root of one translated design.
    Design => "AST_DESIGN",
    /// Module definition (template or specialized clone).
    Module => "AST_MODULE",
    /// Interface definition.
    Interface => "AST_INTERFACE",
    /// Package scope.
    Package => "AST_PACKAGE",
    /// Instantiation of a module or interface.
    Cell => "AST_CELL",
    /// Definition name referenced by a cell.
    CellType => "AST_CELLTYPE",
    /// Port binding of a cell; the child is the actual expression.
    Argument => "AST_ARGUMENT",
    /// Generate block.
    GenBlock => "AST_GENBLOCK",
    /// Named type declaration.
    Typedef => "AST_TYPEDEF",
    /// Packed struct shape.
    Struct => "AST_STRUCT",
    /// Struct member.
    StructItem => "AST_STRUCT_ITEM",
    /// Enumeration shape.
    Enum => "AST_ENUM",
    /// Enumeration constant.
    EnumItem => "AST_ENUM_ITEM",
    /// Reference to a named type from a declaration.
    WireType => "AST_WIRETYPE",
    /// Net, variable or port declaration.
    Wire => "AST_WIRE",
    /// Overridable parameter.
    Parameter => "AST_PARAMETER",
    /// Local parameter.
    Localparam => "AST_LOCALPARAM",
    /// Bit range `[left:right]` or single index.
    Range => "AST_RANGE",
    /// Function declaration.
    Function => "AST_FUNCTION",
    /// Task declaration.
    Task => "AST_TASK",
    /// Continuous assignment.
    Assign => "AST_ASSIGN",
    /// Blocking assignment.
    AssignEq => "AST_ASSIGN_EQ",
    /// Non-blocking assignment.
    AssignLe => "AST_ASSIGN_LE",
    /// `always` process.
    Always => "AST_ALWAYS",
    /// `initial` process.
    Initial => "AST_INITIAL",
    /// Sequential statement block.
    Block => "AST_BLOCK",
    /// Case statement; the first child is the selector.
    Case => "AST_CASE",
    /// Case item.
    Cond => "AST_COND",
    /// `casex` item.
    CondX => "AST_CONDX",
    /// `casez` item.
    CondZ => "AST_CONDZ",
    /// Default selector of a case item.
    Default => "AST_DEFAULT",
    /// For loop: init, condition, increment, body.
    For => "AST_FOR",
    /// While loop: condition, body.
    While => "AST_WHILE",
    /// Task call.
    TCall => "AST_TCALL",
    /// Reference to a named object.
    Identifier => "AST_IDENTIFIER",
    /// Bit-vector constant.
    Constant => "AST_CONSTANT",
    /// Real constant.
    RealValue => "AST_REALVALUE",
    /// Function or system function call.
    FCall => "AST_FCALL",
    /// Concatenation.
    Concat => "AST_CONCAT",
    /// Replication: count, concatenation.
    Replicate => "AST_REPLICATE",
    /// Conditional operator.
    Ternary => "AST_TERNARY",
    /// Rising edge event.
    Posedge => "AST_POSEDGE",
    /// Falling edge event.
    Negedge => "AST_NEGEDGE",
    /// Unary minus.
    Neg => "AST_NEG",
    /// Unary plus.
    Pos => "AST_POS",
    /// Bitwise negation.
    BitNot => "AST_BIT_NOT",
    /// Logical negation.
    LogicNot => "AST_LOGIC_NOT",
    /// Reduction and.
    ReduceAnd => "AST_REDUCE_AND",
    /// Reduction or.
    ReduceOr => "AST_REDUCE_OR",
    /// Reduction xor.
    ReduceXor => "AST_REDUCE_XOR",
    /// Reduction xnor.
    ReduceXnor => "AST_REDUCE_XNOR",
    /// Addition.
    Add => "AST_ADD",
    /// Subtraction.
    Sub => "AST_SUB",
    /// Multiplication.
    Mul => "AST_MUL",
    /// Division.
    Div => "AST_DIV",
    /// Modulus.
    Mod => "AST_MOD",
    /// Power.
    Pow => "AST_POW",
    /// Bitwise and.
    BitAnd => "AST_BIT_AND",
    /// Bitwise or.
    BitOr => "AST_BIT_OR",
    /// Bitwise xor.
    BitXor => "AST_BIT_XOR",
    /// Bitwise xnor.
    BitXnor => "AST_BIT_XNOR",
    /// Logical and.
    LogicAnd => "AST_LOGIC_AND",
    /// Logical or.
    LogicOr => "AST_LOGIC_OR",
    /// Equality.
    Eq => "AST_EQ",
    /// Inequality.
    Ne => "AST_NE",
    /// Case equality.
    EqX => "AST_EQX",
    /// Case inequality.
    NeX => "AST_NEX",
    /// Less than.
    Lt => "AST_LT",
    /// Less or equal.
    Le => "AST_LE",
    /// Greater than.
    Gt => "AST_GT",
    /// Greater or equal.
    Ge => "AST_GE",
    /// Logical shift left.
    ShiftLeft => "AST_SHIFT_LEFT",
    /// Logical shift right.
    ShiftRight => "AST_SHIFT_RIGHT",
    /// Arithmetic shift left.
    ShiftSLeft => "AST_SHIFT_SLEFT",
    /// Arithmetic shift right.
    ShiftSRight => "AST_SHIFT_SRIGHT",
}

impl AstKind {
    /// Kinds that own declarations: designs, definitions, packages and
    /// generate blocks.
    pub fn is_scope(self) -> bool {
        matches!(
            self,
            AstKind::Design
                | AstKind::Module
                | AstKind::Interface
                | AstKind::Package
                | AstKind::GenBlock
        )
    }

    /// `always` and `initial`.
    pub fn is_process(self) -> bool {
        matches!(self, AstKind::Always | AstKind::Initial)
    }

    /// The three assignment statement kinds.
    pub fn is_assignment(self) -> bool {
        matches!(self, AstKind::Assign | AstKind::AssignEq | AstKind::AssignLe)
    }
}

impl fmt::Display for AstKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

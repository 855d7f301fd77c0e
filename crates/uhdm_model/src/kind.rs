//! Object kinds of the design object model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of a source object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Top of a parsed and elaborated design.
    Design,
    /// Module definition or instance.
    Module,
    /// Interface definition or instance.
    Interface,
    /// Package.
    Package,
    /// Program block.
    Program,
    /// Class definition.
    ClassDefn,
    /// User-defined primitive.
    Udp,
    /// Module port.
    Port,
    /// Net declaration.
    Net,
    /// Variable declaration.
    Variable,
    /// Parameter declaration.
    Parameter,
    /// Parameter value assignment, either a default or an instance override.
    ParamAssign,
    /// Struct type.
    StructTypespec,
    /// Enum type.
    EnumTypespec,
    /// Packed logic vector type.
    LogicTypespec,
    /// `int` type.
    IntTypespec,
    /// Struct member.
    TypespecMember,
    /// Enum constant.
    EnumConst,
    /// Packed dimension.
    Range,
    /// Continuous assignment.
    ContAssign,
    /// `always` process.
    Always,
    /// `initial` process.
    Initial,
    /// `@(...)` timing control wrapping a statement.
    EventControl,
    /// `begin ... end` block.
    Begin,
    /// Procedural assignment.
    Assignment,
    /// `if` without `else`.
    If,
    /// `if` with `else`.
    IfElse,
    /// Case statement.
    Case,
    /// Case item.
    CaseItem,
    /// For loop.
    For,
    /// While loop.
    While,
    /// Operator application.
    Operation,
    /// Literal constant.
    Constant,
    /// Reference to a named object.
    RefObj,
    /// `x[l:r]`.
    PartSelect,
    /// `x[i]`.
    BitSelect,
    /// `name: value` element of an assignment pattern.
    TaggedPattern,
    /// Generate loop or conditional.
    GenScopeArray,
    /// One iteration of a generate scope array.
    GenScope,
    /// Function declaration.
    Function,
    /// Task declaration.
    Task,
    /// Function or task argument declaration.
    IoDecl,
    /// User function call.
    FuncCall,
    /// System function call.
    SysFuncCall,
    /// Task call.
    TaskCall,
}

impl ObjectKind {
    /// Lower-case name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Design => "design",
            ObjectKind::Module => "module",
            ObjectKind::Interface => "interface",
            ObjectKind::Package => "package",
            ObjectKind::Program => "program",
            ObjectKind::ClassDefn => "class_defn",
            ObjectKind::Udp => "udp",
            ObjectKind::Port => "port",
            ObjectKind::Net => "net",
            ObjectKind::Variable => "variable",
            ObjectKind::Parameter => "parameter",
            ObjectKind::ParamAssign => "param_assign",
            ObjectKind::StructTypespec => "struct_typespec",
            ObjectKind::EnumTypespec => "enum_typespec",
            ObjectKind::LogicTypespec => "logic_typespec",
            ObjectKind::IntTypespec => "int_typespec",
            ObjectKind::TypespecMember => "typespec_member",
            ObjectKind::EnumConst => "enum_const",
            ObjectKind::Range => "range",
            ObjectKind::ContAssign => "cont_assign",
            ObjectKind::Always => "always",
            ObjectKind::Initial => "initial",
            ObjectKind::EventControl => "event_control",
            ObjectKind::Begin => "begin",
            ObjectKind::Assignment => "assignment",
            ObjectKind::If => "if_stmt",
            ObjectKind::IfElse => "if_else",
            ObjectKind::Case => "case_stmt",
            ObjectKind::CaseItem => "case_item",
            ObjectKind::For => "for_stmt",
            ObjectKind::While => "while_stmt",
            ObjectKind::Operation => "operation",
            ObjectKind::Constant => "constant",
            ObjectKind::RefObj => "ref_obj",
            ObjectKind::PartSelect => "part_select",
            ObjectKind::BitSelect => "bit_select",
            ObjectKind::TaggedPattern => "tagged_pattern",
            ObjectKind::GenScopeArray => "gen_scope_array",
            ObjectKind::GenScope => "gen_scope",
            ObjectKind::Function => "function",
            ObjectKind::Task => "task",
            ObjectKind::IoDecl => "io_decl",
            ObjectKind::FuncCall => "func_call",
            ObjectKind::SysFuncCall => "sys_func_call",
            ObjectKind::TaskCall => "task_call",
        }
    }

    /// Module-like objects that go through template/instance handling.
    pub fn is_definition(self) -> bool {
        matches!(self, ObjectKind::Module | ObjectKind::Interface)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

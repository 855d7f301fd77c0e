//! Typed edges between source objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An edge kind. One-to-one relations hold at most one target; one-to-many
/// relations hold targets in the model's native order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Relation {
    /// Every module definition of a design.
    AllModules,
    /// Elaborated top-level instances of a design.
    TopModules,
    /// Every package of a design.
    AllPackages,
    /// Every interface definition of a design.
    AllInterfaces,
    /// Every program of a design.
    AllPrograms,
    /// Every class of a design.
    AllClasses,
    /// Every user-defined primitive of a design.
    AllUdps,
    /// Ports of a module or interface.
    Port,
    /// Nets of a scope.
    Net,
    /// Variables of a scope.
    Variables,
    /// Parameters of a scope.
    Parameter,
    /// Parameter assignments of a scope (defaults or overrides).
    ParamAssign,
    /// Type declarations of a scope.
    Typedef,
    /// Continuous assignments of a scope.
    ContAssign,
    /// Processes of a scope.
    Process,
    /// Sub-module instances of a scope.
    Module,
    /// Interface instances of a scope.
    Interface,
    /// Generate scope arrays of a scope.
    GenScopeArray,
    /// Iterations of a generate scope array.
    GenScope,
    /// Tasks and functions of a scope.
    TaskFunc,
    /// Argument declarations of a task or function.
    IoDecl,
    /// Port connection on the instantiating side.
    HighConn,
    /// Port connection inside the instantiated definition.
    LowConn,
    /// Assignment target.
    Lhs,
    /// Assignment value.
    Rhs,
    /// Operation operands.
    Operand,
    /// Condition of a branch, loop or event control.
    Condition,
    /// Body statement.
    Stmt,
    /// Else branch.
    ElseStmt,
    /// Items of a case statement.
    CaseItem,
    /// Match expressions of a case item.
    Expr,
    /// For loop initialization.
    ForInitStmt,
    /// For loop increment.
    ForIncStmt,
    /// Call arguments.
    Argument,
    /// Value of a tagged pattern.
    Pattern,
    /// Bit select index.
    Index,
    /// Left bound of a part select or range.
    LeftRange,
    /// Right bound of a part select or range.
    RightRange,
    /// Packed dimensions of a declaration or type.
    Range,
    /// Type of a declaration, member or pattern tag.
    Typespec,
    /// Members of a struct type.
    TypespecMember,
    /// Constants of an enum type.
    EnumConst,
    /// Return variable of a function.
    Return,
    /// Enclosing scope.
    Parent,
    /// Object a reference resolves to.
    Actual,
    /// Instance an object belongs to.
    Instance,
    /// Bit-blasted view of a net.
    Bit,
    /// Drivers of a net.
    Driver,
    /// Loads of a net.
    Load,
    /// Delay control.
    Delay,
}

impl Relation {
    /// Back-references and derived views. These describe the graph rather
    /// than add content, so they are never translated and never reported.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Relation::Parent
                | Relation::Actual
                | Relation::Instance
                | Relation::Bit
                | Relation::Driver
                | Relation::Load
                | Relation::Delay
        )
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_relations() {
        assert!(Relation::Parent.is_structural());
        assert!(Relation::Actual.is_structural());
        assert!(!Relation::LowConn.is_structural());
        assert!(!Relation::AllPrograms.is_structural());
    }

    #[test]
    fn display_matches_variant() {
        assert_eq!(Relation::AllPrograms.to_string(), "AllPrograms");
    }
}

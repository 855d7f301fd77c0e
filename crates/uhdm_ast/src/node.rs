//! AST node payload.

use crate::ids::NodeId;
use crate::kind::AstKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uhdm_common::ConstBits;
use uhdm_source::SourceLoc;

/// Folded literal value of a [`AstKind::Constant`] or [`AstKind::RealValue`] node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConstValue {
    /// Four-state bit vector.
    Bits(ConstBits),
    /// Real number.
    Real(f64),
}

/// Boolean properties of a declaration or constant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeFlags {
    /// Input port.
    pub is_input: bool,
    /// Output port.
    pub is_output: bool,
    /// Variable storage (`reg`, `int`, loop variables).
    pub is_reg: bool,
    /// Declared with `logic`.
    pub is_logic: bool,
    /// Signed declaration or constant.
    pub is_signed: bool,
    /// Typed by a named struct or enum; the type is the single
    /// [`AstKind::WireType`] child.
    pub is_custom_type: bool,
    /// String literal.
    pub is_string: bool,
    /// Unbased unsized literal such as `'1`.
    pub is_unsized: bool,
}

/// One node of the translated tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AstNode {
    /// Kind tag.
    pub kind: AstKind,
    /// Sanitized symbol name, empty for anonymous nodes.
    pub name: String,
    /// Ordered children.
    pub children: Vec<NodeId>,
    /// Where the source object was declared.
    pub loc: SourceLoc,
    /// Boolean properties.
    pub flags: NodeFlags,
    /// Position of a port in its module's port list, starting at 1; 0 if the
    /// node is not a port.
    pub port_id: u32,
    /// Literal value for constants.
    pub value: Option<ConstValue>,
    /// Auxiliary string metadata such as enum linkage.
    pub attributes: BTreeMap<String, String>,
}

impl AstNode {
    /// Creates an anonymous node with no children.
    pub fn new(kind: AstKind) -> Self {
        Self {
            kind,
            name: String::new(),
            children: Vec::new(),
            loc: SourceLoc::DUMMY,
            flags: NodeFlags::default(),
            port_id: 0,
            value: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the source location.
    pub fn with_loc(mut self, loc: SourceLoc) -> Self {
        self.loc = loc;
        self
    }

    /// Sets the children.
    pub fn with_children(mut self, children: Vec<NodeId>) -> Self {
        self.children = children;
        self
    }

    /// Creates a bit-vector constant node. Signedness follows the value.
    pub fn constant(bits: ConstBits) -> Self {
        let mut node = Self::new(AstKind::Constant);
        node.flags.is_signed = bits.is_signed();
        node.value = Some(ConstValue::Bits(bits));
        node
    }

    /// Creates a real constant node.
    pub fn real(value: f64) -> Self {
        let mut node = Self::new(AstKind::RealValue);
        node.value = Some(ConstValue::Real(value));
        node
    }

    /// Returns the bit-vector value of a constant node.
    pub fn bits(&self) -> Option<&ConstBits> {
        match &self.value {
            Some(ConstValue::Bits(bits)) => Some(bits),
            _ => None,
        }
    }

    /// Returns the attribute value for `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Returns `true` if the node is an input or output port.
    pub fn is_port(&self) -> bool {
        self.flags.is_input || self.flags.is_output
    }
}

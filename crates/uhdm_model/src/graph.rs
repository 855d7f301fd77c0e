//! In-memory object graph with a builder API.

use crate::ids::ObjectId;
use crate::kind::ObjectKind;
use crate::model::ObjectModel;
use crate::property::{OpType, Property};
use crate::relation::Relation;
use uhdm_common::{Arena, Ident, Interner};

#[derive(Debug)]
struct ObjectRecord {
    kind: ObjectKind,
    name: Option<Ident>,
    def_name: Option<Ident>,
    file: Option<Ident>,
    line: u32,
    properties: Vec<(Property, i64)>,
    value: Option<String>,
    relations: Vec<(Relation, Vec<ObjectId>)>,
}

impl ObjectRecord {
    fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            name: None,
            def_name: None,
            file: None,
            line: 0,
            properties: Vec::new(),
            value: None,
            relations: Vec::new(),
        }
    }

    fn targets_mut(&mut self, rel: Relation) -> &mut Vec<ObjectId> {
        let idx = match self.relations.iter().position(|(r, _)| *r == rel) {
            Some(idx) => idx,
            None => {
                self.relations.push((rel, Vec::new()));
                self.relations.len() - 1
            }
        };
        &mut self.relations[idx].1
    }
}

/// An [`ObjectModel`] held entirely in memory.
///
/// Objects are created with [`ObjectGraph::add`] or [`ObjectGraph::build`] and
/// wired together with [`ObjectGraph::push`] and [`ObjectGraph::set_handle`].
/// Nothing prevents aliasing or cycles, matching real design graphs.
#[derive(Default)]
pub struct ObjectGraph {
    objects: Arena<ObjectId, ObjectRecord>,
    names: Interner,
}

impl ObjectGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the graph has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Adds an object with no metadata.
    pub fn add(&mut self, kind: ObjectKind) -> ObjectId {
        self.objects.alloc(ObjectRecord::new(kind))
    }

    /// Adds an object and returns a builder for it.
    pub fn build(&mut self, kind: ObjectKind) -> ObjectBuilder<'_> {
        let id = self.add(kind);
        ObjectBuilder { graph: self, id }
    }

    /// Continues building an existing object.
    pub fn edit(&mut self, id: ObjectId) -> ObjectBuilder<'_> {
        ObjectBuilder { graph: self, id }
    }

    /// Sets the instance name.
    pub fn set_name(&mut self, obj: ObjectId, name: &str) {
        let ident = self.names.get_or_intern(name);
        self.objects[obj].name = Some(ident);
    }

    /// Sets the definition name.
    pub fn set_def_name(&mut self, obj: ObjectId, name: &str) {
        let ident = self.names.get_or_intern(name);
        self.objects[obj].def_name = Some(ident);
    }

    /// Sets the declaring file and line.
    pub fn set_location(&mut self, obj: ObjectId, file: &str, line: u32) {
        let ident = self.names.get_or_intern(file);
        let record = &mut self.objects[obj];
        record.file = Some(ident);
        record.line = line;
    }

    /// Sets an integer property, replacing any earlier value.
    pub fn set_property(&mut self, obj: ObjectId, prop: Property, value: i64) {
        let props = &mut self.objects[obj].properties;
        match props.iter_mut().find(|(p, _)| *p == prop) {
            Some(entry) => entry.1 = value,
            None => props.push((prop, value)),
        }
    }

    /// Sets the constant value text.
    pub fn set_value(&mut self, obj: ObjectId, value: impl Into<String>) {
        self.objects[obj].value = Some(value.into());
    }

    /// Appends `target` to a one-to-many relation.
    pub fn push(&mut self, obj: ObjectId, rel: Relation, target: ObjectId) {
        self.objects[obj].targets_mut(rel).push(target);
    }

    /// Sets the single target of a one-to-one relation.
    pub fn set_handle(&mut self, obj: ObjectId, rel: Relation, target: ObjectId) {
        let targets = self.objects[obj].targets_mut(rel);
        targets.clear();
        targets.push(target);
    }

    /// A reference to `name`, resolved to `actual` when given.
    pub fn ref_obj(&mut self, name: &str, actual: Option<ObjectId>) -> ObjectId {
        let id = self.build(ObjectKind::RefObj).name(name).id();
        if let Some(actual) = actual {
            self.set_handle(id, Relation::Actual, actual);
        }
        id
    }

    /// A 32-bit signed integer constant.
    pub fn int_const(&mut self, value: i64) -> ObjectId {
        self.constant(&format!("INT:{value}"), 32)
    }

    /// A constant with explicit value text and size.
    pub fn constant(&mut self, text: &str, size: i64) -> ObjectId {
        self.build(ObjectKind::Constant)
            .value(text)
            .prop(Property::Size, size)
            .id()
    }

    /// An operation over `operands`.
    pub fn operation(&mut self, op: OpType, operands: &[ObjectId]) -> ObjectId {
        self.build(ObjectKind::Operation)
            .prop(Property::OpType, op.code())
            .children(Relation::Operand, operands)
            .id()
    }

    fn resolve(&self, ident: Option<Ident>) -> Option<&str> {
        ident
            .map(|i| self.names.resolve(i))
            .filter(|s| !s.is_empty())
    }
}

impl ObjectModel for ObjectGraph {
    fn contains(&self, obj: ObjectId) -> bool {
        self.objects.contains(obj)
    }

    fn kind(&self, obj: ObjectId) -> ObjectKind {
        self.objects[obj].kind
    }

    fn name(&self, obj: ObjectId) -> Option<&str> {
        self.resolve(self.objects[obj].name)
    }

    fn def_name(&self, obj: ObjectId) -> Option<&str> {
        self.resolve(self.objects[obj].def_name)
    }

    fn file(&self, obj: ObjectId) -> Option<&str> {
        self.resolve(self.objects[obj].file)
    }

    fn line(&self, obj: ObjectId) -> u32 {
        self.objects[obj].line
    }

    fn property(&self, obj: ObjectId, prop: Property) -> Option<i64> {
        self.objects[obj]
            .properties
            .iter()
            .find(|(p, _)| *p == prop)
            .map(|(_, v)| *v)
    }

    fn value(&self, obj: ObjectId) -> Option<&str> {
        self.objects[obj].value.as_deref()
    }

    fn iterate(&self, obj: ObjectId, rel: Relation) -> Vec<ObjectId> {
        self.objects[obj]
            .relations
            .iter()
            .find(|(r, _)| *r == rel)
            .map(|(_, targets)| targets.clone())
            .unwrap_or_default()
    }

    fn relations(&self, obj: ObjectId) -> Vec<Relation> {
        self.objects[obj]
            .relations
            .iter()
            .filter(|(_, targets)| !targets.is_empty())
            .map(|(r, _)| *r)
            .collect()
    }
}

/// Fluent setter chain for one object. Finish with [`ObjectBuilder::id`].
pub struct ObjectBuilder<'g> {
    graph: &'g mut ObjectGraph,
    id: ObjectId,
}

impl ObjectBuilder<'_> {
    /// Sets the instance name.
    pub fn name(self, name: &str) -> Self {
        self.graph.set_name(self.id, name);
        self
    }

    /// Sets the definition name.
    pub fn def_name(self, name: &str) -> Self {
        self.graph.set_def_name(self.id, name);
        self
    }

    /// Sets file and line.
    pub fn at(self, file: &str, line: u32) -> Self {
        self.graph.set_location(self.id, file, line);
        self
    }

    /// Sets an integer property.
    pub fn prop(self, prop: Property, value: i64) -> Self {
        self.graph.set_property(self.id, prop, value);
        self
    }

    /// Sets the constant value text.
    pub fn value(self, text: &str) -> Self {
        self.graph.set_value(self.id, text);
        self
    }

    /// Appends one target to a relation.
    pub fn child(self, rel: Relation, target: ObjectId) -> Self {
        self.graph.push(self.id, rel, target);
        self
    }

    /// Appends several targets to a relation.
    pub fn children(self, rel: Relation, targets: &[ObjectId]) -> Self {
        for &t in targets {
            self.graph.push(self.id, rel, t);
        }
        self
    }

    /// Sets the single target of a relation.
    pub fn handle(self, rel: Relation, target: ObjectId) -> Self {
        self.graph.set_handle(self.id, rel, target);
        self
    }

    /// Finishes the chain.
    pub fn id(self) -> ObjectId {
        self.id
    }
}

//! The read-only view of a design object graph.

use crate::ids::ObjectId;
use crate::kind::ObjectKind;
use crate::property::Property;
use crate::relation::Relation;

/// Read access to an externally owned design object graph.
///
/// Implementations never change while a translation runs. Handles passed in
/// must come from the same model; `contains` lets callers check foreign
/// handles before use.
pub trait ObjectModel {
    /// Returns `true` if `obj` belongs to this model.
    fn contains(&self, obj: ObjectId) -> bool;

    /// Kind of the object.
    fn kind(&self, obj: ObjectId) -> ObjectKind;

    /// Instance name (`vpiName`), if non-empty.
    fn name(&self, obj: ObjectId) -> Option<&str>;

    /// Definition name (`vpiDefName`), if non-empty. May carry a library
    /// prefix such as `work@`.
    fn def_name(&self, obj: ObjectId) -> Option<&str>;

    /// File the object was declared in.
    fn file(&self, obj: ObjectId) -> Option<&str>;

    /// Line the object was declared on, 0 if unknown.
    fn line(&self, obj: ObjectId) -> u32;

    /// Integer property, if set.
    fn property(&self, obj: ObjectId, prop: Property) -> Option<i64>;

    /// Constant value text, e.g. `UINT:5` or `8'hff`.
    fn value(&self, obj: ObjectId) -> Option<&str>;

    /// All targets of a relation, in native order.
    fn iterate(&self, obj: ObjectId, rel: Relation) -> Vec<ObjectId>;

    /// Target of a one-to-one relation.
    fn handle(&self, obj: ObjectId, rel: Relation) -> Option<ObjectId> {
        self.iterate(obj, rel).into_iter().next()
    }

    /// Every relation that has at least one target on this object.
    fn relations(&self, obj: ObjectId) -> Vec<Relation>;

    /// Name used for display: instance name, else definition name, else empty.
    fn display_name(&self, obj: ObjectId) -> &str {
        self.name(obj).or_else(|| self.def_name(obj)).unwrap_or("")
    }

    /// Non-zero integer property as a flag.
    fn flag(&self, obj: ObjectId, prop: Property) -> bool {
        self.property(obj, prop).is_some_and(|v| v != 0)
    }
}

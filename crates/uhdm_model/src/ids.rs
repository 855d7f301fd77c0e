//! Opaque handle for source objects.

use uhdm_common::define_id;

define_id!(
    /// Identity of an object in the design object model. Two handles are the
    /// same object exactly when they compare equal.
    ObjectId
);

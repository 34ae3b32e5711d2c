//! Field snapshots.

use crate::model::{AccessFlags, Annotation, ClassPointer, ConstantValue, FieldPointer, Type};

/// An immutable snapshot of one declared field.
#[derive(Clone, PartialEq, Debug)]
pub struct FieldModel {
    /// The field name.
    pub name: String,
    /// The field's modifier flags.
    pub flags: AccessFlags,
    /// The declared type, generic if a signature was present.
    pub ty: Type,
    /// The compile-time constant, if the field carries one.
    pub constant: Option<ConstantValue>,
    /// Annotations applied to the field.
    pub annotations: Vec<Annotation>,
    /// Position among the record components of the declaring class, or
    /// `None` when the field is not a record component.
    pub record_component: Option<usize>,
    /// The declaring class.
    pub owner: ClassPointer,
}

impl FieldModel {
    /// The erased descriptor of this field.
    #[must_use]
    pub fn descriptor(&self) -> String {
        self.ty.descriptor()
    }

    /// The persistent pointer identifying this field.
    #[must_use]
    pub fn pointer(&self) -> FieldPointer {
        self.owner.field(&self.name, self.descriptor())
    }
}

//! Type-parameter declarations.

use crate::model::{GenericOwner, GenericPointer, Type};

/// A declared type parameter of a class or method.
///
/// Bounds are split the way the signature grammar splits them: at most one
/// class bound plus any number of interface bounds. An absent class bound
/// means the parameter is bounded by `java/lang/Object`.
#[derive(Clone, PartialEq, Debug)]
pub struct GenericModel {
    /// The parameter name, unique within its owner.
    pub name: String,
    /// The class bound, if one was declared.
    pub class_bound: Option<Type>,
    /// The interface bounds, in declaration order.
    pub interface_bounds: Vec<Type>,
    /// The class or method declaring this parameter.
    pub owner: GenericOwner,
}

impl GenericModel {
    /// The persistent pointer identifying this parameter.
    #[must_use]
    pub fn pointer(&self) -> GenericPointer {
        GenericPointer::of(self.owner.clone(), &self.name)
    }

    /// Every bound in declaration order, class bound first.
    pub fn bounds(&self) -> impl Iterator<Item = &Type> {
        self.class_bound.iter().chain(self.interface_bounds.iter())
    }
}

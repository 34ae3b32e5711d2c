//! Method snapshots.

use crate::model::{
    AccessFlags, Annotation, AnnotationValue, ClassPointer, GenericModel, MethodPointer, Type,
};

/// An immutable snapshot of one declared method.
///
/// `parameter_types` and `parameter_names` are parallel sequences; linking
/// guarantees equal length, synthesizing `arg0..argN` names when the input
/// carried none.
#[derive(Clone, PartialEq, Debug)]
pub struct MethodModel {
    /// The method name, including `<init>` and `<clinit>`.
    pub name: String,
    /// The method's modifier flags.
    pub flags: AccessFlags,
    /// The return type; [`Type::Void`] for `void` methods.
    pub return_type: Type,
    /// Parameter types in declaration order.
    pub parameter_types: Vec<Type>,
    /// Parameter names, parallel to `parameter_types`.
    pub parameter_names: Vec<String>,
    /// Type parameters declared on the method.
    pub generics: Vec<GenericModel>,
    /// Declared `throws` types, class references or type variables.
    pub exceptions: Vec<Type>,
    /// Whether the method carries bytecode. True exactly when the method is
    /// neither `abstract` nor `native`, once verified.
    pub has_body: bool,
    /// The default value, when the method is an annotation-interface element
    /// with a default.
    pub annotation_default: Option<AnnotationValue>,
    /// Annotations applied to the method.
    pub annotations: Vec<Annotation>,
    /// The declaring class.
    pub owner: ClassPointer,
}

impl MethodModel {
    /// The erased descriptor of this method, for example
    /// `(ILjava/lang/String;)V`.
    #[must_use]
    pub fn descriptor(&self) -> String {
        let mut out = String::from("(");
        for parameter in &self.parameter_types {
            out.push_str(&parameter.descriptor());
        }
        out.push(')');
        out.push_str(&self.return_type.descriptor());
        out
    }

    /// The persistent pointer identifying this method.
    #[must_use]
    pub fn pointer(&self) -> MethodPointer {
        self.owner.method(&self.name, self.descriptor())
    }

    /// Whether this is an instance or class initializer.
    #[must_use]
    pub fn is_initializer(&self) -> bool {
        self.name == "<init>" || self.name == "<clinit>"
    }

    /// Whether this method takes part in instance method selection, which
    /// excludes initializers, private methods and static methods.
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        !self.is_initializer() && !self.flags.is_private() && !self.flags.is_static()
    }
}

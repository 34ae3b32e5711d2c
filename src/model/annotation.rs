//! Annotation values as recorded on classes, fields and methods.

use crate::model::{ClassPointer, Type};

/// A single annotation use, for example `@Deprecated(since = "9")`.
#[derive(Clone, PartialEq, Debug)]
pub struct Annotation {
    /// Whether the annotation is retained for runtime reflection.
    pub runtime_visible: bool,
    /// The annotation interface being applied.
    pub class: ClassPointer,
    /// The explicitly supplied element values.
    pub values: Vec<AnnotationEntry>,
}

/// One named element value inside an annotation.
#[derive(Clone, PartialEq, Debug)]
pub struct AnnotationEntry {
    /// The element name (`value` for the shorthand form).
    pub name: String,
    /// The supplied value.
    pub value: AnnotationValue,
}

/// An annotation element value.
///
/// The set mirrors the element-value tags of the class-file format; nested
/// annotations and arrays recurse.
#[derive(Clone, PartialEq, Debug)]
pub enum AnnotationValue {
    /// An `int`-family constant.
    Int(i32),
    /// A `long` constant.
    Long(i64),
    /// A `float` constant.
    Float(f32),
    /// A `double` constant.
    Double(f64),
    /// A `String` constant.
    String(String),
    /// A class literal, for example `String.class`.
    Class(Type),
    /// An enum constant, identified by its type and constant name.
    Enum {
        /// The enum class.
        class: ClassPointer,
        /// The constant's name.
        constant: String,
    },
    /// An array of element values.
    Array(Vec<AnnotationValue>),
    /// A nested annotation.
    Nested(Annotation),
}

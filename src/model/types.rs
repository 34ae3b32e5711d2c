//! The closed type vocabulary of the model.
//!
//! Every field type, parameter type and return type in a linked model is a
//! [`Type`]. The set is closed: primitives, class references (optionally with
//! generic arguments), arrays, type variables, and `void`. Class references
//! carry [`ClassPointer`]s rather than resolved entities, so types stay valid
//! across model snapshots.

use std::fmt;

use strum::{Display, EnumIter};

use crate::model::{ClassPointer, GenericPointer};

/// A JVM primitive value type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Primitive {
    /// 8-bit signed integer, descriptor `B`.
    Byte,
    /// 16-bit signed integer, descriptor `S`.
    Short,
    /// 32-bit signed integer, descriptor `I`.
    Int,
    /// 64-bit signed integer, descriptor `J`.
    Long,
    /// 32-bit IEEE 754 float, descriptor `F`.
    Float,
    /// 64-bit IEEE 754 float, descriptor `D`.
    Double,
    /// Truth value, descriptor `Z`.
    Boolean,
    /// UTF-16 code unit, descriptor `C`.
    Char,
}

impl Primitive {
    /// Maps a descriptor character to its primitive, or `None` if the
    /// character does not denote one.
    #[must_use]
    pub fn from_descriptor_char(c: char) -> Option<Primitive> {
        Some(match c {
            'B' => Primitive::Byte,
            'S' => Primitive::Short,
            'I' => Primitive::Int,
            'J' => Primitive::Long,
            'F' => Primitive::Float,
            'D' => Primitive::Double,
            'Z' => Primitive::Boolean,
            'C' => Primitive::Char,
            _ => return None,
        })
    }

    /// The descriptor character of this primitive.
    #[must_use]
    pub fn descriptor_char(self) -> char {
        match self {
            Primitive::Byte => 'B',
            Primitive::Short => 'S',
            Primitive::Int => 'I',
            Primitive::Long => 'J',
            Primitive::Float => 'F',
            Primitive::Double => 'D',
            Primitive::Boolean => 'Z',
            Primitive::Char => 'C',
        }
    }
}

/// A generic argument at a use site, carrying its variance.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum GenericArgument {
    /// An exact argument, `Foo<T>`.
    Invariant(Type),
    /// An upper-bounded wildcard, `Foo<? extends T>`.
    Covariant(Type),
    /// A lower-bounded wildcard, `Foo<? super T>`.
    Contravariant(Type),
    /// The unbounded wildcard, `Foo<?>`.
    Wildcard,
}

impl GenericArgument {
    /// The argument type, if the argument carries one.
    #[must_use]
    pub fn bound(&self) -> Option<&Type> {
        match self {
            GenericArgument::Invariant(ty)
            | GenericArgument::Covariant(ty)
            | GenericArgument::Contravariant(ty) => Some(ty),
            GenericArgument::Wildcard => None,
        }
    }
}

/// A reference to a class, optionally with generic arguments.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ClassType {
    /// The referenced class.
    pub pointer: ClassPointer,
    /// Generic arguments at this use site; empty for a raw use.
    pub arguments: Vec<GenericArgument>,
}

impl ClassType {
    /// A raw (argument-free) reference to the given class.
    #[must_use]
    pub fn raw(pointer: ClassPointer) -> Self {
        ClassType {
            pointer,
            arguments: Vec::new(),
        }
    }

    /// A raw reference to `java/lang/Object`.
    #[must_use]
    pub fn object() -> Self {
        ClassType::raw(ClassPointer::of("java/lang/Object"))
    }
}

/// A type as it appears in a linked model.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Type {
    /// The absence of a value, legal only as a return type.
    Void,
    /// A primitive value type.
    Primitive(Primitive),
    /// A class or interface reference.
    Class(ClassType),
    /// An array of a component type.
    Array(Box<Type>),
    /// A use of a type parameter visible at the use site.
    ///
    /// The erasure is the already-erased form of the parameter's leftmost
    /// bound, resolved when the variable is linked, so descriptors render
    /// without consulting a model.
    Variable {
        /// The type parameter being used.
        pointer: GenericPointer,
        /// What the variable erases to; `java/lang/Object` when unbounded.
        erasure: Box<Type>,
    },
}

impl Type {
    /// A raw class reference to `java/lang/Object`.
    #[must_use]
    pub fn object() -> Self {
        Type::Class(ClassType::object())
    }

    /// A use of an unbounded type parameter, erasing to `java/lang/Object`.
    #[must_use]
    pub fn unbounded_variable(pointer: GenericPointer) -> Self {
        Type::Variable {
            pointer,
            erasure: Box::new(Type::object()),
        }
    }

    /// Renders this type as an erased JVM descriptor.
    ///
    /// Generic arguments are dropped and type variables render their recorded
    /// erasure, so the result matches what a compiler would emit for the
    /// erased member.
    #[must_use]
    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        self.write_descriptor(&mut out);
        out
    }

    fn write_descriptor(&self, out: &mut String) {
        match self {
            Type::Void => out.push('V'),
            Type::Primitive(p) => out.push(p.descriptor_char()),
            Type::Class(class) => {
                out.push('L');
                out.push_str(class.pointer.binary_name());
                out.push(';');
            }
            Type::Array(component) => {
                out.push('[');
                component.write_descriptor(out);
            }
            Type::Variable { erasure, .. } => erasure.write_descriptor(out),
        }
    }

    /// Collects every class pointer referenced anywhere in this type,
    /// including inside generic arguments and array components.
    #[must_use]
    pub fn class_pointers(&self) -> Vec<ClassPointer> {
        let mut out = Vec::new();
        self.collect_class_pointers(&mut out);
        out
    }

    fn collect_class_pointers(&self, out: &mut Vec<ClassPointer>) {
        match self {
            Type::Void | Type::Primitive(_) | Type::Variable { .. } => {}
            Type::Class(class) => {
                out.push(class.pointer.clone());
                for argument in &class.arguments {
                    if let Some(bound) = argument.bound() {
                        bound.collect_class_pointers(out);
                    }
                }
            }
            Type::Array(component) => component.collect_class_pointers(out),
        }
    }

    /// Whether this type is `void` or an array of `void` at any depth.
    #[must_use]
    pub fn contains_void(&self) -> bool {
        match self {
            Type::Void => true,
            Type::Array(component) => component.contains_void(),
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Primitive(p) => write!(f, "{p}"),
            Type::Class(class) => f.write_str(class.pointer.binary_name()),
            Type::Array(component) => write!(f, "{component}[]"),
            Type::Variable { pointer, .. } => f.write_str(pointer.name()),
        }
    }
}

/// A compile-time constant attached to a field.
#[derive(Clone, PartialEq, Debug)]
pub enum ConstantValue {
    /// An `int`-family constant (`int`, `short`, `byte`, `char`, `boolean`).
    Int(i32),
    /// A `float` constant.
    Float(f32),
    /// A `long` constant.
    Long(i64),
    /// A `double` constant.
    Double(f64),
    /// A `String` constant.
    String(String),
}

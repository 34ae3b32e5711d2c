//! The generic-signature syntax tree.
//!
//! These types mirror the grammar of JVMS 4.7.9.1 one production per type.
//! They are purely syntactic: a [`ClassTypeSignature`] holds a path and a
//! suffix of nested simple names, not a resolved class. Resolution into model
//! types happens during linking.
//!
//! Every node implements [`std::fmt::Display`] and renders back to the exact
//! signature syntax it was parsed from.

use std::fmt;

use crate::model::{ObjectPath, Primitive};

/// A `JavaTypeSignature`: a primitive or a reference signature.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TypeSignature {
    /// A primitive type, `BaseType` in the grammar.
    Base(Primitive),
    /// A class, array or type-variable signature.
    Reference(ReferenceSignature),
}

/// A `ReferenceTypeSignature`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ReferenceSignature {
    /// `L...;` class type signature.
    Class(ClassTypeSignature),
    /// `[` followed by any type signature.
    Array(Box<TypeSignature>),
    /// `T<name>;` use of a type parameter.
    TypeVariable(String),
}

/// A `ClassTypeSignature`: a class reference with optional type arguments and
/// an optional chain of nested simple names.
///
/// `java/util/Map<TK;TV;>.Entry<TK;TV;>` parses into path `java/util/Map`,
/// two arguments, and one suffix entry `Entry` with two arguments.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ClassTypeSignature {
    /// The slash-separated outermost class name.
    pub path: ObjectPath,
    /// Type arguments of the outermost class, empty when raw.
    pub arguments: Vec<TypeArgument>,
    /// Nested simple names, outermost first.
    pub suffix: Vec<SimpleClassSignature>,
}

/// One `.name<args>` element of a class type signature's nested suffix.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SimpleClassSignature {
    /// The nested simple name.
    pub name: String,
    /// Type arguments at this nesting level, empty when raw.
    pub arguments: Vec<TypeArgument>,
}

/// A `TypeArgument` at a use site.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TypeArgument {
    /// The unbounded wildcard `*`.
    Wildcard,
    /// An exact argument.
    Invariant(ReferenceSignature),
    /// `+`: an upper-bounded wildcard.
    Covariant(ReferenceSignature),
    /// `-`: a lower-bounded wildcard.
    Contravariant(ReferenceSignature),
}

/// A declared `TypeParameter` with its bounds.
///
/// The class bound is syntactically mandatory but may be empty
/// (`T::Ljava/lang/Comparable;` declares only an interface bound).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeParameter {
    /// The parameter name.
    pub name: String,
    /// The class bound, absent when left empty.
    pub class_bound: Option<ReferenceSignature>,
    /// Interface bounds, in declaration order.
    pub interface_bounds: Vec<ReferenceSignature>,
}

/// A `ClassSignature`: type parameters, super class and superinterfaces.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ClassSignature {
    /// Type parameters declared on the class.
    pub type_parameters: Vec<TypeParameter>,
    /// The generic super class.
    pub super_class: ClassTypeSignature,
    /// The generic superinterfaces, in declaration order.
    pub interfaces: Vec<ClassTypeSignature>,
}

/// A `FieldSignature`: the generic type of a field.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FieldSignature {
    /// The field's reference type.
    pub ty: ReferenceSignature,
}

/// A `MethodSignature`: type parameters, parameters, return type and throws.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MethodSignature {
    /// Type parameters declared on the method.
    pub type_parameters: Vec<TypeParameter>,
    /// Parameter types, in declaration order.
    pub parameters: Vec<TypeSignature>,
    /// The return type.
    pub return_type: ReturnType,
    /// The `throws` clause, in declaration order.
    pub throws: Vec<ThrowsSignature>,
}

/// The `Result` production of a method signature.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ReturnType {
    /// `V`.
    Void,
    /// A value-typed return.
    Type(TypeSignature),
}

/// One `ThrowsSignature` element.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ThrowsSignature {
    /// `^L...;`
    Class(ClassTypeSignature),
    /// `^T<name>;`
    TypeVariable(String),
}

fn write_arguments(f: &mut fmt::Formatter<'_>, arguments: &[TypeArgument]) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }
    write!(f, "<")?;
    for argument in arguments {
        write!(f, "{argument}")?;
    }
    write!(f, ">")
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSignature::Base(primitive) => write!(f, "{}", primitive.descriptor_char()),
            TypeSignature::Reference(reference) => write!(f, "{reference}"),
        }
    }
}

impl fmt::Display for ReferenceSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceSignature::Class(class) => write!(f, "L{class};"),
            ReferenceSignature::Array(component) => write!(f, "[{component}"),
            ReferenceSignature::TypeVariable(name) => write!(f, "T{name};"),
        }
    }
}

impl fmt::Display for ClassTypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        write_arguments(f, &self.arguments)?;
        for simple in &self.suffix {
            write!(f, ".{}", simple.name)?;
            write_arguments(f, &simple.arguments)?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArgument::Wildcard => write!(f, "*"),
            TypeArgument::Invariant(reference) => write!(f, "{reference}"),
            TypeArgument::Covariant(reference) => write!(f, "+{reference}"),
            TypeArgument::Contravariant(reference) => write!(f, "-{reference}"),
        }
    }
}

impl fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        if let Some(class_bound) = &self.class_bound {
            write!(f, "{class_bound}")?;
        }
        for bound in &self.interface_bounds {
            write!(f, ":{bound}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ClassSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.type_parameters.is_empty() {
            write!(f, "<")?;
            for parameter in &self.type_parameters {
                write!(f, "{parameter}")?;
            }
            write!(f, ">")?;
        }
        write!(f, "L{};", self.super_class)?;
        for interface in &self.interfaces {
            write!(f, "L{interface};")?;
        }
        Ok(())
    }
}

impl fmt::Display for FieldSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.type_parameters.is_empty() {
            write!(f, "<")?;
            for parameter in &self.type_parameters {
                write!(f, "{parameter}")?;
            }
            write!(f, ">")?;
        }
        write!(f, "(")?;
        for parameter in &self.parameters {
            write!(f, "{parameter}")?;
        }
        write!(f, ")")?;
        match &self.return_type {
            ReturnType::Void => write!(f, "V")?,
            ReturnType::Type(ty) => write!(f, "{ty}")?,
        }
        for throws in &self.throws {
            match throws {
                ThrowsSignature::Class(class) => write!(f, "^L{class};")?,
                ThrowsSignature::TypeVariable(name) => write!(f, "^T{name};")?,
            }
        }
        Ok(())
    }
}

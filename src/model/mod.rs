//! The structural class model.
//!
//! This module holds the data half of the crate: immutable snapshots of
//! classes, fields, methods and type parameters ([`ClassModel`] and friends),
//! the closed [`Type`] vocabulary, and the persistent [`ClassPointer`] family
//! that references entities by name instead of by position.
//!
//! Everything here is a value: snapshots never mutate, pointers never dangle
//! (they fail resolution instead), and a [`Model`] grows only by linking a
//! new batch against it and receiving a fresh snapshot.
//!
//! # Example
//!
//! ```rust
//! use classlink::model::{AccessFlags, ClassModel, Model};
//!
//! let mut builder = Model::builder();
//! builder.add_class(
//!     ClassModel::builder("java/lang/Object")
//!         .flags(AccessFlags::PUBLIC)
//!         .build()?,
//! )?;
//! let model = builder.build();
//!
//! let pointer = model.class_pointer("java/lang/Object").unwrap();
//! assert!(model.get_class(&pointer)?.super_class().is_none());
//! # Ok::<(), classlink::Error>(())
//! ```

mod annotation;
mod class;
mod field;
pub mod flags;
mod generic;
mod method;
mod model;
mod path;
mod pointer;
mod types;

pub use annotation::{Annotation, AnnotationEntry, AnnotationValue};
pub use class::{ClassModel, ClassModelBuilder, EnclosingInfo, InnerClassModel, NestingInfo};
pub use field::FieldModel;
pub use flags::AccessFlags;
pub use generic::GenericModel;
pub use method::MethodModel;
pub use model::{Model, ModelBuilder};
pub use path::ObjectPath;
pub use pointer::{
    ClassPointer, FieldPointer, GenericOwner, GenericPointer, LoadSource, MethodPointer,
};
pub use types::{ClassType, ConstantValue, GenericArgument, Primitive, Type};

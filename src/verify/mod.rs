//! Legality verification of a linked model.
//!
//! Linking only guarantees that class-level references resolve; this module
//! judges whether the linked classes are actually legal. [`Verifier`] runs
//! the per-class checks (names, versions, modifier combinations, hierarchy
//! shape, sealing, overrides, accessibility), [`Accessors`] holds the
//! access-control and override predicates it builds on, and [`Hierarchy`]
//! answers supertype queries for callers with their own policies.
//!
//! Verification is tolerant of partial models: rules needing a class the
//! model does not contain are skipped for that reference, so a model without
//! the full runtime library still verifies cleanly.
//!
//! # Example
//!
//! ```rust
//! use classlink::model::{AccessFlags, ClassModel, Model};
//! use classlink::verify::verify_model;
//!
//! let mut builder = Model::builder();
//! builder.add_class(
//!     ClassModel::builder("java/lang/Object")
//!         .flags(AccessFlags::PUBLIC)
//!         .build()?,
//! )?;
//! builder.add_class(
//!     ClassModel::builder("com/example/Widget")
//!         .flags(AccessFlags::PUBLIC)
//!         .build()?,
//! )?;
//! verify_model(&builder.build())?;
//! # Ok::<(), classlink::Error>(())
//! ```

mod access;
mod descriptor;
mod hierarchy;
mod verifier;

pub use access::{
    is_binary_name, is_method_name, is_unqualified_name, package_of, Accessors,
};
pub use descriptor::{is_valid_field_descriptor, is_valid_method_descriptor};
pub use hierarchy::Hierarchy;
pub use verifier::{verify_all, verify_model, Verifier};

//! Curated re-exports for glob imports.
//!
//! Pulls the types that nearly every user of the crate touches into one
//! namespace. Specialized items (the signature grammar, the raw decoder
//! contract, the name predicates) stay in their modules.

pub use crate::loader::{decode_all, Linker, RawClass, UnlinkedBatch, UnlinkedClass};
pub use crate::model::{
    AccessFlags, ClassModel, ClassPointer, ClassType, FieldModel, FieldPointer, GenericPointer,
    MethodModel, MethodPointer, Model, Type,
};
pub use crate::verify::{verify_all, verify_model, Accessors, Hierarchy, Verifier};
pub use crate::{Error, FormatError, LinkError, Result, VerifyError};

//! Parsing of generic signature strings (JVMS 4.7.9.1).
//!
//! Class files carry generics as flat `Signature` attribute strings; this
//! module parses them into a typed syntax tree. The tree stays syntactic and
//! unresolved. Turning it into model [`crate::model::Type`]s, including
//! resolving nested-name suffixes against real classes, is the linker's job.
//!
//! # Example
//!
//! ```rust
//! use classlink::signature::{self, ReferenceSignature};
//!
//! let parsed = signature::parse_field_signature("Ljava/util/List<TE;>;")?;
//! let ReferenceSignature::Class(class) = &parsed.ty else { unreachable!() };
//! assert_eq!(class.path.binary_name(), "java/util/List");
//! # Ok::<(), classlink::LinkError>(())
//! ```

mod parser;
mod types;

pub use parser::{parse_class_signature, parse_field_signature, parse_method_signature};
pub use types::{
    ClassSignature, ClassTypeSignature, FieldSignature, MethodSignature, ReferenceSignature,
    ReturnType, SimpleClassSignature, ThrowsSignature, TypeArgument, TypeParameter, TypeSignature,
};

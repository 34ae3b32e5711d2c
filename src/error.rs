//! Error types for model construction, linking and verification.
//!
//! Failures are split into three closed, non-overlapping taxonomies, mirroring
//! the three phases a class goes through:
//!
//! - [`LinkError`] - reference resolution failures while turning unlinked
//!   records into a [`crate::model::Model`]
//! - [`FormatError`] - structural class-file legality violations (names,
//!   modifier combinations, descriptors, duplicate members)
//! - [`VerifyError`] - semantic legality violations that need the whole model
//!   to detect (overrides, sealing, accessibility)
//!
//! Every variant carries the offending entity (pointer, name, flags) as a
//! typed payload. The unifying [`Error`] enum additionally holds the four
//! pointer-lookup misses of [`crate::model::Model`], one per entity kind.

use thiserror::Error;

use crate::model::{
    AccessFlags, ClassPointer, FieldPointer, GenericPointer, LoadSource, MethodPointer, ObjectPath,
};

/// Failures raised while linking a batch of unlinked classes into a model.
///
/// Linking resolves textual name references against the batch being linked
/// and a base model; each variant identifies the reference that could not be
/// resolved and the load source of the class that contained it.
#[derive(Error, Debug)]
pub enum LinkError {
    /// Two classes with the same binary name were presented for linking, or a
    /// new class collides with one already present in the base model.
    #[error("duplicate class '{name}' (loaded from {load_source}, already present from {existing_source})")]
    DuplicateClass {
        /// Binary name both classes share.
        name: String,
        /// Load source of the class being linked.
        load_source: LoadSource,
        /// Load source of the class that was already known.
        existing_source: LoadSource,
    },

    /// A name-valued reference did not resolve in the batch or the base model.
    #[error("cannot resolve class '{name}' (referenced from {referrer})")]
    UnresolvedReference {
        /// The binary name that failed to resolve.
        name: String,
        /// Load source of the referring class.
        referrer: LoadSource,
    },

    /// An inner-class table entry violated the JVMS 4.7.6 shape rules.
    #[error("malformed inner-class table entry in {load_source}: {message}")]
    MalformedNestedEntry {
        /// Load source of the class carrying the table.
        load_source: LoadSource,
        /// What was wrong with the entry.
        message: String,
    },

    /// A generic signature string violated the JVMS 4.7.9.1 grammar.
    #[error("invalid signature '{signature}' at index {index}: {message}")]
    InvalidSignature {
        /// The complete signature string that was being parsed.
        signature: String,
        /// Byte index of the offending character (or end of input).
        index: usize,
        /// What the parser expected.
        message: String,
    },

    /// A name-valued reference was present but structurally unusable, for
    /// example an empty name or an enclosing-method name without a descriptor.
    #[error("malformed reference '{name}' in {load_source}: {message}")]
    MalformedReference {
        /// Load source of the referring class.
        load_source: LoadSource,
        /// The offending reference text.
        name: String,
        /// What was wrong with it.
        message: String,
    },
}

/// Structural class-file legality violations.
///
/// These are detectable from a single class (plus its descriptors) without
/// consulting the rest of the model.
#[derive(Error, Debug)]
pub enum FormatError {
    /// A class binary name is not a well-formed sequence of unqualified names.
    #[error("invalid class name '{name}'")]
    InvalidClassName {
        /// The offending name.
        name: String,
    },

    /// The recorded path of a class does not match its binary name.
    #[error("path '{path}' does not match the binary name of {class}")]
    PathMismatch {
        /// The class whose path is inconsistent.
        class: ClassPointer,
        /// The recorded path.
        path: ObjectPath,
    },

    /// The class-file major version lies outside the supported range.
    #[error("unsupported class-file version {major} for {class}")]
    UnsupportedVersion {
        /// The class carrying the version.
        class: ClassPointer,
        /// The major version number.
        major: u16,
    },

    /// An illegal combination of class-level modifier flags.
    #[error("illegal class flags {flags} on {class}: {message}")]
    InvalidClassFlags {
        /// The offending class.
        class: ClassPointer,
        /// The flags as found.
        flags: AccessFlags,
        /// Which rule was violated.
        message: String,
    },

    /// A class other than `java/lang/Object` has no resolved super class.
    #[error("class {class} has no super class")]
    MissingSuperClass {
        /// The class missing its super type.
        class: ClassPointer,
    },

    /// A direct superinterface reference does not denote an interface.
    #[error("{interface} implemented by {class} is not an interface")]
    InvalidInterface {
        /// The implementing class.
        class: ClassPointer,
        /// The reference that is not an interface.
        interface: ClassPointer,
    },

    /// A field or method name is not an unqualified name.
    #[error("invalid member name '{name}' in {class}")]
    InvalidMemberName {
        /// The declaring class.
        class: ClassPointer,
        /// The offending member name.
        name: String,
    },

    /// An illegal combination of field modifier flags.
    #[error("illegal field flags {flags} on {field}: {message}")]
    InvalidFieldFlags {
        /// The offending field.
        field: FieldPointer,
        /// The flags as found.
        flags: AccessFlags,
        /// Which rule was violated.
        message: String,
    },

    /// An illegal combination of method modifier flags.
    #[error("illegal method flags {flags} on {method}: {message}")]
    InvalidMethodFlags {
        /// The offending method.
        method: MethodPointer,
        /// The flags as found.
        flags: AccessFlags,
        /// Which rule was violated.
        message: String,
    },

    /// Two fields share a (name, descriptor) pair within one class.
    #[error("duplicate field {field}")]
    DuplicateField {
        /// Pointer identifying the duplicated field.
        field: FieldPointer,
    },

    /// Two methods share a (name, descriptor) pair within one class.
    #[error("duplicate method {method}")]
    DuplicateMethod {
        /// Pointer identifying the duplicated method.
        method: MethodPointer,
    },

    /// A method has a body it must not have, or lacks the body it needs.
    ///
    /// A method needs a body exactly when it is neither `abstract` nor
    /// `native`.
    #[error("method body presence mismatch for {method} (has_body = {has_body})")]
    MethodBodyMismatch {
        /// The offending method.
        method: MethodPointer,
        /// Whether the method had a body.
        has_body: bool,
    },

    /// A constructor or static initializer violates its special shape rules.
    #[error("malformed initializer {method}: {message}")]
    MalformedInitializer {
        /// The offending `<init>` or `<clinit>` method.
        method: MethodPointer,
        /// Which rule was violated.
        message: String,
    },

    /// A field or method descriptor string is not well-formed.
    #[error("invalid descriptor '{descriptor}' in {class}")]
    InvalidDescriptor {
        /// The declaring class.
        class: ClassPointer,
        /// The descriptor as found.
        descriptor: String,
    },
}

/// Semantic legality violations found by verifying a class against a model.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// A method overrides a `final` method declared in an ancestor class.
    #[error("method {method} overrides a final method")]
    FinalMethodOverride {
        /// The overriding method.
        method: MethodPointer,
    },

    /// A class extends a class that is declared `final`.
    #[error("{class} cannot extend final class {super_class}")]
    FinalSuperClass {
        /// The extending class.
        class: ClassPointer,
        /// The final super class.
        super_class: ClassPointer,
    },

    /// A class extends a sealed class without permission.
    #[error("{class} is not a permitted subclass of {super_class}")]
    SealedViolation {
        /// The extending class.
        class: ClassPointer,
        /// The sealed super class.
        super_class: ClassPointer,
    },

    /// A non-interface class names an interface as its super class.
    #[error("{class} cannot extend interface {super_class}")]
    SuperClassIsInterface {
        /// The extending class.
        class: ClassPointer,
        /// The interface used as a super class.
        super_class: ClassPointer,
    },

    /// An interface extends something other than `java/lang/Object`.
    #[error("interface {class} must extend java/lang/Object, not {super_class}")]
    InterfaceSuperClass {
        /// The offending interface.
        class: ClassPointer,
        /// Its recorded super class.
        super_class: ClassPointer,
    },

    /// A type referenced in a signature is not accessible from the class
    /// using it.
    #[error("{target} is not accessible from {class} ({context})")]
    InaccessibleType {
        /// The class using the type.
        class: ClassPointer,
        /// The inaccessible type.
        target: ClassPointer,
        /// Where the type was used (field type, parameter, super class, ...).
        context: String,
    },

    /// `void` was used where a value type is required.
    #[error("void type is not allowed in {class} ({context})")]
    VoidType {
        /// The class using the void type.
        class: ClassPointer,
        /// Where void appeared.
        context: String,
    },

    /// A type-parameter declaration carries an illegal name or bound.
    #[error("invalid type parameter {parameter}: {message}")]
    InvalidGenericBound {
        /// The offending type parameter.
        parameter: GenericPointer,
        /// Which rule was violated.
        message: String,
    },

    /// Parameter names are missing, duplicated or not unqualified.
    #[error("invalid parameter names of {method}: {message}")]
    InvalidParameterNames {
        /// The offending method.
        method: MethodPointer,
        /// Which rule was violated.
        message: String,
    },

    /// A recorded inner class does not agree with the inner-class info of the
    /// class it points to.
    #[error("inner class '{inner_name}' of {class} is inconsistent")]
    InnerClassMismatch {
        /// The outer class carrying the record.
        class: ClassPointer,
        /// The inner simple name in question.
        inner_name: String,
    },

    /// A member's declared owner pointer does not resolve back to the entity
    /// the model holds. Always an internal consistency bug, never
    /// user-correctable.
    #[error("pointer round-trip failed for {pointer}: {message}")]
    PointerMismatch {
        /// The pointer that failed the round trip.
        pointer: ClassPointer,
        /// What did not match.
        message: String,
    },
}

/// The generic error type covering every failure this library can return.
#[derive(Error, Debug)]
pub enum Error {
    /// A reference resolution failure during linking.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// A structural class-file legality violation.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A semantic verification failure.
    #[error(transparent)]
    Verify(#[from] VerifyError),

    /// A class pointer did not resolve in the model it was used with.
    #[error("failed to resolve {0} in the model")]
    InvalidClassPointer(ClassPointer),

    /// A method pointer did not resolve in the model it was used with.
    #[error("failed to resolve {0} in the model")]
    InvalidMethodPointer(MethodPointer),

    /// A field pointer did not resolve in the model it was used with.
    #[error("failed to resolve {0} in the model")]
    InvalidFieldPointer(FieldPointer),

    /// A generic pointer did not resolve in the model it was used with.
    #[error("failed to resolve {0} in the model")]
    InvalidGenericPointer(GenericPointer),
}

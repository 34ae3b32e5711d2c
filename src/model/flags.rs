//! Access flags and class-file version handling.
//!
//! [`AccessFlags`] is the raw `access_flags` bitset of a class, field or
//! method, with one named flag per JVMS-defined bit. Some bits carry two
//! meanings depending on context (`SUPER`/`SYNCHRONIZED`, `VOLATILE`/`BRIDGE`,
//! `TRANSIENT`/`VARARGS`); both names are defined and alias the same bit.
//!
//! The version helpers deal with the packed `minor << 16 | major` form the
//! model stores, matching the layout of the class-file header.

use std::fmt;

bitflags::bitflags! {
    /// Modifier and attribute flags of a class, field or method.
    ///
    /// Values are the JVMS `access_flags` constants. The bitset is kept raw:
    /// which combinations are legal for which entity is the verifier's
    /// business, not this type's.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
    pub struct AccessFlags: u32 {
        /// Declared `public`.
        const PUBLIC = 0x0001;
        /// Declared `private`.
        const PRIVATE = 0x0002;
        /// Declared `protected`.
        const PROTECTED = 0x0004;
        /// Declared `static`.
        const STATIC = 0x0008;
        /// Declared `final`.
        const FINAL = 0x0010;
        /// Class flag: treat superclass methods specially in `invokespecial`.
        /// Ignored by the model API.
        const SUPER = 0x0020;
        /// Method flag: declared `synchronized`. Same bit as [`Self::SUPER`].
        const SYNCHRONIZED = 0x0020;
        /// Field flag: declared `volatile`.
        const VOLATILE = 0x0040;
        /// Method flag: a compiler-generated bridge method. Same bit as
        /// [`Self::VOLATILE`].
        const BRIDGE = 0x0040;
        /// Field flag: declared `transient`.
        const TRANSIENT = 0x0080;
        /// Method flag: declared with a variable number of arguments. Same
        /// bit as [`Self::TRANSIENT`].
        const VARARGS = 0x0080;
        /// Declared `native`.
        const NATIVE = 0x0100;
        /// The class is an interface.
        const INTERFACE = 0x0200;
        /// Declared `abstract`.
        const ABSTRACT = 0x0400;
        /// Declared `strictfp`.
        const STRICT = 0x0800;
        /// Not present in source code; generated by a compiler.
        const SYNTHETIC = 0x1000;
        /// The class is an annotation interface.
        const ANNOTATION = 0x2000;
        /// The class or field is an enum constant or enum class.
        const ENUM = 0x4000;
        /// The class is a module descriptor.
        const MODULE = 0x8000;
    }
}

impl AccessFlags {
    /// Whether the `public` bit is set.
    #[must_use]
    pub fn is_public(self) -> bool {
        self.contains(AccessFlags::PUBLIC)
    }

    /// Whether the `private` bit is set.
    #[must_use]
    pub fn is_private(self) -> bool {
        self.contains(AccessFlags::PRIVATE)
    }

    /// Whether the `protected` bit is set.
    #[must_use]
    pub fn is_protected(self) -> bool {
        self.contains(AccessFlags::PROTECTED)
    }

    /// Whether the `static` bit is set.
    #[must_use]
    pub fn is_static(self) -> bool {
        self.contains(AccessFlags::STATIC)
    }

    /// Whether the `final` bit is set.
    #[must_use]
    pub fn is_final(self) -> bool {
        self.contains(AccessFlags::FINAL)
    }

    /// Whether the `interface` bit is set.
    #[must_use]
    pub fn is_interface(self) -> bool {
        self.contains(AccessFlags::INTERFACE)
    }

    /// Whether the `abstract` bit is set.
    #[must_use]
    pub fn is_abstract(self) -> bool {
        self.contains(AccessFlags::ABSTRACT)
    }

    /// Whether the `annotation` bit is set.
    #[must_use]
    pub fn is_annotation(self) -> bool {
        self.contains(AccessFlags::ANNOTATION)
    }

    /// Whether the `enum` bit is set.
    #[must_use]
    pub fn is_enum(self) -> bool {
        self.contains(AccessFlags::ENUM)
    }

    /// Whether the `module` bit is set.
    #[must_use]
    pub fn is_module(self) -> bool {
        self.contains(AccessFlags::MODULE)
    }

    /// Whether the `synthetic` bit is set.
    #[must_use]
    pub fn is_synthetic(self) -> bool {
        self.contains(AccessFlags::SYNTHETIC)
    }

    /// Whether the `native` bit is set.
    #[must_use]
    pub fn is_native(self) -> bool {
        self.contains(AccessFlags::NATIVE)
    }

    /// Whether the `synchronized` bit is set (method context).
    #[must_use]
    pub fn is_synchronized(self) -> bool {
        self.contains(AccessFlags::SYNCHRONIZED)
    }

    /// Whether the `volatile` bit is set (field context).
    #[must_use]
    pub fn is_volatile(self) -> bool {
        self.contains(AccessFlags::VOLATILE)
    }

    /// Whether the `transient` bit is set (field context).
    #[must_use]
    pub fn is_transient(self) -> bool {
        self.contains(AccessFlags::TRANSIENT)
    }

    /// Whether the `varargs` bit is set (method context).
    #[must_use]
    pub fn is_varargs(self) -> bool {
        self.contains(AccessFlags::VARARGS)
    }

    /// None of `public`, `private` or `protected`: package-private access.
    #[must_use]
    pub fn is_package_private(self) -> bool {
        !self.intersects(AccessFlags::PUBLIC | AccessFlags::PRIVATE | AccessFlags::PROTECTED)
    }

    /// Bits outside the 16 bits the JVMS defines. These are tolerated by the
    /// runtime and demoted to warnings by the verifier.
    #[must_use]
    pub fn unknown_bits(self) -> u32 {
        self.bits() & !0xFFFF
    }

    /// Whether any of the given bits are set, masked to the defined range.
    #[must_use]
    pub fn has_any(self, bits: AccessFlags) -> bool {
        (self.bits() & bits.bits() & 0xFFFF) != 0
    }
}

impl fmt::Display for AccessFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Both names of a shared bit are listed; the reader knows the context.
        static NAMES: &[(u32, &str)] = &[
            (0x0001, "public"),
            (0x0004, "protected"),
            (0x0002, "private"),
            (0x0400, "abstract"),
            (0x0008, "static"),
            (0x0010, "final"),
            (0x0080, "transient"),
            (0x0040, "volatile"),
            (0x0020, "synchronized"),
            (0x0100, "native"),
            (0x0800, "strictfp"),
            (0x0200, "interface"),
            (0x1000, "synthetic"),
            (0x2000, "annotation"),
            (0x4000, "enum"),
            (0x8000, "module"),
            (0x0020, "super"),
            (0x0040, "bridge"),
            (0x0080, "varargs"),
        ];

        write!(f, "(")?;
        let mut first = true;
        for (bit, name) in NAMES {
            if self.bits() & bit != 0 {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        write!(f, ")")
    }
}

/// Class-file version of Java 1.1, the oldest supported major version.
pub const OLDEST_VERSION: u16 = 45;
/// Class-file major version of Java 8.
pub const JAVA_8: u16 = 52;
/// Class-file major version of Java 11.
pub const JAVA_11: u16 = 55;
/// Class-file major version of Java 17.
pub const JAVA_17: u16 = 61;
/// Class-file major version of Java 21.
pub const JAVA_21: u16 = 65;
/// Class-file major version of Java 24, the newest supported version.
pub const JAVA_24: u16 = 68;
/// The newest supported class-file major version.
pub const LATEST_VERSION: u16 = JAVA_24;

/// Extracts the major version from a packed `minor << 16 | major` value.
#[must_use]
pub fn major_version(version: u32) -> u16 {
    (version & 0xFFFF) as u16
}

/// Extracts the minor version from a packed `minor << 16 | major` value.
#[must_use]
pub fn minor_version(version: u32) -> u16 {
    ((version >> 16) & 0xFFFF) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let flags = AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL;
        assert!(flags.is_public());
        assert!(flags.is_static());
        assert!(flags.is_final());
        assert!(!flags.is_private());
        assert!(!flags.is_package_private());
        assert!(AccessFlags::STATIC.is_package_private());
    }

    #[test]
    fn test_shared_bits() {
        assert_eq!(AccessFlags::SUPER, AccessFlags::SYNCHRONIZED);
        assert_eq!(AccessFlags::VOLATILE, AccessFlags::BRIDGE);
        assert_eq!(AccessFlags::TRANSIENT, AccessFlags::VARARGS);
    }

    #[test]
    fn test_unknown_bits() {
        let raw = AccessFlags::from_bits_retain(0x0001_0001);
        assert_eq!(raw.unknown_bits(), 0x0001_0000);
        assert_eq!(AccessFlags::PUBLIC.unknown_bits(), 0);
    }

    #[test]
    fn test_display() {
        let flags = AccessFlags::PUBLIC | AccessFlags::FINAL;
        assert_eq!(flags.to_string(), "(public, final)");
    }

    #[test]
    fn test_versions() {
        let packed = (3 << 16) | u32::from(JAVA_8);
        assert_eq!(major_version(packed), 52);
        assert_eq!(minor_version(packed), 3);
    }
}

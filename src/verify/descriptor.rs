//! Descriptor well-formedness checks (JVMS 4.3).

use crate::verify::access::is_binary_name;

/// Whether a string is a well-formed field descriptor: a primitive code, an
/// `L<binary-name>;` reference, or a `[`-prefixed array of either, consuming
/// the whole string.
#[must_use]
pub fn is_valid_field_descriptor(descriptor: &str) -> bool {
    field_descriptor_end(descriptor, 0) == Some(descriptor.len())
}

/// Whether a string is a well-formed method descriptor: `(` zero or more
/// field descriptors `)` followed by `V` or one field descriptor, consuming
/// the whole string.
#[must_use]
pub fn is_valid_method_descriptor(descriptor: &str) -> bool {
    let bytes = descriptor.as_bytes();
    if bytes.first() != Some(&b'(') {
        return false;
    }
    let mut offset = 1;
    loop {
        match bytes.get(offset) {
            Some(b')') => break,
            Some(_) => match field_descriptor_end(descriptor, offset) {
                Some(next) => offset = next,
                None => return false,
            },
            None => return false,
        }
    }
    offset += 1;
    if bytes.get(offset) == Some(&b'V') {
        return offset + 1 == descriptor.len();
    }
    field_descriptor_end(descriptor, offset) == Some(descriptor.len())
}

/// The offset just past the field descriptor starting at `offset`, or `None`
/// when it is malformed.
fn field_descriptor_end(descriptor: &str, offset: usize) -> Option<usize> {
    match descriptor.as_bytes().get(offset)? {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => Some(offset + 1),
        b'L' => {
            let end = descriptor[offset + 1..].find(';')? + offset + 1;
            if !is_binary_name(&descriptor[offset + 1..end]) {
                return None;
            }
            Some(end + 1)
        }
        b'[' => field_descriptor_end(descriptor, offset + 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_descriptors() {
        assert!(is_valid_field_descriptor("I"));
        assert!(is_valid_field_descriptor("[[I"));
        assert!(is_valid_field_descriptor("Ljava/lang/String;"));
        assert!(is_valid_field_descriptor("[Ljava/lang/String;"));

        assert!(!is_valid_field_descriptor(""));
        assert!(!is_valid_field_descriptor("V"));
        assert!(!is_valid_field_descriptor("Lfoo"));
        assert!(!is_valid_field_descriptor("L;"));
        assert!(!is_valid_field_descriptor("II"));
        assert!(!is_valid_field_descriptor("Ljava//lang;"));
        assert!(!is_valid_field_descriptor("["));
    }

    #[test]
    fn test_method_descriptors() {
        assert!(is_valid_method_descriptor("()V"));
        assert!(is_valid_method_descriptor("(Ljava/lang/String;I)V"));
        assert!(is_valid_method_descriptor("()[J"));
        assert!(is_valid_method_descriptor("([[Ljava/lang/String;)I"));

        assert!(!is_valid_method_descriptor(""));
        assert!(!is_valid_method_descriptor("()"));
        assert!(!is_valid_method_descriptor("(Ljava/lang/String;I)"));
        assert!(!is_valid_method_descriptor("(V)V"));
        assert!(!is_valid_method_descriptor("I"));
        assert!(!is_valid_method_descriptor("()VV"));
        assert!(!is_valid_method_descriptor("(Lfoo)V"));
    }
}

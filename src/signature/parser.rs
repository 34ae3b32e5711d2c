//! Recursive-descent parser for generic signature strings.

use crate::model::{ObjectPath, Primitive};
use crate::signature::{
    ClassSignature, ClassTypeSignature, FieldSignature, MethodSignature, ReferenceSignature,
    ReturnType, SimpleClassSignature, ThrowsSignature, TypeArgument, TypeParameter, TypeSignature,
};
use crate::LinkError;

/// Parses a field signature, for example `Ljava/util/List<TT;>;`.
///
/// # Errors
///
/// [`LinkError::InvalidSignature`] with the byte index of the first offending
/// character.
pub fn parse_field_signature(input: &str) -> Result<FieldSignature, LinkError> {
    let mut parser = Parser::new(input);
    let ty = parser.reference_signature()?;
    parser.expect_end()?;
    Ok(FieldSignature { ty })
}

/// Parses a method signature, for example `<T:Ljava/lang/Object;>(TT;)V`.
///
/// # Errors
///
/// [`LinkError::InvalidSignature`] with the byte index of the first offending
/// character.
pub fn parse_method_signature(input: &str) -> Result<MethodSignature, LinkError> {
    let mut parser = Parser::new(input);
    let type_parameters = parser.type_parameters()?;
    parser.consume(b'(', "expected '(' at the start of method parameters")?;

    let mut parameters = Vec::new();
    while parser.peek() != Some(b')') {
        parameters.push(parser.type_signature()?);
    }
    parser.consume(b')', "expected ')' at the end of method parameters")?;

    let return_type = if parser.peek() == Some(b'V') {
        parser.advance();
        ReturnType::Void
    } else {
        ReturnType::Type(parser.type_signature()?)
    };

    let mut throws = Vec::new();
    while parser.peek() == Some(b'^') {
        parser.advance();
        match parser.peek() {
            Some(b'L') => {
                parser.advance();
                throws.push(ThrowsSignature::Class(parser.class_type_signature()?));
            }
            Some(b'T') => {
                parser.advance();
                throws.push(ThrowsSignature::TypeVariable(parser.type_variable()?));
            }
            _ => {
                return Err(parser.error("expected 'L' or 'T' after '^' in throws clause"));
            }
        }
    }
    parser.expect_end()?;

    Ok(MethodSignature {
        type_parameters,
        parameters,
        return_type,
        throws,
    })
}

/// Parses a class signature, for example
/// `<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Collection<TE;>;`.
///
/// # Errors
///
/// [`LinkError::InvalidSignature`] with the byte index of the first offending
/// character.
pub fn parse_class_signature(input: &str) -> Result<ClassSignature, LinkError> {
    let mut parser = Parser::new(input);
    let type_parameters = parser.type_parameters()?;
    parser.consume(b'L', "expected 'L' at the start of the super class")?;
    let super_class = parser.class_type_signature()?;
    let mut interfaces = Vec::new();
    while !parser.at_end() {
        parser.consume(b'L', "expected 'L' at the start of a superinterface")?;
        interfaces.push(parser.class_type_signature()?);
    }
    Ok(ClassSignature {
        type_parameters,
        super_class,
        interfaces,
    })
}

/// Byte cursor over a signature string.
///
/// All grammar terminators are ASCII, so slicing the original string at byte
/// positions is always valid.
struct Parser<'a> {
    input: &'a str,
    index: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser { input, index: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.index).copied()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn at_end(&self) -> bool {
        self.index >= self.input.len()
    }

    fn error(&self, message: &str) -> LinkError {
        LinkError::InvalidSignature {
            signature: self.input.to_string(),
            index: self.index,
            message: message.to_string(),
        }
    }

    fn next(&mut self, message: &str) -> Result<u8, LinkError> {
        let byte = self.peek().ok_or_else(|| self.error(message))?;
        self.advance();
        Ok(byte)
    }

    fn consume(&mut self, expected: u8, message: &str) -> Result<(), LinkError> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn expect_end(&self) -> Result<(), LinkError> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("unexpected characters at the end of the signature"))
        }
    }

    /// An identifier runs until one of the terminators `. ; [ / < > :`.
    fn identifier(&mut self) -> Result<String, LinkError> {
        let start = self.index;
        while let Some(byte) = self.peek() {
            if matches!(byte, b'.' | b';' | b'[' | b'/' | b'<' | b'>' | b':') {
                break;
            }
            self.advance();
        }
        if self.index == start {
            return Err(self.error("expected an identifier"));
        }
        Ok(self.input[start..self.index].to_string())
    }

    /// The identifier and closing `;` of a `T<name>;` variable, after the `T`.
    fn type_variable(&mut self) -> Result<String, LinkError> {
        let name = self.identifier()?;
        self.consume(b';', "expected ';' after type variable")?;
        Ok(name)
    }

    fn type_signature(&mut self) -> Result<TypeSignature, LinkError> {
        match self.peek() {
            Some(byte) => match Primitive::from_descriptor_char(byte as char) {
                Some(primitive) => {
                    self.advance();
                    Ok(TypeSignature::Base(primitive))
                }
                None => Ok(TypeSignature::Reference(self.reference_signature()?)),
            },
            None => Err(self.error("unexpected end of input, expected a type signature")),
        }
    }

    fn reference_signature(&mut self) -> Result<ReferenceSignature, LinkError> {
        match self.next("unexpected end of input, expected a reference signature")? {
            b'L' => Ok(ReferenceSignature::Class(self.class_type_signature()?)),
            b'[' => Ok(ReferenceSignature::Array(Box::new(self.type_signature()?))),
            b'T' => Ok(ReferenceSignature::TypeVariable(self.type_variable()?)),
            _ => {
                self.index -= 1;
                Err(self.error("expected 'L', '[' or 'T'"))
            }
        }
    }

    /// Everything of a class type signature after its leading `L`.
    fn class_type_signature(&mut self) -> Result<ClassTypeSignature, LinkError> {
        let mut segments = vec![self.identifier()?];
        while self.peek() == Some(b'/') {
            self.advance();
            segments.push(self.identifier()?);
        }
        let arguments = self.type_arguments()?;

        let mut suffix = Vec::new();
        while self.peek() == Some(b'.') {
            self.advance();
            let name = self.identifier()?;
            let arguments = self.type_arguments()?;
            suffix.push(SimpleClassSignature { name, arguments });
        }

        self.consume(b';', "expected ';' at the end of class type signature")?;
        Ok(ClassTypeSignature {
            path: ObjectPath::new(segments),
            arguments,
            suffix,
        })
    }

    fn type_arguments(&mut self) -> Result<Vec<TypeArgument>, LinkError> {
        if self.peek() != Some(b'<') {
            return Ok(Vec::new());
        }
        self.advance();
        let mut arguments = Vec::new();
        while matches!(self.peek(), Some(b'+' | b'-' | b'*' | b'[' | b'L' | b'T')) {
            arguments.push(self.type_argument()?);
        }
        self.consume(b'>', "expected '>' at the end of type arguments")?;
        Ok(arguments)
    }

    fn type_argument(&mut self) -> Result<TypeArgument, LinkError> {
        match self.peek() {
            Some(b'+') => {
                self.advance();
                Ok(TypeArgument::Covariant(self.reference_signature()?))
            }
            Some(b'-') => {
                self.advance();
                Ok(TypeArgument::Contravariant(self.reference_signature()?))
            }
            Some(b'*') => {
                self.advance();
                Ok(TypeArgument::Wildcard)
            }
            _ => Ok(TypeArgument::Invariant(self.reference_signature()?)),
        }
    }

    fn type_parameters(&mut self) -> Result<Vec<TypeParameter>, LinkError> {
        if self.peek() != Some(b'<') {
            return Ok(Vec::new());
        }
        self.advance();

        let mut parameters = Vec::new();
        loop {
            if self.peek() == Some(b'>') {
                self.advance();
                break;
            }
            if self.at_end() {
                return Err(self.error("unterminated type parameter list"));
            }
            let name = self.identifier()?;
            self.consume(b':', "expected ':' after type parameter name")?;

            // The class bound may be left empty.
            let class_bound = if matches!(self.peek(), Some(b'L' | b'[' | b'T')) {
                Some(self.reference_signature()?)
            } else {
                None
            };

            let mut interface_bounds = Vec::new();
            while self.peek() == Some(b':') {
                self.advance();
                if matches!(self.peek(), Some(b'L' | b'[' | b'T')) {
                    interface_bounds.push(self.reference_signature()?);
                }
            }

            parameters.push(TypeParameter {
                name,
                class_bound,
                interface_bounds,
            });
        }
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_field_signature() {
        let parsed = parse_field_signature("Ljava/util/List<TE;>;").unwrap();
        let ReferenceSignature::Class(class) = &parsed.ty else {
            panic!("expected a class signature");
        };
        assert_eq!(class.path.binary_name(), "java/util/List");
        assert_eq!(
            class.arguments,
            vec![TypeArgument::Invariant(ReferenceSignature::TypeVariable(
                "E".to_string()
            ))]
        );
        assert_eq!(parsed.to_string(), "Ljava/util/List<TE;>;");
    }

    #[test]
    fn test_list_of_string_field_signature() {
        let parsed = parse_field_signature("Ljava/util/List<Ljava/lang/String;>;").unwrap();
        let ReferenceSignature::Class(class) = &parsed.ty else {
            panic!("expected a class signature");
        };
        let segments: Vec<&str> = class.path.iter().collect();
        assert_eq!(segments, ["java", "util", "List"]);
        assert!(class.suffix.is_empty());
        let [TypeArgument::Invariant(ReferenceSignature::Class(argument))] =
            class.arguments.as_slice()
        else {
            panic!("expected one invariant class argument");
        };
        assert_eq!(argument.path.binary_name(), "java/lang/String");
    }

    #[test]
    fn test_nested_suffix() {
        let parsed = parse_field_signature("Ljava/util/Map<TK;TV;>.Entry<TK;TV;>;").unwrap();
        let ReferenceSignature::Class(class) = &parsed.ty else {
            panic!("expected a class signature");
        };
        assert_eq!(class.path.binary_name(), "java/util/Map");
        assert_eq!(class.suffix.len(), 1);
        assert_eq!(class.suffix[0].name, "Entry");
        assert_eq!(class.suffix[0].arguments.len(), 2);
        assert_eq!(parsed.to_string(), "Ljava/util/Map<TK;TV;>.Entry<TK;TV;>;");
    }

    #[test]
    fn test_wildcards_and_variance() {
        let parsed =
            parse_field_signature("Ljava/util/Map<+Ljava/lang/Number;-TE;*>;").unwrap();
        let ReferenceSignature::Class(class) = &parsed.ty else {
            panic!("expected a class signature");
        };
        assert!(matches!(class.arguments[0], TypeArgument::Covariant(_)));
        assert!(matches!(class.arguments[1], TypeArgument::Contravariant(_)));
        assert!(matches!(class.arguments[2], TypeArgument::Wildcard));
    }

    #[test]
    fn test_array_of_generic() {
        let parsed = parse_field_signature("[Ljava/util/List<TE;>;").unwrap();
        let ReferenceSignature::Array(component) = &parsed.ty else {
            panic!("expected an array signature");
        };
        assert!(matches!(
            component.as_ref(),
            TypeSignature::Reference(ReferenceSignature::Class(_))
        ));
        assert_eq!(parsed.to_string(), "[Ljava/util/List<TE;>;");
    }

    #[test]
    fn test_method_signature() {
        let input = "<T:Ljava/lang/Object;>(TT;I)Ljava/util/List<TT;>;^Ljava/io/IOException;^TX;";
        let parsed = parse_method_signature(input).unwrap();
        assert_eq!(parsed.type_parameters.len(), 1);
        assert_eq!(parsed.type_parameters[0].name, "T");
        assert_eq!(parsed.parameters.len(), 2);
        assert!(matches!(parsed.return_type, ReturnType::Type(_)));
        assert_eq!(parsed.throws.len(), 2);
        assert!(matches!(parsed.throws[1], ThrowsSignature::TypeVariable(ref name) if name == "X"));
        assert_eq!(parsed.to_string(), input);
    }

    #[test]
    fn test_class_signature() {
        let input = "<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Collection<TE;>;";
        let parsed = parse_class_signature(input).unwrap();
        assert_eq!(parsed.type_parameters.len(), 1);
        assert_eq!(parsed.super_class.path.binary_name(), "java/lang/Object");
        assert_eq!(parsed.interfaces.len(), 1);
        assert_eq!(parsed.to_string(), input);
    }

    #[test]
    fn test_empty_class_bound() {
        let parsed = parse_class_signature(
            "<T::Ljava/lang/Comparable<TT;>;>Ljava/lang/Object;",
        )
        .unwrap();
        let parameter = &parsed.type_parameters[0];
        assert!(parameter.class_bound.is_none());
        assert_eq!(parameter.interface_bounds.len(), 1);
    }

    #[test]
    fn test_error_carries_position() {
        let err = parse_field_signature("Ljava/util/List<TE;>").unwrap_err();
        let LinkError::InvalidSignature {
            signature, index, ..
        } = err
        else {
            panic!("expected an invalid-signature error");
        };
        assert_eq!(signature, "Ljava/util/List<TE;>");
        assert_eq!(index, 20);
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!(parse_field_signature("Ljava/lang/String;X").is_err());
        assert!(parse_method_signature("()Vextra").is_err());
    }

    #[test]
    fn test_missing_parameter_colon_rejected() {
        assert!(parse_class_signature("<TLjava/lang/Object;>Ljava/lang/Object;").is_err());
    }
}

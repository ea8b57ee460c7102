use async_graphql::dynamic::{InputObject, InputValue, TypeRef};

use crate::db::ScalarKind;

/// Map a canonical column kind to the GraphQL type of its output field.
///
/// Nullability is not part of the consumed column metadata, so every output
/// field is nullable.
pub fn scalar_type_ref(kind: ScalarKind) -> TypeRef {
    match kind {
        ScalarKind::Integer => TypeRef::named(TypeRef::INT),
        ScalarKind::Float => TypeRef::named(TypeRef::FLOAT),
        ScalarKind::String => TypeRef::named(TypeRef::STRING),
        ScalarKind::Boolean => TypeRef::named(TypeRef::BOOLEAN),
    }
}

/// Name of the comparison input object for a column kind.
pub fn comparison_type_name(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Integer => "integer_comparison",
        ScalarKind::Float => "float_comparison",
        ScalarKind::String => "string_comparison",
        ScalarKind::Boolean => "boolean_comparison",
    }
}

/// Build the comparison input object for a column kind: the six advertised
/// operators as fields, each typed to the kind (`_in` as a list of it).
pub fn comparison_input_object(kind: ScalarKind) -> InputObject {
    let scalar = match kind {
        ScalarKind::Integer => TypeRef::INT,
        ScalarKind::Float => TypeRef::FLOAT,
        ScalarKind::String => TypeRef::STRING,
        ScalarKind::Boolean => TypeRef::BOOLEAN,
    };

    let mut object = InputObject::new(comparison_type_name(kind));
    for op in crate::sql::COMPARISON_OPS {
        object = if op == "_in" {
            object.field(InputValue::new(op, TypeRef::named_list(scalar)))
        } else {
            object.field(InputValue::new(op, TypeRef::named(scalar)))
        };
    }
    object
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_type_refs_are_nullable() {
        assert_eq!(scalar_type_ref(ScalarKind::Integer).to_string(), "Int");
        assert_eq!(scalar_type_ref(ScalarKind::Float).to_string(), "Float");
        assert_eq!(scalar_type_ref(ScalarKind::String).to_string(), "String");
        assert_eq!(scalar_type_ref(ScalarKind::Boolean).to_string(), "Boolean");
    }

    #[test]
    fn test_comparison_type_names() {
        assert_eq!(
            comparison_type_name(ScalarKind::Integer),
            "integer_comparison"
        );
        assert_eq!(
            comparison_type_name(ScalarKind::String),
            "string_comparison"
        );
    }

    #[test]
    fn test_comparison_object_exposes_six_operators() {
        let object = comparison_input_object(ScalarKind::Integer);
        assert_eq!(object.type_name(), "integer_comparison");
    }
}

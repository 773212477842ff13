//! Poolable object types and their schema-conformance check

use crate::types::{FieldKind, FieldSchema, Schema, TypeDescriptor};

use serde::{Deserialize, Serialize};

/// Borrowed value of a single object field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    String(&'a str),
    Integer(i64),
    Boolean(bool),
}

impl FieldValue<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::String(_) => FieldKind::String,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Boolean(_) => FieldKind::Boolean,
        }
    }
}

/// An object that can live in a pool.
///
/// Equality is structural: two objects are the same pool member when all of
/// their fields are equal.
pub trait PoolObject: Clone + PartialEq {
    /// Name of the type this object declares itself to be
    fn type_name(&self) -> &'static str;

    /// Field names and values, in declaration order
    fn field_values(&self) -> Vec<(&'static str, FieldValue<'_>)>;

    /// Whether this object structurally matches `descriptor`: same type name,
    /// same field names in the same order, same field kinds.
    fn conforms_to(&self, descriptor: &TypeDescriptor) -> bool {
        if self.type_name() != descriptor.name() {
            return false;
        }

        let values = self.field_values();
        values.len() == descriptor.fields().len()
            && values
                .iter()
                .zip(descriptor.fields())
                .all(|((name, value), field)| *name == field.name && value.kind() == field.kind)
    }
}

const GARMENT_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("size", FieldKind::String),
    FieldSchema::new("color", FieldKind::String),
];

macro_rules! garment {
    ($(#[$meta:meta])* $name:ident => $type_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name {
            pub size: String,
            pub color: String,
        }

        impl $name {
            pub fn new(size: impl Into<String>, color: impl Into<String>) -> Self {
                Self {
                    size: size.into(),
                    color: color.into(),
                }
            }
        }

        impl Schema for $name {
            const TYPE_NAME: &'static str = $type_name;
            const FIELDS: &'static [FieldSchema] = GARMENT_FIELDS;
        }

        impl PoolObject for $name {
            fn type_name(&self) -> &'static str {
                Self::TYPE_NAME
            }

            fn field_values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
                vec![
                    ("size", FieldValue::String(&self.size)),
                    ("color", FieldValue::String(&self.color)),
                ]
            }
        }

        impl From<$name> for Object {
            fn from(value: $name) -> Self {
                Object::$name(value)
            }
        }
    };
}

garment! {
    /// A shirt, registered as `shirt`
    Shirt => "shirt"
}

garment! {
    /// A pair of pants, registered as `pants`
    Pants => "pants"
}

garment! {
    /// A sock, registered as `sock`
    Sock => "sock"
}

/// Any of the built-in object types.
///
/// Serialized with an internal `type` tag:
/// `{"type": "shirt", "size": "M", "color": "blue"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Object {
    Shirt(Shirt),
    Pants(Pants),
    Sock(Sock),
}

impl PoolObject for Object {
    fn type_name(&self) -> &'static str {
        match self {
            Object::Shirt(inner) => inner.type_name(),
            Object::Pants(inner) => inner.type_name(),
            Object::Sock(inner) => inner.type_name(),
        }
    }

    fn field_values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        match self {
            Object::Shirt(inner) => inner.field_values(),
            Object::Pants(inner) => inner.field_values(),
            Object::Sock(inner) => inner.field_values(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Ticket {
        number: i64,
    }

    impl PoolObject for Ticket {
        fn type_name(&self) -> &'static str {
            "shirt"
        }

        fn field_values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
            vec![("number", FieldValue::Integer(self.number))]
        }
    }

    #[test]
    fn test_garment_conforms_to_own_descriptor() {
        let shirt = Shirt::new("M", "blue");
        assert!(shirt.conforms_to(&TypeDescriptor::of::<Shirt>()));
        assert!(!shirt.conforms_to(&TypeDescriptor::of::<Sock>()));
    }

    #[test]
    fn test_tagged_object_delegates_to_variant() {
        let object = Object::from(Pants::new("L", "black"));
        assert_eq!(object.type_name(), "pants");
        assert!(object.conforms_to(&TypeDescriptor::of::<Pants>()));
        assert!(!object.conforms_to(&TypeDescriptor::of::<Shirt>()));
    }

    #[test]
    fn test_same_name_different_fields_does_not_conform() {
        let ticket = Ticket { number: 7 };
        assert!(!ticket.conforms_to(&TypeDescriptor::of::<Shirt>()));
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Object::from(Shirt::new("M", "blue")), Object::from(Shirt::new("M", "blue")));
        assert_ne!(Object::from(Shirt::new("M", "blue")), Object::from(Sock::new("M", "blue")));
    }

    #[test]
    fn test_json_uses_type_tag() {
        let object: Object =
            serde_json::from_str(r#"{"type":"sock","size":"S","color":"green"}"#).unwrap();
        assert_eq!(object, Object::Sock(Sock::new("S", "green")));

        let json = serde_json::to_value(Object::from(Shirt::new("M", "blue"))).unwrap();
        assert_eq!(json["type"], "shirt");
        assert_eq!(json["size"], "M");

        let unknown = serde_json::from_str::<Object>(r#"{"type":"hat","size":"S","color":"red"}"#);
        assert!(unknown.is_err());
    }
}

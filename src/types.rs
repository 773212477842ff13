//! Type registry: the fixed set of object types pools can be created for

use crate::errors::{PoolError, PoolResult};
use crate::object::{Pants, Shirt, Sock};

use std::collections::HashMap;
use std::fmt;

/// Primitive kind of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
}

/// A named, typed field of a [`TypeDescriptor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSchema {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Compile-time schema of an object type.
///
/// Implemented once per concrete object type; the registry builds its
/// descriptors from these constants.
pub trait Schema {
    /// Name the type is registered under
    const TYPE_NAME: &'static str;

    /// Declared fields, in declaration order
    const FIELDS: &'static [FieldSchema];
}

/// Identifier plus field schema of a registered type.
///
/// Descriptors point at static data, so they are cheap to copy into every
/// pool bound to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: &'static str,
    fields: &'static [FieldSchema],
}

impl TypeDescriptor {
    pub const fn new(name: &'static str, fields: &'static [FieldSchema]) -> Self {
        Self { name, fields }
    }

    /// Descriptor for a type implementing [`Schema`]
    pub const fn of<T: Schema>() -> Self {
        Self::new(T::TYPE_NAME, T::FIELDS)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [FieldSchema] {
        self.fields
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Mapping from type name to [`TypeDescriptor`].
///
/// Built once at startup with the consuming [`TypeRegistry::register`]
/// builder, then only read.
///
/// # Examples
///
/// ```
/// use esox_randompool::TypeRegistry;
///
/// let registry = TypeRegistry::with_builtin_types();
/// assert_eq!(registry.lookup("shirt").unwrap().name(), "shirt");
/// assert!(registry.lookup("hat").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<&'static str, TypeDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in garment types: `shirt`, `pants` and `sock`
    pub fn with_builtin_types() -> Self {
        Self::new()
            .register::<Shirt>()
            .register::<Pants>()
            .register::<Sock>()
    }

    /// Add a type. Registering the same name twice keeps the later schema.
    pub fn register<T: Schema>(mut self) -> Self {
        self.types.insert(T::TYPE_NAME, TypeDescriptor::of::<T>());
        self
    }

    /// Resolve a type name
    pub fn lookup(&self, name: &str) -> PoolResult<TypeDescriptor> {
        self.types
            .get(name)
            .copied()
            .ok_or_else(|| PoolError::UnknownType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered type names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

//! Static field manifests.
//!
//! A [`Schema`] is the ordered list of fields for one record type. The order
//! drives both bulk loading and export, so it is also the key order of every
//! JSON file written for that type.

use crate::value::FieldType;

/// What a field holds
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A single coerced value
    Value(FieldType),
    /// An exclusively owned sub-record
    Nested(&'static Schema),
}

/// One entry in a field manifest
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn value(name: &'static str, ty: FieldType) -> Self {
        Field {
            name,
            kind: FieldKind::Value(ty),
        }
    }

    pub const fn nested(name: &'static str, schema: &'static Schema) -> Self {
        Field {
            name,
            kind: FieldKind::Nested(schema),
        }
    }

    /// Declared type for value fields, `None` for nested records
    pub fn field_type(&self) -> Option<FieldType> {
        match self.kind {
            FieldKind::Value(ty) => Some(ty),
            FieldKind::Nested(_) => None,
        }
    }
}

/// Field manifest for a record type
#[derive(Debug)]
pub struct Schema {
    /// Record type name, used in error messages and logs
    pub name: &'static str,
    /// Integer field naming the exported file, if the type is exported
    /// standalone. Fields of sub-records are addressed with dots.
    pub id_field: Option<&'static str>,
    pub fields: &'static [Field],
}

impl Schema {
    /// Position and definition of a field by name
    pub fn field(&self, name: &str) -> Option<(usize, &'static Field)> {
        self.fields.iter().enumerate().find(|(_, f)| f.name == name)
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

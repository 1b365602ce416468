//! Field resolution: mapping external keys onto an entity's fields
//!
//! A [`FieldResolver`] is a table of function pointers, one entry per declared
//! field, built once per entity type. A key either resolves to an exposed
//! field slot or it does not.

use crate::core::field::{FieldKind, FieldValue};
use std::collections::{BTreeMap, HashMap};

/// Reads a field as a dynamic value
pub type Getter<T> = fn(&T) -> FieldValue;

/// Writes a dynamic value into a field, handing it back on a kind mismatch
pub type Setter<T> = fn(&mut T, FieldValue) -> Result<(), FieldValue>;

/// Whether callers may read and write a field through the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Exposed,
    Internal,
}

/// Declaration of one entity field
pub struct FieldDescriptor<T> {
    name: &'static str,
    alias: Option<&'static str>,
    kind: FieldKind,
    access: Option<(Getter<T>, Setter<T>)>,
}

impl<T> FieldDescriptor<T> {
    /// An externally mutable field
    pub fn exposed(
        name: &'static str,
        alias: Option<&'static str>,
        kind: FieldKind,
        get: Getter<T>,
        set: Setter<T>,
    ) -> Self {
        Self {
            name,
            alias,
            kind,
            access: Some((get, set)),
        }
    }

    /// A field that is recorded but never resolvable
    pub fn internal(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            alias: None,
            kind,
            access: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn alias(&self) -> Option<&'static str> {
        self.alias
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn visibility(&self) -> Visibility {
        if self.access.is_some() {
            Visibility::Exposed
        } else {
            Visibility::Internal
        }
    }
}

/// A settable handle on a resolved, exposed field
pub struct FieldSlot<'a, T> {
    name: &'static str,
    kind: FieldKind,
    get: Getter<T>,
    set: Setter<T>,
    _resolver: std::marker::PhantomData<&'a FieldResolver<T>>,
}

impl<T> FieldSlot<'_, T> {
    /// Runtime field name (not the alias)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of the field
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn get(&self, entity: &T) -> FieldValue {
        (self.get)(entity)
    }

    /// Assign `value`; on a kind mismatch the entity is left as it was and
    /// the rejected value is returned.
    pub fn set(&self, entity: &mut T, value: FieldValue) -> Result<(), FieldValue> {
        (self.set)(entity, value)
    }
}

/// Per-type lookup table from external key to field
pub struct FieldResolver<T> {
    fields: Vec<FieldDescriptor<T>>,
    by_alias: HashMap<&'static str, usize>,
    by_name: HashMap<&'static str, usize>,
}

impl<T> FieldResolver<T> {
    pub fn new(fields: Vec<FieldDescriptor<T>>) -> Self {
        let mut by_alias = HashMap::new();
        let mut by_name = HashMap::new();
        for (index, field) in fields.iter().enumerate() {
            if let Some(alias) = field.alias {
                by_alias.insert(alias, index);
            }
            by_name.insert(field.name, index);
        }

        Self {
            fields,
            by_alias,
            by_name,
        }
    }

    /// Resolve `key` to an exposed field.
    ///
    /// Aliases win over field names. Internal fields never resolve.
    pub fn resolve(&self, key: &str) -> Option<FieldSlot<'_, T>> {
        let index = self
            .by_alias
            .get(key)
            .or_else(|| self.by_name.get(key))?;
        let field = &self.fields[*index];
        let (get, set) = field.access?;

        Some(FieldSlot {
            name: field.name,
            kind: field.kind,
            get,
            set,
            _resolver: std::marker::PhantomData,
        })
    }

    /// All declared fields, in declaration order
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Current value of every exposed field, keyed by field name
    pub fn snapshot(&self, entity: &T) -> BTreeMap<&'static str, FieldValue> {
        self.fields
            .iter()
            .filter_map(|field| field.access.map(|(get, _)| (field.name, get(entity))))
            .collect()
    }
}

/// Types that declare a field table for resolution and patching
///
/// Usually implemented through [`impl_patchable!`](crate::impl_patchable).
pub trait Patchable: Clone + Send + Sync + 'static {
    fn field_resolver() -> &'static FieldResolver<Self>;
}

//! Macros for reducing boilerplate when declaring patchable entities
//!
//! These macros generate the field table the patch engine and the rule sets
//! run against, so entity types never hand-write key-to-field mapping.

/// Implement [`Patchable`](crate::core::resolver::Patchable) for a struct
///
/// Internal fields are listed with their [`FieldKind`](crate::core::field::FieldKind)
/// name and are never resolvable. Exposed fields are listed with their Rust
/// type (any [`FieldType`](crate::core::field::FieldType)) and an optional
/// external alias after `=>`. The table is built on first use and shared for
/// the rest of the process.
///
/// # Example
///
/// ```rust,ignore
/// use catalog::prelude::*;
///
/// #[derive(Debug, Clone)]
/// pub struct Coupon {
///     pub id: EntityId,
///     pub code: String,
///     pub discount_rate: f64,
/// }
///
/// impl_patchable!(Coupon,
///     internal { id: Integer },
///     exposed {
///         code: String,
///         discount_rate: f64 => "discountRate",
///     }
/// );
///
/// // "discountRate" and "discount_rate" both reach the same field, "id" reaches nothing
/// let resolver = Coupon::field_resolver();
/// assert!(resolver.resolve("discountRate").is_some());
/// assert!(resolver.resolve("id").is_none());
/// ```
#[macro_export]
macro_rules! impl_patchable {
    (
        $type:ty,
        internal { $( $internal_field:ident : $internal_kind:ident ),* $(,)? },
        exposed {
            $( $field:ident : $field_type:ty $( => $alias:literal )? ),* $(,)?
        }
    ) => {
        impl $crate::core::resolver::Patchable for $type {
            fn field_resolver() -> &'static $crate::core::resolver::FieldResolver<Self> {
                static RESOLVER: ::std::sync::OnceLock<$crate::core::resolver::FieldResolver<$type>> =
                    ::std::sync::OnceLock::new();

                RESOLVER.get_or_init(|| {
                    $crate::core::resolver::FieldResolver::new(vec![
                        $(
                            $crate::core::resolver::FieldDescriptor::internal(
                                stringify!($internal_field),
                                $crate::core::field::FieldKind::$internal_kind,
                            ),
                        )*
                        $(
                            $crate::core::resolver::FieldDescriptor::exposed(
                                stringify!($field),
                                None::<&'static str> $( .or(Some($alias)) )?,
                                <$field_type as $crate::core::field::FieldType>::KIND,
                                |entity: &$type| {
                                    <$field_type as $crate::core::field::FieldType>::to_value(&entity.$field)
                                },
                                |entity: &mut $type, value: $crate::core::field::FieldValue| {
                                    entity.$field =
                                        <$field_type as $crate::core::field::FieldType>::from_value(value)?;
                                    Ok(())
                                },
                            ),
                        )*
                    ])
                })
            }
        }
    };
}

//! `define_port_error!`, the declaration macro behind every adapter error in
//! this crate.
//!
//! The users directory, the receipt reporter, both stores, the quote source
//! and the settlement pipeline itself describe their failures as enums of
//! struct variants, each with a display message. The macro derives
//! `thiserror::Error` for them and adds one snake_case constructor per
//! variant. Constructor arguments take `impl Into<T>`, which keeps adapter
//! call sites short:
//!
//! ```rust,ignore
//! return Err(UserDirectoryError::status(503_u16, "maintenance"));
//! ```
//!
//! Variants always carry fields; a failure without context is not useful in
//! a log line.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_args $variant () () $( $field : $ty, )*);
    };

    (@ctor_args $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_args $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_args
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

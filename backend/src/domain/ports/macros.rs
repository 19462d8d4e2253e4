//! `define_port_error!` generates port error enums with `thiserror` messages
//! and one snake_case constructor per variant.
//!
//! Every field of a generated constructor accepts `impl Into<FieldType>`, so
//! adapters can pass `&str` or `String` interchangeably.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!(
                        "Construct [`", stringify!($name), "::", stringify!($variant), "`]."
                    )]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;

//! Generates the failure enums shared by port traits.
//!
//! Each variant gets a `thiserror` message, a snake-case constructor whose
//! parameters accept anything convertible into the field types, and a stable
//! `kind()` label for structured logs.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*

            /// Snake-case variant label, stable across message changes.
            #[must_use]
            pub fn kind(&self) -> &'static str {
                ::paste::paste! {
                    match self {
                        $( Self::$variant { .. } => stringify!([<$variant:snake>]), )*
                    }
                }
            }
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ConnectError {
            Refused { host: String, port: u16 } => "refused by {host}:{port}",
            TimedOut { message: String } => "timed out: {message}",
            Closed => "closed",
        }
    }

    #[test]
    fn constructors_convert_each_field() {
        let err = ConnectError::refused("db.internal", 5432_u16);
        assert_eq!(err.to_string(), "refused by db.internal:5432");
    }

    #[test]
    fn unit_variants_take_no_arguments() {
        assert_eq!(ConnectError::closed(), ConnectError::Closed);
    }

    #[test]
    fn kinds_are_snake_case_variant_names() {
        assert_eq!(ConnectError::timed_out("slow").kind(), "timed_out");
        assert_eq!(ConnectError::Closed.kind(), "closed");
    }
}

//! Declares port error enums together with snake-case constructors.
//!
//! Every variant carries named fields; each constructor takes those fields in
//! declaration order as `impl Into<_>` so call sites can pass `&str` for
//! `String` fields.

macro_rules! define_port_error {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = "Build a `" $variant "` error."]
                    $vis fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Failures of a fictional lookup used to exercise the macro.
        pub enum LookupError {
            /// Single string field.
            Refused { message: String } => "lookup refused: {message}",
            /// Mixed field types.
            Stalled { code: String, attempts: u32 } => "lookup stalled on {code} after {attempts}",
        }
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = LookupError::refused("socket closed");
        assert_eq!(
            err,
            LookupError::Refused {
                message: "socket closed".to_owned()
            }
        );
        assert_eq!(err.to_string(), "lookup refused: socket closed");
    }

    #[test]
    fn constructors_take_fields_in_declaration_order() {
        let err = LookupError::stalled("C3CW", 3_u32);
        assert_eq!(
            err,
            LookupError::Stalled {
                code: "C3CW".to_owned(),
                attempts: 3
            }
        );
        assert_eq!(err.to_string(), "lookup stalled on C3CW after 3");
    }
}

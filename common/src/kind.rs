//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Mode of a payment."]
///     enum PaymentMode {
///         #[doc = "Paid in cash."]
///         Cash = 1,
///
///         #[doc = "Paid by a cheque."]
///         Cheque = 2,
///     }
/// }
///
/// assert_eq!(PaymentMode::Cheque.u8(), 2);
/// assert_eq!(PaymentMode::Cash.to_string(), "CASH");
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(v: u8) -> Result<Self, Self::Error> {
                match v {
                    $(
                        v if Self::$variant.u8() == v => Ok(Self::$variant),
                    )*
                    v => Err(v),
                }
            }
        }

        #[cfg(feature = "postgres")]
        impl<'a> $crate::private::postgres_types::FromSql<'a> for $name {
            $crate::private::postgres_types::accepts!(INT2);

            fn from_sql(
                ty: &$crate::private::postgres_types::Type,
                raw: &[u8],
            ) -> Result<
                $name,
                Box<dyn ::std::error::Error
                    + ::core::marker::Sync
                    + ::core::marker::Send>,
            > {
                Self::try_from(u8::try_from(i16::from_sql(ty, raw)?)?)
                    .map_err(|v| ::std::format!(
                        "invalid `{}` value: {v}",
                        ::core::stringify!($name),
                    ).into())
            }
        }

        #[cfg(feature = "postgres")]
        impl $crate::private::postgres_types::ToSql for $name {
            $crate::private::postgres_types::accepts!(INT2);
            $crate::private::postgres_types::to_sql_checked!();

            fn to_sql(
                &self,
                ty: &$crate::private::postgres_types::Type,
                w: &mut $crate::private::postgres_types::private::BytesMut,
            ) -> Result<
                $crate::private::postgres_types::IsNull,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                i16::from(self.u8()).to_sql(ty, w)
            }
        }
    };
}

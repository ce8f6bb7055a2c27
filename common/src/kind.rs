//! [`define_kind!`] macro.

/// Defines a fieldless kind enum with explicit [`u8`] discriminants.
///
/// The kind is stored as `INT2` in Postgres, and is rendered in
/// `SCREAMING_SNAKE_CASE` everywhere else.
///
/// ```rust
/// common::define_kind! {
///     #[doc = "Supply kind."]
///     enum Supply {
///         #[doc = "Single-phase supply."]
///         Single = 1,
///
///         #[doc = "Three-phase supply."]
///         Three = 3,
///     }
/// }
///
/// assert_eq!(Supply::from_u8(3), Some(Supply::Three));
/// assert_eq!(Supply::Single.to_string(), "SINGLE");
/// ```
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:literal
            ),+ $(,)?
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
        #[cfg_attr(
            feature = "serde",
            derive(
                $crate::private::serde::Deserialize,
                $crate::private::serde::Serialize,
            ),
            serde(rename_all = "SCREAMING_SNAKE_CASE"),
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                #[doc = $variant_doc]
                $variant = $value,
            )+
        }

        impl $name {
            #[doc = ::core::concat!(
                "All the [`", ::core::stringify!($name), "`] variants, ",
                "in declaration order.",
            )]
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the discriminant of this kind.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }

            /// Looks up the kind by its discriminant.
            #[must_use]
            pub const fn from_u8(v: u8) -> Option<Self> {
                match v {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        #[cfg(feature = "postgres")]
        impl<'a> $crate::private::postgres_types::FromSql<'a> for $name {
            $crate::private::postgres_types::accepts!(INT2);

            fn from_sql(
                ty: &$crate::private::postgres_types::Type,
                raw: &[u8],
            ) -> Result<Self, $crate::private::SqlError> {
                let v = u8::try_from(i16::from_sql(ty, raw)?)?;
                Self::from_u8(v).ok_or_else(|| {
                    ::std::format!(
                        "unknown `{}` discriminant: {v}",
                        ::core::stringify!($name),
                    )
                    .into()
                })
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
                $crate::private::SqlError,
            > {
                i16::from(self.u8()).to_sql(ty, w)
            }
        }
    };
}

#[cfg(test)]
mod spec {
    crate::define_kind! {
        #[doc = "Test kind."]
        enum Light {
            #[doc = "Red."]
            Red = 1,

            #[doc = "Green."]
            Green = 4,
        }
    }

    #[test]
    fn looks_up_by_discriminant() {
        assert_eq!(Light::from_u8(4), Some(Light::Green));
        assert_eq!(Light::from_u8(2), None);
        assert_eq!(Light::Red.u8(), 1);
    }

    #[test]
    fn lists_variants_in_order() {
        assert_eq!(Light::ALL, [Light::Red, Light::Green]);
    }

    #[test]
    fn renders_screaming_case() {
        assert_eq!(Light::Green.to_string(), "GREEN");
        assert_eq!("RED".parse::<Light>().ok(), Some(Light::Red));
    }
}

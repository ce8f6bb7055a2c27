//! [`Money`]-related definitions.

use std::{fmt, ops, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] amount in Polish złoty.
    #[must_use]
    pub const fn pln(amount: Decimal) -> Self {
        Self {
            amount,
            currency: Currency::Pln,
        }
    }

    /// Rounds this [`Money`] to whole minor units, halves away from zero.
    #[must_use]
    pub fn round(self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                2,
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        }
    }
}

impl ops::Add for Money {
    type Output = Self;

    /// Adds two amounts of the same [`Currency`].
    ///
    /// # Panics
    ///
    /// If currencies differ.
    fn add(self, rhs: Self) -> Self::Output {
        assert_eq!(self.currency, rhs.currency, "`Currency` mismatch");
        Self {
            amount: self.amount + rhs.amount,
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{}{currency}", amount.normalize())
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Polish złoty."]
        Pln = 1,

        #[doc = "Euro."]
        Eur = 2,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45PLN").unwrap(),
            Money::pln(decimal("123.45")),
        );
        assert_eq!(
            Money::from_str("99EUR").unwrap(),
            Money {
                amount: decimal("99"),
                currency: Currency::Eur,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Pl").is_err());
        assert!(Money::from_str("123.45USD").is_err());
        assert!(Money::from_str("zł").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::pln(decimal("120")).to_string(), "120PLN");
        assert_eq!(Money::pln(decimal("120.00")).to_string(), "120PLN");
        assert_eq!(Money::pln(decimal("32.50")).to_string(), "32.5PLN");
        assert_eq!(
            Money {
                amount: decimal("0.99"),
                currency: Currency::Eur,
            }
            .to_string(),
            "0.99EUR",
        );
    }

    #[test]
    fn rounds_to_minor_units() {
        assert_eq!(
            Money::pln(decimal("10.005")).round(),
            Money::pln(decimal("10.01")),
        );
        assert_eq!(
            Money::pln(decimal("1.234")).round(),
            Money::pln(decimal("1.23")),
        );
    }

    #[test]
    fn adds_same_currency() {
        assert_eq!(
            Money::pln(decimal("1.5")) + Money::pln(decimal("2")),
            Money::pln(decimal("3.5")),
        );
    }
}

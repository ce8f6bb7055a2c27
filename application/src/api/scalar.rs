//! Shared GraphQL scalars and the [`Via`] codec.

use std::{fmt, marker::PhantomData, str::FromStr};

use derive_more::{AsRef, Display, From, Into};
use juniper::{
    GraphQLScalar, GraphQLType, InputValue, ParseScalarResult,
    ParseScalarValue, ScalarToken, ScalarValue, Value,
};

/// Codec of string-based GraphQL scalars, for `#[graphql(with = ..)]`.
///
/// Scalars are written with the [`Display`] impl of the `As` type, and read
/// with its [`FromStr`] impl followed by the [`TryFrom`] conversion of the
/// target type, so domain validation applies to the API inputs.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Writes the provided value as a string scalar.
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::scalar(value.as_ref().to_string())
    }

    /// Reads the target type out of a string scalar.
    ///
    /// # Errors
    ///
    /// If the input is not a string, or fails to parse or convert.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or("scalar");
        let Some(s) = input.as_string_value() else {
            return Err(format!("`{name}` must be a string, got: {input}"));
        };
        let parsed = s
            .parse::<As>()
            .map_err(|e| format!("Invalid `{name}` \"{s}\": {e}"))?;
        T::try_from(parsed).map_err(|e| format!("Invalid `{name}`: {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a string.
    ///
    /// # Errors
    ///
    /// If the token is not a string one.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

/// Exact decimal number, represented as a string like `"12.5"`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = Via::<rust_decimal::Decimal>)]
pub struct Decimal(rust_decimal::Decimal);

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue};

    use super::{Decimal, Via};

    #[test]
    fn parses_decimal_from_string() {
        let input =
            InputValue::<DefaultScalarValue>::scalar("12.50".to_owned());

        let parsed: Decimal =
            Via::<rust_decimal::Decimal>::from_input(&input).unwrap();

        assert_eq!(parsed.0, rust_decimal::Decimal::new(125, 1));
    }

    #[test]
    fn rejects_non_string_decimal() {
        let input = InputValue::<DefaultScalarValue>::scalar(12);

        let parsed =
            Via::<rust_decimal::Decimal>::from_input::<Decimal, _>(&input);

        assert!(parsed.is_err());
    }
}

//! [`DateTimeOf`] definitions.

use std::{cmp::Ordering, fmt, marker::PhantomData, str::FromStr};

use derive_more::{Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{
    format_description::well_known::Rfc3339, OffsetDateTime, UtcOffset,
};

#[cfg(feature = "postgres")]
use crate::private::SqlError;

/// Untagged [`DateTimeOf`].
pub type DateTime = DateTimeOf;

/// UTC date and time with microsecond precision, tagged with the event it
/// describes.
///
/// Tags prevent mixing up, for example, creation and modification moments
/// of the same entity. Use [`DateTimeOf::coerce()`] to retag explicitly.
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Moment in UTC.
    utc: OffsetDateTime,

    /// Tag of the event.
    of: PhantomData<fn() -> Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Returns the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self::truncated(OffsetDateTime::now_utc())
    }

    /// Returns the calendar date of this moment in `YYYY-MM-DD` format.
    #[must_use]
    pub fn date_stamp(&self) -> String {
        self.utc.date().to_string()
    }

    /// Retags this moment.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            utc: self.utc,
            of: PhantomData,
        }
    }

    /// Converts the provided [`OffsetDateTime`] to UTC, dropping its
    /// sub-microsecond part.
    fn truncated(dt: OffsetDateTime) -> Self {
        let utc = dt.to_offset(UtcOffset::UTC);
        let nanos = utc.nanosecond() - utc.nanosecond() % 1_000;
        Self {
            utc: utc.replace_nanosecond(nanos).unwrap_or(utc),
            of: PhantomData,
        }
    }
}

impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}

impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.utc == other.utc
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}

impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc.cmp(&other.utc)
    }
}

impl<Of: ?Sized> fmt::Debug for DateTimeOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Formats as [RFC 3339].
///
/// [RFC 3339]: https://tools.ietf.org/html/rfc3339
impl<Of: ?Sized> fmt::Display for DateTimeOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.utc.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// Parses [RFC 3339] with any offset.
///
/// [RFC 3339]: https://tools.ietf.org/html/rfc3339
impl<Of: ?Sized> FromStr for DateTimeOf<Of> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(s, &Rfc3339)
            .map(Self::truncated)
            .map_err(ParseError)
    }
}

/// Error of parsing a [`DateTimeOf`] out of a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("not an RFC 3339 date and time: {_0}")]
pub struct ParseError(time::error::Parse);

impl<Of: ?Sized> From<OffsetDateTime> for DateTimeOf<Of> {
    fn from(dt: OffsetDateTime) -> Self {
        Self::truncated(dt)
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.utc
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> FromSql<'_> for DateTimeOf<Of> {
    accepts!(TIMESTAMPTZ);

    fn from_sql(ty: &Type, raw: &[u8]) -> Result<Self, SqlError> {
        OffsetDateTime::from_sql(ty, raw).map(Self::truncated)
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> ToSql for DateTimeOf<Of> {
    accepts!(TIMESTAMPTZ);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, SqlError> {
        self.utc.to_sql(ty, w)
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Date and time in [RFC 3339] format with microsecond precision.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[graphql_scalar(with = Self, parse_token(String))]
    type DateTime = crate::DateTime;

    impl DateTime {
        fn to_output<S: ScalarValue>(dt: &DateTime) -> Value<S> {
            Value::scalar(dt.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            let s = input.as_string_value().ok_or_else(|| {
                format!("`DateTime` must be a string, got: {input}")
            })?;
            s.parse().map_err(|e| format!("Invalid `DateTime`: {e}"))
        }
    }
}

#[cfg(test)]
mod spec {
    use super::DateTime;

    #[test]
    fn date_stamp_is_iso_calendar_date() {
        let dt: DateTime = "2024-03-07T23:15:00+02:00".parse().unwrap();

        assert_eq!(dt.date_stamp(), "2024-03-07");
    }

    #[test]
    fn parsing_normalizes_to_utc() {
        let dt: DateTime = "2024-03-07T01:15:00+02:00".parse().unwrap();

        assert_eq!(dt.to_string(), "2024-03-06T23:15:00Z");
        assert_eq!(dt.date_stamp(), "2024-03-06");
    }

    #[test]
    fn truncates_to_microseconds() {
        let precise: DateTime =
            "2024-03-07T01:15:00.123456789Z".parse().unwrap();
        let micros: DateTime = "2024-03-07T01:15:00.123456Z".parse().unwrap();

        assert_eq!(precise, micros);
    }

    #[test]
    fn rejects_garbage() {
        assert!("yesterday".parse::<DateTime>().is_err());
    }
}

//! Date and time utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{cmp::Ordering, fmt, marker::PhantomData, str::FromStr};

use derive_more::{Debug, Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{
    format_description::well_known::{Iso8601, Rfc3339},
    UtcOffset,
};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Creates a new [`DateTime`] representing the current date and time.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn now() -> Self {
        let inner = time::OffsetDateTime::now_utc();
        Self {
            _of: PhantomData,
            inner: inner
                .replace_microsecond(inner.microsecond())
                .expect("infallible"),
        }
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(E::Parse)?
            .try_into()
            .map_err(E::ComponentRange)
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Returns the calendar [`Date`] of this [`DateTime`] in UTC.
    #[must_use]
    pub fn date(&self) -> Date {
        Date(self.inner.date())
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] or [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string.
    Parse(time::error::Parse),

    /// Parsed value has an out of range component.
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> fmt::Display for DateTimeOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = time::error::ComponentRange;

    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        dt.to_offset(UtcOffset::UTC)
            .replace_microsecond(dt.microsecond())
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> FromSql<'_> for DateTimeOf<Of> {
    accepts!(TIMESTAMPTZ);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::OffsetDateTime::from_sql(ty, raw)?
            .try_into()
            .map_err(Box::from)
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
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.inner.to_sql(ty, w)
    }
}

/// Calendar date without a time zone.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Date(time::Date);

impl Date {
    /// Creates a new [`Date`] out of its calendar components.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the components is out of range.
    pub fn from_calendar_date(
        year: i32,
        month: u8,
        day: u8,
    ) -> Result<Self, ParseError> {
        let month = time::Month::try_from(month)
            .map_err(ParseError::ComponentRange)?;
        time::Date::from_calendar_date(year, month, day)
            .map(Self)
            .map_err(ParseError::ComponentRange)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.0.to_calendar_date();
        write!(f, "{year:04}-{:02}-{day:02}", u8::from(month))
    }
}

impl FromStr for Date {
    type Err = ParseError;

    /// Parses a [`Date`] out of an [ISO 8601] calendar date
    /// (`YYYY-MM-DD`).
    ///
    /// [ISO 8601]: https://en.wikipedia.org/wiki/ISO_8601
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, &Iso8601::DATE)
            .map(Self)
            .map_err(ParseError::Parse)
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Date, DateTime};

    #[test]
    fn parses_calendar_date() {
        assert_eq!(
            Date::from_str("2020-10-04").unwrap(),
            Date::from_calendar_date(2020, 10, 4).unwrap(),
        );

        assert!(Date::from_str("2020-13-04").is_err());
        assert!(Date::from_str("04.10.2020").is_err());
        assert!(Date::from_calendar_date(2021, 2, 29).is_err());
    }

    #[test]
    fn displays_calendar_date() {
        assert_eq!(
            Date::from_calendar_date(2020, 1, 9).unwrap().to_string(),
            "2020-01-09",
        );
    }

    #[test]
    fn rfc3339_round_trip() {
        let dt = DateTime::from_rfc3339("2020-10-04T08:40:00Z").unwrap();

        assert_eq!(dt.to_rfc3339(), "2020-10-04T08:40:00Z");
        assert_eq!(dt.date(), Date::from_calendar_date(2020, 10, 4).unwrap());
    }
}

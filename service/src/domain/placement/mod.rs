//! [`Placement`] definitions.

pub mod charge;
pub mod save;

use std::str::FromStr as _;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, Error, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::receipt;
#[cfg(doc)]
use crate::domain::Receipt;

pub use self::charge::{AmountInWords, Charge};

/// Advertisement placement: a single line item of a [`Receipt`] describing
/// a paper and edition the advertisement is published in.
#[derive(Clone, Debug)]
pub struct Placement {
    /// ID of this [`Placement`].
    pub id: Id,

    /// ID of the [`Receipt`] this [`Placement`] belongs to.
    pub receipt_id: receipt::Id,

    /// [`PaperName`] of this [`Placement`].
    pub paper: PaperName,

    /// [`Caption`] of this [`Placement`].
    pub caption: Caption,

    /// [`Edition`]s of the paper this [`Placement`] is published in.
    pub edition: Edition,

    /// Base [`Rate`] of this [`Placement`].
    pub rate: Rate,

    /// [`Extra`] lines or words of this [`Placement`], if any.
    pub extra: Option<Extra>,

    /// [`Charge`] derived from the [`Rate`] and [`Extra`] of this
    /// [`Placement`].
    pub charge: Charge,

    /// [`DateTime`] when this [`Placement`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Placement`] was modified the last time.
    pub updated_at: ModificationDateTime,
}

impl Placement {
    /// Returns the [`ExtraUnits`] of this [`Placement`], if any.
    #[must_use]
    pub fn extra_units(&self) -> Option<ExtraUnits> {
        self.extra.map(|e| e.units)
    }

    /// Returns the [`ExtraUnitCost`] of this [`Placement`], if any.
    #[must_use]
    pub fn extra_unit_cost(&self) -> Option<ExtraUnitCost> {
        self.extra.map(|e| e.unit_cost)
    }

    /// Takes a [`Snapshot`] of the tracked fields of this [`Placement`].
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rate: self.rate,
            extra_units: self.extra_units(),
            extra_unit_cost: self.extra_unit_cost(),
        }
    }
}

/// ID of a [`Placement`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of a paper an advertisement is published in.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct PaperName(String);

impl PaperName {
    /// Creates a new [`PaperName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`PaperName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 100
    }
}

impl FromStr for PaperName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PaperName`")
    }
}

/// Caption an advertisement is published under.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Caption(String);

impl Caption {
    /// Creates a new [`Caption`] if the given `caption` is valid.
    #[must_use]
    pub fn new(caption: impl Into<String>) -> Option<Self> {
        let caption = caption.into();
        Self::check(&caption).then_some(Self(caption))
    }

    /// Checks whether the given `caption` is a valid [`Caption`].
    fn check(caption: impl AsRef<str>) -> bool {
        let caption = caption.as_ref();
        caption.trim() == caption && !caption.is_empty() && caption.len() <= 100
    }
}

impl FromStr for Caption {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Caption`")
    }
}

/// List of paper editions an advertisement is published in.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Edition(String);

impl Edition {
    /// Creates a new [`Edition`] if the given `edition` is valid.
    #[must_use]
    pub fn new(edition: impl Into<String>) -> Option<Self> {
        let edition = edition.into();
        Self::check(&edition).then_some(Self(edition))
    }

    /// Checks whether the given `edition` is a valid [`Edition`].
    fn check(edition: impl AsRef<str>) -> bool {
        let edition = edition.as_ref();
        edition.trim() == edition && !edition.is_empty() && edition.len() <= 100
    }
}

impl FromStr for Edition {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Edition`")
    }
}

/// Base charge of a [`Placement`] in whole currency units.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Rate(i32);

impl Rate {
    /// Creates a new [`Rate`] if the given `rate` is not negative.
    #[must_use]
    pub fn new(rate: i32) -> Option<Self> {
        (rate >= 0).then_some(Self(rate))
    }
}

impl FromStr for Rate {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        i32::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Rate`")
    }
}

/// Number of extra lines or words of a [`Placement`] beyond its base
/// package.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct ExtraUnits(i32);

impl ExtraUnits {
    /// Creates new [`ExtraUnits`] if the given `units` are not negative.
    #[must_use]
    pub fn new(units: i32) -> Option<Self> {
        (units >= 0).then_some(Self(units))
    }
}

impl FromStr for ExtraUnits {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        i32::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `ExtraUnits`")
    }
}

/// Cost of a single extra line or word of a [`Placement`] in whole currency
/// units, excluding tax.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct ExtraUnitCost(i32);

impl ExtraUnitCost {
    /// Creates a new [`ExtraUnitCost`] if the given `cost` is not negative.
    #[must_use]
    pub fn new(cost: i32) -> Option<Self> {
        (cost >= 0).then_some(Self(cost))
    }
}

impl FromStr for ExtraUnitCost {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        i32::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `ExtraUnitCost`")
    }
}

/// Extra lines or words of a [`Placement`] along with their cost.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Extra {
    /// Number of the extra lines or words.
    pub units: ExtraUnits,

    /// Cost of a single extra line or word.
    pub unit_cost: ExtraUnitCost,
}

impl Extra {
    /// Returns the total cost of these [`Extra`] lines or words, excluding
    /// tax.
    #[must_use]
    pub fn cost(self) -> Decimal {
        Decimal::from(i32::from(self.units))
            * Decimal::from(i32::from(self.unit_cost))
    }

    /// Indicates whether either the number or the cost of these [`Extra`]
    /// lines or words is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        i32::from(self.units) == 0 || i32::from(self.unit_cost) == 0
    }
}

/// Values of the tracked fields of a [`Placement`] at some point in time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Snapshot {
    /// [`Rate`] of the [`Placement`].
    pub rate: Rate,

    /// [`ExtraUnits`] of the [`Placement`], if any.
    pub extra_units: Option<ExtraUnits>,

    /// [`ExtraUnitCost`] of the [`Placement`], if any.
    pub extra_unit_cost: Option<ExtraUnitCost>,
}

/// Not yet validated state of a [`Placement`] being saved.
#[derive(Clone, Debug)]
pub struct Draft {
    /// ID of the [`Placement`].
    pub id: Id,

    /// ID of the [`Receipt`] the [`Placement`] belongs to.
    pub receipt_id: receipt::Id,

    /// [`PaperName`] of the [`Placement`].
    pub paper: PaperName,

    /// [`Caption`] of the [`Placement`].
    pub caption: Caption,

    /// [`Edition`]s of the [`Placement`].
    pub edition: Edition,

    /// [`Rate`] of the [`Placement`].
    pub rate: Rate,

    /// [`ExtraUnits`] of the [`Placement`], if any.
    pub extra_units: Option<ExtraUnits>,

    /// [`ExtraUnitCost`] of the [`Placement`], if any.
    pub extra_unit_cost: Option<ExtraUnitCost>,
}

impl Draft {
    /// Validates the [`Extra`] lines or words of this [`Draft`].
    ///
    /// # Errors
    ///
    /// If only one of [`ExtraUnits`] and [`ExtraUnitCost`] is specified.
    pub fn extra(&self) -> Result<Option<Extra>, ValidationError> {
        use ValidationError as E;

        match (self.extra_units, self.extra_unit_cost) {
            (Some(units), Some(unit_cost)) => {
                Ok(Some(Extra { units, unit_cost }))
            }
            (None, None) => Ok(None),
            (Some(_), None) => Err(E::MissingExtraUnitCost),
            (None, Some(_)) => Err(E::MissingExtraUnits),
        }
    }
}

/// Error of validating a [`Draft`] of a [`Placement`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// [`ExtraUnits`] are specified without their [`ExtraUnitCost`].
    #[display("Please enter the cost of extra line/word")]
    MissingExtraUnitCost,

    /// [`ExtraUnitCost`] is specified without the [`ExtraUnits`].
    #[display("Please enter the number of extra lines/words")]
    MissingExtraUnits,
}

/// [`DateTime`] when a [`Placement`] was created.
pub type CreationDateTime = DateTimeOf<(Placement, unit::Creation)>;

/// [`DateTime`] when a [`Placement`] was modified the last time.
pub type ModificationDateTime = DateTimeOf<(Placement, unit::Modification)>;

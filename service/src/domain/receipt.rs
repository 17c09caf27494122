//! [`Receipt`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use uuid::Uuid;

use crate::domain::user;
#[cfg(doc)]
use crate::domain::Placement;

/// Receipt issued to a client for newspaper advertisement [`Placement`]s.
#[derive(Clone, Debug)]
pub struct Receipt {
    /// ID of this [`Receipt`].
    pub id: Id,

    /// ID of the employee who issued this [`Receipt`].
    pub created_by: user::Id,

    /// Indicator whether the client has been notified about this [`Receipt`].
    ///
    /// [`None`] means that no notification has been attempted yet.
    pub message_sent: Option<bool>,

    /// [`ClientName`] this [`Receipt`] is issued to.
    pub client_name: ClientName,

    /// [`Phone`] number of the client.
    pub phone: Phone,

    /// [`Address`] of the client, if any.
    pub address: Option<Address>,

    /// [`BankName`] provided by the client, if any.
    pub bank_name: Option<BankName>,

    /// [`Branch`] of the bank provided by the client, if any.
    pub branch: Option<Branch>,

    /// [`PaymentMode`] chosen by the client.
    pub payment_mode: PaymentMode,

    /// [`Caption`] of this [`Receipt`], if any.
    pub caption: Option<Caption>,

    /// [`DateTime`] when this [`Receipt`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Receipt`] was modified the last time.
    pub updated_at: ModificationDateTime,
}

/// ID of a [`Receipt`].
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

/// Name of a client a [`Receipt`] is issued to.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct ClientName(String);

impl ClientName {
    /// Creates a new [`ClientName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`ClientName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 200
    }
}

impl FromStr for ClientName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ClientName`")
    }
}

/// Phone number of a client.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `phone` is valid.
    #[must_use]
    pub fn new(phone: impl Into<String>) -> Option<Self> {
        let phone = phone.into();
        Self::check(&phone).then_some(Self(phone))
    }

    /// Checks whether the given `phone` is a valid [`Phone`].
    fn check(phone: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] invariants:
        /// - May start with `+`;
        /// - May be followed by a single `1` country code;
        /// - Must contain 9 to 16 digits afterwards.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?1?\d{9,16}$").expect("valid regex")
        });

        REGEX.is_match(phone.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or(
            "invalid `Phone`: must be entered in the format `+999999999`, \
             up to 16 digits allowed",
        )
    }
}

/// Postal address of a client.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address && !address.is_empty()
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// Name of a bank provided by a client.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct BankName(String);

impl BankName {
    /// Creates a new [`BankName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`BankName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 100
    }
}

impl FromStr for BankName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `BankName`")
    }
}

/// Branch of a bank provided by a client.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Branch(String);

impl Branch {
    /// Creates a new [`Branch`] if the given `branch` is valid.
    #[must_use]
    pub fn new(branch: impl Into<String>) -> Option<Self> {
        let branch = branch.into();
        Self::check(&branch).then_some(Self(branch))
    }

    /// Checks whether the given `branch` is a valid [`Branch`].
    fn check(branch: impl AsRef<str>) -> bool {
        let branch = branch.as_ref();
        branch.trim() == branch && !branch.is_empty() && branch.len() <= 100
    }
}

impl FromStr for Branch {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Branch`")
    }
}

/// Caption of a [`Receipt`].
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

define_kind! {
    #[doc = "Mode of a payment chosen by a client."]
    enum PaymentMode {
        #[doc = "Paid in cash."]
        Cash = 1,

        #[doc = "Paid by a cheque."]
        Cheque = 2,
    }
}

impl Default for PaymentMode {
    fn default() -> Self {
        Self::Cash
    }
}

/// [`DateTime`] when a [`Receipt`] was created.
pub type CreationDateTime = DateTimeOf<(Receipt, unit::Creation)>;

/// [`DateTime`] when a [`Receipt`] was modified the last time.
pub type ModificationDateTime = DateTimeOf<(Receipt, unit::Modification)>;

//! Electric [`Component`] definitions.

pub mod required;

use std::{str::FromStr, sync::LazyLock};

use common::Money;
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use self::required::{Quantity, RequiredComponent};

/// Electric component available in the catalog.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// ID of this [`Component`].
    pub id: Id,

    /// [`Name`] of this [`Component`].
    pub name: Name,

    /// Width of this [`Component`] on a DIN rail.
    #[serde(rename = "fields")]
    pub modules: Modules,

    /// Free-text description of this [`Component`].
    pub description: String,

    /// Unit price of this [`Component`].
    pub price: Money,

    /// [`ImagePath`] of this [`Component`].
    pub image: ImagePath,

    /// [`Category`] of this [`Component`].
    pub category: Category,

    /// Subcategory of this [`Component`], if any.
    pub subcategory: Option<Category>,
}

/// ID of a [`Component`], like `mcb_b16`.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(str)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        /// [`Regex`] of an [`Id`].
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[A-Za-z0-9_\-]{1,64}$").expect("valid regex")
        });

        REGEX.is_match(id.as_ref())
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `component::Id`")
    }
}

/// Name of a [`Component`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        (name.trim() == name && !name.is_empty() && name.len() <= 256)
            .then_some(Self(name))
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `component::Name`")
    }
}

/// Number of DIN rail modules a [`Component`] occupies.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Modules(u8);

impl Modules {
    /// Single module.
    pub const ONE: Self = Self(1);

    /// Returns this width as a number of board cells.
    #[must_use]
    pub fn cells(self) -> usize {
        usize::from(self.0)
    }
}

/// Public path of a [`Component`] picture.
#[derive(
    AsRef,
    Clone,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct ImagePath(String);

impl ImagePath {
    /// Public directory [`Component`] pictures are served from.
    pub const DIR: &'static str = "/pictures/electricComponents";

    /// Returns the conventional [`ImagePath`] of the [`Component`] with the
    /// provided [`Id`].
    #[must_use]
    pub fn of(id: &Id) -> Self {
        Self::with_extension(id, "jpg")
    }

    /// Returns the [`ImagePath`] of the [`Component`] picture with the
    /// provided file extension.
    #[must_use]
    pub fn with_extension(id: &Id, ext: &str) -> Self {
        Self(format!("{}/{id}.{ext}", Self::DIR))
    }

    /// Returns the `.jpeg` alternative of this [`ImagePath`], if it's a `.jpg`
    /// one.
    #[must_use]
    pub fn fallback(&self) -> Option<Self> {
        self.0
            .strip_suffix(".jpg")
            .map(|stem| Self(format!("{stem}.jpeg")))
    }
}

/// Category of a [`Component`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(str)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Category(String);

/// Search query of [`Component`]s, matching case-insensitive substrings of
/// names, descriptions and categories.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Creates a new [`SearchQuery`] if the given text is not blank.
    #[must_use]
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let text = text.as_ref().trim();
        (!text.is_empty()).then(|| Self(text.to_lowercase()))
    }

    /// Checks whether the provided [`Component`] matches this
    /// [`SearchQuery`].
    #[must_use]
    pub fn matches(&self, c: &Component) -> bool {
        [c.name.as_ref(), c.description.as_str(), c.category.as_ref()]
            .into_iter()
            .any(|s| s.to_lowercase().contains(&self.0))
    }
}

#[cfg(test)]
mod spec {
    use super::{Id, ImagePath};

    #[test]
    fn validates_id() {
        assert!(Id::new("mcb_b16").is_some());
        assert!(Id::new("rcd-1f").is_some());
        assert!(Id::new("").is_none());
        assert!(Id::new("../etc/passwd").is_none());
        assert!(Id::new("a b").is_none());
    }

    #[test]
    fn image_path_convention() {
        let id = Id::new("mcb_b16").unwrap();
        let path = ImagePath::of(&id);

        assert_eq!(path.as_ref(), "/pictures/electricComponents/mcb_b16.jpg");
        assert_eq!(
            path.fallback().unwrap().as_ref(),
            "/pictures/electricComponents/mcb_b16.jpeg",
        );
        assert!(ImagePath::with_extension(&id, "png").fallback().is_none());
    }
}

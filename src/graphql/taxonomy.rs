//! Storefront classification axes for route lookups.

use std::fmt;
use std::str::FromStr;

/// The taxonomy a terms lookup is restricted to.
///
/// Route lookups resolve any node type, so the requested taxonomy is compared
/// against the lower-cased `__typename` of the result. Strings other than
/// `"category"` and `"brand"` are kept verbatim in [`Other`](Self::Other):
/// they select the brand template and can only match a node whose lower-cased
/// type name equals them exactly.
///
/// # Example
///
/// ```rust
/// use bigcommerce_graphql::graphql::Taxonomy;
///
/// assert_eq!(Taxonomy::from("brand"), Taxonomy::Brand);
/// assert_eq!(Taxonomy::default(), Taxonomy::Category);
/// assert_eq!(Taxonomy::from("Brand").as_str(), "Brand");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Taxonomy {
    /// Product categories.
    #[default]
    Category,
    /// Product brands.
    Brand,
    /// Any other requested taxonomy string.
    Other(String),
}

impl Taxonomy {
    /// Returns the taxonomy string compared against node type names.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Category => "category",
            Self::Brand => "brand",
            Self::Other(name) => name,
        }
    }

    /// Returns `true` if lookups for this taxonomy use the category template.
    #[must_use]
    pub const fn uses_category_template(&self) -> bool {
        matches!(self, Self::Category)
    }

    /// Returns `true` if a node with `typename` belongs to this taxonomy.
    #[must_use]
    pub fn matches_typename(&self, typename: &str) -> bool {
        typename.to_lowercase() == self.as_str()
    }
}

impl From<&str> for Taxonomy {
    fn from(value: &str) -> Self {
        match value {
            "category" => Self::Category,
            "brand" => Self::Brand,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Taxonomy {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl FromStr for Taxonomy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

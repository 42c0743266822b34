//! Catalog filtering and sorting.
//!
//! [`apply`] narrows a product list by brand, price and category, then orders
//! it by the active [`SortKey`]. It never fetches anything; callers pass the
//! list they already have.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product};

/// Error returned when a sort key string is not one of the known keys.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort key: {0}")]
pub struct ParseSortKeyError(String);

/// The single criterion controlling catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest release first.
    ReleaseDateDesc,
    /// Oldest release first.
    ReleaseDateAsc,
    /// Most expensive first.
    PriceDesc,
    /// Cheapest first.
    PriceAsc,
}

impl SortKey {
    /// Every key, in the order the sort menu lists them.
    pub const ALL: [Self; 4] = [
        Self::ReleaseDateDesc,
        Self::ReleaseDateAsc,
        Self::PriceDesc,
        Self::PriceAsc,
    ];

    /// Name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReleaseDateDesc => "release_date_desc",
            Self::ReleaseDateAsc => "release_date_asc",
            Self::PriceDesc => "price_desc",
            Self::PriceAsc => "price_asc",
        }
    }

    /// Human label for the sort menu.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ReleaseDateDesc => "Release Date: Desc",
            Self::ReleaseDateAsc => "Release Date: Asc",
            Self::PriceDesc => "Price: Desc",
            Self::PriceAsc => "Price: Asc",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> core::cmp::Ordering {
        match self {
            Self::ReleaseDateDesc => b.released_at().cmp(&a.released_at()),
            Self::ReleaseDateAsc => a.released_at().cmp(&b.released_at()),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::PriceAsc => a.price.cmp(&b.price),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseSortKeyError(s.to_owned()))
    }
}

/// Category selection: everything, or exactly one named category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Label the category menu uses for "no filter".
    pub const ALL_LABEL: &'static str = "All";

    /// Parse a query value. Blank input and `All` both mean no filter.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Named(value.to_owned())
        }
    }

    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }

    /// The value as it appears in the menu and in query strings.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Named(name) => name,
        }
    }
}

/// Inclusive price bounds, always kept inside [`PriceRange::FLOOR`] and
/// [`PriceRange::CEILING`] with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    min: Price,
    max: Price,
}

impl PriceRange {
    /// Lowest selectable price.
    pub const FLOOR: u32 = 0;
    /// Highest selectable price.
    pub const CEILING: u32 = 500;

    fn floor() -> Price {
        Price::from_dollars(Self::FLOOR)
    }

    fn ceiling() -> Price {
        Price::from_dollars(Self::CEILING)
    }

    /// Move the lower bound, clamped between the floor and the current max.
    #[must_use]
    pub fn with_min(self, min: Price) -> Self {
        Self {
            min: min.clamp(Self::floor(), self.max),
            max: self.max,
        }
    }

    /// Move the upper bound, clamped between the current min and the ceiling.
    #[must_use]
    pub fn with_max(self, max: Price) -> Self {
        Self {
            min: self.min,
            max: max.clamp(self.min, Self::ceiling()),
        }
    }

    #[must_use]
    pub const fn min(&self) -> Price {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Price {
        self.max
    }

    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }

    /// Whether both bounds sit at the floor and ceiling.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.min == Self::floor() && self.max == Self::ceiling()
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Self::floor(),
            max: Self::ceiling(),
        }
    }
}

/// Everything the shopper has chosen on the listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Brand names to keep. Empty keeps every brand.
    pub brands: BTreeSet<String>,
    pub category: CategoryFilter,
    pub price: PriceRange,
    /// `None` keeps the order the API returned.
    pub sort: Option<SortKey>,
}

impl FilterState {
    /// Whether any filter differs from the defaults. Sorting does not count.
    #[must_use]
    pub fn is_narrowed(&self) -> bool {
        !self.brands.is_empty() || self.category != CategoryFilter::All || !self.price.is_full()
    }

    /// Whether `product` passes the brand, price and category filters.
    #[must_use]
    pub fn admits(&self, product: &Product) -> bool {
        let brand_ok = self.brands.is_empty() || self.brands.contains(&product.brand);
        brand_ok && self.price.contains(product.price) && self.category.matches(&product.category)
    }
}

/// Filter `products` by `filters` and order the survivors.
///
/// The sort is stable: products that compare equal keep their input order.
#[must_use]
pub fn apply(products: &[Product], filters: &FilterState) -> Vec<Product> {
    let mut kept: Vec<Product> = products
        .iter()
        .filter(|product| filters.admits(product))
        .cloned()
        .collect();

    if let Some(key) = filters.sort {
        kept.sort_by(|a, b| key.compare(a, b));
    }

    kept
}

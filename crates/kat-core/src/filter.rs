//! Search, facet filtering and sorting over the product list.
//!
//! [`FilterState`] is an immutable value: every named toggle returns a new
//! state, so the presentation layer can keep the previous one for undo or
//! comparison. [`filter_and_sort`] never touches its input.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::products::Product;

/// Upper bound of the price slider, and the default price ceiling.
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);

/// A filterable attribute dimension of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetKind {
    Category,
    SizeGroup,
    Fabric,
}

impl FacetKind {
    /// The value `product` carries for this facet.
    #[must_use]
    pub fn value_of(self, product: &Product) -> Option<&str> {
        let value = match self {
            FacetKind::Category => Some(product.category.as_str()),
            FacetKind::SizeGroup => product.size_group(),
            FacetKind::Fabric => Some(product.fabric_type.as_str()),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetKind::Category => write!(f, "category"),
            FacetKind::SizeGroup => write!(f, "size group"),
            FacetKind::Fabric => write!(f, "fabric"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Featured designs first, catalog order otherwise.
    #[default]
    PriorityDescending,
    PriceAscending,
    PriceDescending,
}

impl SortKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PriorityDescending => "priority",
            SortKey::PriceAscending => "price-asc",
            SortKey::PriceDescending => "price-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(SortKey::PriorityDescending),
            "price-asc" => Ok(SortKey::PriceAscending),
            "price-desc" => Ok(SortKey::PriceDescending),
            other => Err(format!(
                "unknown sort key '{other}'; expected priority, price-asc or price-desc"
            )),
        }
    }
}

/// Query state driven by the catalog sidebar and search box.
///
/// An empty facet set places no restriction on that facet. Values within a
/// facet are OR-ed; facets are AND-ed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    selected_categories: BTreeSet<String>,
    selected_size_groups: BTreeSet<String>,
    selected_fabrics: BTreeSet<String>,
    max_price: Decimal,
    only_featured: bool,
    search_text: String,
    sort_key: SortKey,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PRICE)
    }
}

impl FilterState {
    /// An unrestricted state whose price ceiling is `max_price`.
    #[must_use]
    pub fn new(max_price: Decimal) -> Self {
        Self {
            selected_categories: BTreeSet::new(),
            selected_size_groups: BTreeSet::new(),
            selected_fabrics: BTreeSet::new(),
            max_price,
            only_featured: false,
            search_text: String::new(),
            sort_key: SortKey::default(),
        }
    }

    #[must_use]
    pub fn toggle_category(&self, category: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.selected_categories, category);
        next
    }

    #[must_use]
    pub fn toggle_size_group(&self, size_group: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.selected_size_groups, size_group);
        next
    }

    #[must_use]
    pub fn toggle_fabric(&self, fabric: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.selected_fabrics, fabric);
        next
    }

    #[must_use]
    pub fn with_max_price(&self, max_price: Decimal) -> Self {
        Self {
            max_price,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_only_featured(&self, only_featured: bool) -> Self {
        Self {
            only_featured,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_search(&self, text: &str) -> Self {
        Self {
            search_text: text.to_string(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_sort(&self, sort_key: SortKey) -> Self {
        Self {
            sort_key,
            ..self.clone()
        }
    }

    /// Clears every facet and resets the price ceiling to `price_limit`.
    /// Search text and sort order are kept, matching the sidebar's reset
    /// button.
    #[must_use]
    pub fn reset(&self, price_limit: Decimal) -> Self {
        Self {
            search_text: self.search_text.clone(),
            sort_key: self.sort_key,
            ..Self::new(price_limit)
        }
    }

    /// Number of selected facet values plus one for the featured toggle.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.selected_categories.len()
            + self.selected_size_groups.len()
            + self.selected_fabrics.len()
            + usize::from(self.only_featured)
    }

    #[must_use]
    pub fn selected(&self, kind: FacetKind) -> &BTreeSet<String> {
        match kind {
            FacetKind::Category => &self.selected_categories,
            FacetKind::SizeGroup => &self.selected_size_groups,
            FacetKind::Fabric => &self.selected_fabrics,
        }
    }

    #[must_use]
    pub fn max_price(&self) -> Decimal {
        self.max_price
    }

    #[must_use]
    pub fn only_featured(&self) -> bool {
        self.only_featured
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    fn facet_matches(&self, kind: FacetKind, product: &Product) -> bool {
        let selected = self.selected(kind);
        selected.is_empty() || kind.value_of(product).is_some_and(|v| selected.contains(v))
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Applies `state` to `products` and returns the matching products in
/// display order.
///
/// Predicates run in a fixed order: search, category, size group, fabric,
/// featured, price ceiling. Products without a price count as price zero.
/// Every sort is stable, so ties keep catalog order. An empty result is
/// valid.
#[must_use]
pub fn filter_and_sort<'a>(products: &'a [Product], state: &FilterState) -> Vec<&'a Product> {
    let needle = state.search_text.trim().to_lowercase();

    let mut result: Vec<&Product> = products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.design_number.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        })
        .filter(|p| state.facet_matches(FacetKind::Category, p))
        .filter(|p| state.facet_matches(FacetKind::SizeGroup, p))
        .filter(|p| state.facet_matches(FacetKind::Fabric, p))
        .filter(|p| !state.only_featured || p.is_featured)
        .filter(|p| price_of(p) <= state.max_price)
        .collect();

    match state.sort_key {
        SortKey::PriorityDescending => result.sort_by_key(|p| !p.is_featured),
        SortKey::PriceAscending => result.sort_by_key(|p| price_of(p)),
        SortKey::PriceDescending => result.sort_by(|a, b| price_of(b).cmp(&price_of(a))),
    }

    tracing::debug!(
        total = products.len(),
        matched = result.len(),
        sort = %state.sort_key,
        "catalog filter applied"
    );

    result
}

fn price_of(product: &Product) -> Decimal {
    product.base_price().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;

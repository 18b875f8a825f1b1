use std::collections::{HashMap, HashSet};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::filter::{filter_and_sort, FacetKind, FilterState};

/// Style label that marks a design for priority display.
pub const FEATURED_STYLE: &str = "Fancy";

/// A record exactly as it appears in the bundled `products.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProductRecord {
    pub sr_no: u64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub design_name: Option<String>,
    #[serde(default)]
    pub variants: Vec<RawVariant>,
    #[serde(default)]
    pub prints_colour: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub image_url: String,
    /// Close-up shot shown on hover. Absent from most records.
    #[serde(default)]
    pub hover_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVariant {
    pub size: String,
    pub price: Decimal,
}

/// One orderable size of a [`Product`] and its per-piece wholesale price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub size: String,
    pub price: Decimal,
}

/// A catalog design, immutable once loaded.
///
/// Size labels, the size group and the base price are all read from
/// `variants`, so they cannot drift apart from the variant list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub design_number: String,
    pub category: String,
    pub fabric_type: String,
    /// Raw style label, e.g. `"Fancy"` or `"Core"`.
    pub style: String,
    pub colors: Vec<String>,
    pub is_featured: bool,
    pub image_url: String,
    pub hover_image_url: Option<String>,
    pub variants: Vec<Variant>,
}

impl Product {
    /// Price of the first variant. `None` only for hand-built products with
    /// no variants; loaded products always have one.
    #[must_use]
    pub fn base_price(&self) -> Option<Decimal> {
        self.variants.first().map(|v| v.price)
    }

    /// Size-range label of the first variant, used as the size-group facet.
    #[must_use]
    pub fn size_group(&self) -> Option<&str> {
        self.variants.first().map(|v| v.size.as_str())
    }

    /// Size labels in catalog order.
    pub fn sizes(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.size.as_str())
    }

    #[must_use]
    pub fn price_for(&self, size: &str) -> Option<Decimal> {
        self.variants
            .iter()
            .find(|v| v.size == size)
            .map(|v| v.price)
    }

    /// Position of `size` in the catalog size order.
    #[must_use]
    pub fn size_position(&self, size: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.size == size)
    }

    /// Display label for the style tier.
    #[must_use]
    pub fn style_label(&self) -> &'static str {
        if self.is_featured {
            "Fancy"
        } else {
            "Core"
        }
    }
}

/// Why a raw record was left out of the repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    #[error("record could not be decoded: {0}")]
    Undecodable(String),
    #[error("design name is missing")]
    MissingDesignName,
    #[error("record has no size variants")]
    NoVariants,
    #[error("id {0} was already used by an earlier record")]
    DuplicateId(String),
}

/// A raw record excluded during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// Zero-based position of the record in the input.
    pub position: usize,
    /// The record's id, when it could be read.
    pub record_id: Option<String>,
    pub reason: RejectionReason,
}

/// Outcome of a load: the repository plus every record that was excluded.
#[derive(Debug)]
pub struct LoadReport {
    pub repository: ProductRepository,
    pub rejected: Vec<MalformedRecord>,
}

impl LoadReport {
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Read-only, in-memory product list in catalog order.
#[derive(Debug, Clone, Default)]
pub struct ProductRepository {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl ProductRepository {
    /// Converts raw records into products, in input order.
    ///
    /// Records without a design name or without variants, and records whose
    /// id repeats an earlier one, are excluded and listed in
    /// [`LoadReport::rejected`]. Exclusions never fail the load.
    #[must_use]
    pub fn load(raw_records: Vec<RawProductRecord>) -> LoadReport {
        Self::load_positioned(raw_records.into_iter().enumerate(), Vec::new())
    }

    /// Loads `(position, record)` pairs, starting from rejections already
    /// found by the caller.
    fn load_positioned<I>(records: I, mut rejected: Vec<MalformedRecord>) -> LoadReport
    where
        I: ExactSizeIterator<Item = (usize, RawProductRecord)>,
    {
        let mut products = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for (position, raw) in records {
            let id = raw.sr_no.to_string();
            match normalize_record(raw) {
                Ok(product) => {
                    if index.contains_key(&product.id) {
                        rejected.push(reject(
                            position,
                            Some(id.clone()),
                            RejectionReason::DuplicateId(id),
                        ));
                        continue;
                    }
                    index.insert(product.id.clone(), products.len());
                    products.push(product);
                }
                Err(reason) => rejected.push(reject(position, Some(id), reason)),
            }
        }

        rejected.sort_by_key(|r| r.position);

        tracing::info!(
            loaded = products.len(),
            rejected = rejected.len(),
            "product catalog loaded"
        );

        LoadReport {
            repository: Self { products, index },
            rejected,
        }
    }

    /// Parses a JSON array of raw records and loads it.
    ///
    /// Array elements that do not decode as a record are rejected like any
    /// other malformed record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the input is not a JSON array.
    pub fn load_from_json(json: &str) -> Result<LoadReport, CatalogError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;

        let mut decoded = Vec::with_capacity(values.len());
        let mut rejected = Vec::new();
        for (position, value) in values.into_iter().enumerate() {
            let record_id = value.get("sr_no").map(ToString::to_string);
            match serde_json::from_value::<RawProductRecord>(value) {
                Ok(record) => decoded.push((position, record)),
                Err(e) => rejected.push(reject(
                    position,
                    record_id,
                    RejectionReason::Undecodable(e.to_string()),
                )),
            }
        }

        Ok(Self::load_positioned(decoded.into_iter(), rejected))
    }

    /// Reads and loads the catalog file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, or
    /// [`CatalogError::Json`] if it is not a JSON array.
    pub fn load_from_path(path: &Path) -> Result<LoadReport, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::load_from_json(&content)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    /// Runs the filter engine over the whole catalog.
    #[must_use]
    pub fn query(&self, state: &FilterState) -> Vec<&Product> {
        filter_and_sort(&self.products, state)
    }

    /// Distinct values of a facet, in first-seen catalog order.
    #[must_use]
    pub fn facet_values(&self, kind: FacetKind) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter_map(|p| kind.value_of(p))
            .filter(|v| seen.insert(*v))
            .collect()
    }

    /// Distinct values of a facet with the number of products carrying each.
    #[must_use]
    pub fn facet_counts(&self, kind: FacetKind) -> Vec<(&str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in self.products.iter().filter_map(|p| kind.value_of(p)) {
            *counts.entry(value).or_insert(0) += 1;
        }
        self.facet_values(kind)
            .into_iter()
            .map(|v| (v, counts.get(v).copied().unwrap_or(0)))
            .collect()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.facet_values(FacetKind::Category)
    }

    #[must_use]
    pub fn size_groups(&self) -> Vec<&str> {
        self.facet_values(FacetKind::SizeGroup)
    }

    #[must_use]
    pub fn fabrics(&self) -> Vec<&str> {
        self.facet_values(FacetKind::Fabric)
    }

    /// The first `n` products, as shown in the landing-page carousel.
    #[must_use]
    pub fn carousel_preview(&self, n: usize) -> &[Product] {
        &self.products[..n.min(self.products.len())]
    }

    /// Image strip for a category card: `cover` first, then distinct product
    /// images of that category, at most `limit` entries.
    #[must_use]
    pub fn images_for_category<'a>(
        &'a self,
        category: &str,
        cover: &'a str,
        limit: usize,
    ) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        seen.insert(cover);
        std::iter::once(cover)
            .chain(
                self.products
                    .iter()
                    .filter(|p| p.category == category)
                    .map(|p| p.image_url.as_str())
                    .filter(|url| !url.is_empty() && seen.insert(*url)),
            )
            .take(limit)
            .collect()
    }
}

fn reject(position: usize, record_id: Option<String>, reason: RejectionReason) -> MalformedRecord {
    tracing::warn!(
        position,
        record_id = record_id.as_deref().unwrap_or("-"),
        reason = %reason,
        "skipping malformed product record"
    );
    MalformedRecord {
        position,
        record_id,
        reason,
    }
}

/// Converts one raw record into a [`Product`].
fn normalize_record(raw: RawProductRecord) -> Result<Product, RejectionReason> {
    let design_number = raw
        .design_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(RejectionReason::MissingDesignName)?;

    if raw.variants.is_empty() {
        return Err(RejectionReason::NoVariants);
    }

    let style = raw.style.unwrap_or_default();
    let is_featured = style == FEATURED_STYLE;

    Ok(Product {
        id: raw.sr_no.to_string(),
        design_number,
        category: raw.category,
        fabric_type: raw.subcategory,
        style,
        colors: raw.prints_colour.into_iter().collect(),
        is_featured,
        image_url: raw.image_url,
        hover_image_url: raw.hover_image_url.filter(|s| !s.is_empty()),
        variants: raw
            .variants
            .into_iter()
            .map(|v| Variant {
                size: v.size,
                price: v.price,
            })
            .collect(),
    })
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;

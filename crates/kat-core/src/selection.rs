//! The inquiry list: products chosen for a wholesale inquiry with per-size
//! piece counts.
//!
//! An [`InquiryList`] is a plain owned value. The presentation layer keeps
//! one per browsing session and passes it by reference to whatever needs it.

use crate::products::Product;

/// Ordered size → piece count map. Every stored count is positive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeQuantities(Vec<(String, u32)>);

impl SizeQuantities {
    /// Builds a map from raw `(size, count)` pairs.
    ///
    /// Zero and negative counts are dropped. A size given twice keeps its
    /// first position and its last count.
    pub fn from_input<I, S>(quantities: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, u32)> = Vec::new();
        for (size, qty) in quantities {
            let size = size.into();
            let qty = clamp_quantity(qty);
            match entries.iter().position(|(s, _)| *s == size) {
                Some(i) if qty == 0 => {
                    entries.remove(i);
                }
                Some(i) => entries[i].1 = qty,
                None if qty == 0 => {}
                None => entries.push((size, qty)),
            }
        }
        Self(entries)
    }

    #[must_use]
    pub fn get(&self, size: &str) -> Option<u32> {
        self.0.iter().find(|(s, _)| s == size).map(|(_, q)| *q)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(s, q)| (s.as_str(), *q))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sum of all piece counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, q)| u64::from(*q)).sum()
    }

    /// Reorders sizes to follow `product`'s catalog size order. Sizes the
    /// product does not list go last, in their current order.
    fn in_catalog_order(mut self, product: &Product) -> Self {
        self.0
            .sort_by_key(|(size, _)| product.size_position(size).unwrap_or(usize::MAX));
        self
    }
}

/// One product in the inquiry list.
#[derive(Debug, Clone)]
pub struct SelectionEntry {
    pub product: Product,
    pub quantities: SizeQuantities,
}

impl SelectionEntry {
    /// Pieces requested across all sizes.
    #[must_use]
    pub fn total_pieces(&self) -> u64 {
        self.quantities.total()
    }
}

/// UI-visible side effects of inquiry list changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryEvent {
    PanelOpened,
    PanelClosed,
}

#[derive(Debug, Clone, Default)]
pub struct InquiryList {
    entries: Vec<SelectionEntry>,
    panel_open: bool,
    events: Vec<InquiryEvent>,
}

impl InquiryList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `product` with the given per-size counts, replacing any counts
    /// already recorded for it.
    ///
    /// Non-positive counts are discarded first; if nothing is left the call
    /// is a no-op. Otherwise the selection panel is opened and
    /// [`InquiryEvent::PanelOpened`] is queued. A replaced entry keeps its
    /// position in the list.
    pub fn add<I, S>(&mut self, product: &Product, quantities: I)
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let quantities = SizeQuantities::from_input(quantities);
        if quantities.is_empty() {
            tracing::debug!(product_id = %product.id, "ignoring add with no pieces");
            return;
        }
        let quantities = quantities.in_catalog_order(product);

        if let Some(entry) = self.entry_mut(&product.id) {
            entry.quantities = quantities;
        } else {
            self.entries.push(SelectionEntry {
                product: product.clone(),
                quantities,
            });
        }

        tracing::debug!(
            product_id = %product.id,
            designs = self.entries.len(),
            "inquiry list updated"
        );

        self.panel_open = true;
        self.events.push(InquiryEvent::PanelOpened);
    }

    /// Removes the entry for `product_id`. Unknown ids are ignored.
    pub fn remove(&mut self, product_id: &str) {
        self.entries.retain(|e| e.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.entries.iter().any(|e| e.product.id == product_id)
    }

    #[must_use]
    pub fn quantities_for(&self, product_id: &str) -> Option<&SizeQuantities> {
        self.entries
            .iter()
            .find(|e| e.product.id == product_id)
            .map(|e| &e.quantities)
    }

    #[must_use]
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pieces requested across every entry.
    #[must_use]
    pub fn grand_total_pieces(&self) -> u64 {
        self.entries.iter().map(SelectionEntry::total_pieces).sum()
    }

    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
        self.events.push(if self.panel_open {
            InquiryEvent::PanelOpened
        } else {
            InquiryEvent::PanelClosed
        });
    }

    /// Returns and clears the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<InquiryEvent> {
        std::mem::take(&mut self.events)
    }

    fn entry_mut(&mut self, product_id: &str) -> Option<&mut SelectionEntry> {
        self.entries.iter_mut().find(|e| e.product.id == product_id)
    }
}

/// Parses a quantity typed into a size field.
///
/// Leading digits are read and the rest ignored; text without leading digits
/// or with a minus sign yields zero.
#[must_use]
pub fn parse_quantity(input: &str) -> u32 {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let prefix = &digits[..end];
    if prefix.is_empty() {
        return 0;
    }
    prefix
        .parse::<u64>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(u32::MAX)
}

fn clamp_quantity(qty: i64) -> u32 {
    u32::try_from(qty.max(0)).unwrap_or(u32::MAX)
}

/// Per-size counts being edited before they are committed to an
/// [`InquiryList`], seeded with every size of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityDraft {
    product_id: String,
    counts: Vec<(String, u32)>,
}

impl QuantityDraft {
    /// Starts a draft for `product`, pre-filled from `existing` counts when
    /// the product is already in the list.
    #[must_use]
    pub fn for_product(product: &Product, existing: Option<&SizeQuantities>) -> Self {
        let counts = product
            .sizes()
            .map(|size| {
                let qty = existing.and_then(|q| q.get(size)).unwrap_or(0);
                (size.to_string(), qty)
            })
            .collect();
        Self {
            product_id: product.id.clone(),
            counts,
        }
    }

    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    #[must_use]
    pub fn get(&self, size: &str) -> Option<u32> {
        self.counts.iter().find(|(s, _)| s == size).map(|(_, q)| *q)
    }

    /// Adds one piece. Returns `false` if the product has no such size.
    pub fn increment(&mut self, size: &str) -> bool {
        self.update(size, |q| q.saturating_add(1))
    }

    /// Removes one piece, never going below zero. Returns `false` if the
    /// product has no such size.
    pub fn decrement(&mut self, size: &str) -> bool {
        self.update(size, |q| q.saturating_sub(1))
    }

    /// Sets a size from typed text; see [`parse_quantity`]. Returns `false`
    /// if the product has no such size.
    pub fn set_from_input(&mut self, size: &str, input: &str) -> bool {
        let qty = parse_quantity(input);
        self.update(size, |_| qty)
    }

    #[must_use]
    pub fn total_pieces(&self) -> u64 {
        self.counts.iter().map(|(_, q)| u64::from(*q)).sum()
    }

    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.total_pieces() > 0
    }

    /// Commits the draft to `list`. Returns `false` and leaves the list
    /// untouched when no pieces are selected or `product` is not the
    /// product the draft was opened for.
    pub fn confirm(self, product: &Product, list: &mut InquiryList) -> bool {
        if !self.can_confirm() || product.id != self.product_id {
            return false;
        }
        list.add(
            product,
            self.counts
                .into_iter()
                .map(|(size, qty)| (size, i64::from(qty))),
        );
        true
    }

    fn update(&mut self, size: &str, f: impl FnOnce(u32) -> u32) -> bool {
        match self.counts.iter_mut().find(|(s, _)| s == size) {
            Some((_, qty)) => {
                *qty = f(*qty);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;

//! WhatsApp inquiry text.
//!
//! Each `format_*` method returns text already percent-encoded for the
//! `text` query parameter of a `wa.me` link; the matching `render_*` method
//! returns the same text unencoded. Prices appear only when the caller passes
//! `price_visible = true`.

use std::fmt::Write as _;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::products::Product;
use crate::selection::SelectionEntry;

pub const DEFAULT_BUSINESS_NAME: &str = "Ketan Aditya Textiles";
pub const DEFAULT_WHATSAPP_PHONE: &str = "919479714198";

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Percent-encodes `text` for use as a URL query parameter value.
#[must_use]
pub fn encode_message(text: &str) -> String {
    utf8_percent_encode(text, NON_ALPHANUMERIC).to_string()
}

/// Message wording for one business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    business_name: String,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_BUSINESS_NAME)
    }
}

impl MessageTemplate {
    #[must_use]
    pub fn new(business_name: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
        }
    }

    #[must_use]
    pub fn business_name(&self) -> &str {
        &self.business_name
    }

    /// Encoded inquiry for the whole selection, or the generic greeting when
    /// `entries` is empty.
    #[must_use]
    pub fn format_inquiry(&self, entries: &[SelectionEntry], price_visible: bool) -> String {
        encode_message(&self.render_inquiry(entries, price_visible))
    }

    /// Encoded inquiry about a single design.
    #[must_use]
    pub fn format_single(&self, product: &Product, price_visible: bool) -> String {
        encode_message(&self.render_single(product, price_visible))
    }

    /// Encoded contact-page greeting.
    #[must_use]
    pub fn format_generic(&self) -> String {
        encode_message(&self.render_generic())
    }

    #[must_use]
    pub fn render_inquiry(&self, entries: &[SelectionEntry], price_visible: bool) -> String {
        if entries.is_empty() {
            return self.render_generic();
        }

        let mut out = format!(
            "*🛍️ B2B INQUIRY - {}*\n{RULE}\n\n",
            self.business_name.to_uppercase()
        );

        let blocks: Vec<String> = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| render_entry(idx + 1, entry, price_visible))
            .collect();
        out.push_str(&blocks.join("\n\n"));

        let grand_total: u64 = entries.iter().map(SelectionEntry::total_pieces).sum();
        let _ = write!(
            out,
            "\n\n{RULE}\n*📋 SUMMARY*\nTotal Designs: {}\nTotal Pieces: *{grand_total}*\n\n\
             _Please provide your best wholesale rates for the above inquiry._",
            entries.len()
        );
        out
    }

    #[must_use]
    pub fn render_single(&self, product: &Product, price_visible: bool) -> String {
        let mut out = format!(
            "*Inquiry for {}*\n\nCategory: {}\nFabric: {}\n",
            product.design_number, product.category, product.fabric_type
        );
        if price_visible && !product.variants.is_empty() {
            out.push_str("\n*Wholesale Pricing:*\n");
            for variant in &product.variants {
                let _ = writeln!(out, "• Size {}: ₹{}", variant.size, variant.price);
            }
        }
        out.push_str("\nHello, I would like to inquire about this design.");
        out
    }

    #[must_use]
    pub fn render_generic(&self) -> String {
        format!(
            "*Hello {}!*\n\nI would like to inquire about your products.\n\n\
             Please share your catalog and pricing details.\n\nThank you!",
            self.business_name
        )
    }
}

fn render_entry(number: usize, entry: &SelectionEntry, price_visible: bool) -> String {
    let product = &entry.product;
    let mut block = format!(
        "*{number}. {}*\n   📦 Category: {}\n   🧵 Fabric: {}\n   📊 Total Quantity: *{} pieces*\n\n   *Size Breakdown:*",
        product.design_number,
        product.category,
        product.fabric_type,
        entry.total_pieces()
    );
    for (size, qty) in entry.quantities.iter().filter(|(_, q)| *q > 0) {
        let _ = write!(block, "\n   • Size {size}: {qty} pcs");
    }
    if price_visible && !product.variants.is_empty() {
        let prices: Vec<String> = product
            .variants
            .iter()
            .map(|v| format!("₹{}", v.price))
            .collect();
        let _ = write!(block, "\n   💰 Price Range: {}", prices.join(", "));
    }
    block
}

/// `wa.me` deep link to one phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppLink {
    phone: String,
}

impl Default for WhatsAppLink {
    fn default() -> Self {
        Self::new(DEFAULT_WHATSAPP_PHONE)
    }
}

impl WhatsAppLink {
    /// `phone` is the international number without `+` or separators.
    #[must_use]
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
        }
    }

    /// Link that opens the chat with no prefilled text.
    #[must_use]
    pub fn chat_url(&self) -> String {
        format!("https://wa.me/{}", self.phone)
    }

    /// Link with `encoded_text` prefilled. The text must already be
    /// percent-encoded, as returned by the `format_*` methods.
    #[must_use]
    pub fn with_text(&self, encoded_text: &str) -> String {
        format!("https://wa.me/{}?text={encoded_text}", self.phone)
    }
}

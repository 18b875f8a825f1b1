//! Read-only catalog command handlers.

use clap::Args;
use kat_core::{FacetKind, FilterState, Product, SortKey};
use rust_decimal::Decimal;

use crate::loading::LoadingGate;
use crate::session::Session;

/// Number of products in the landing-page carousel.
const PREVIEW_COUNT: usize = 5;

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Case-insensitive text matched against design number and category
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Restrict to a category (repeatable)
    #[arg(long = "category")]
    pub(crate) categories: Vec<String>,
    /// Restrict to a size group, e.g. 22/32 (repeatable)
    #[arg(long = "size-group")]
    pub(crate) size_groups: Vec<String>,
    /// Restrict to a fabric (repeatable)
    #[arg(long = "fabric")]
    pub(crate) fabrics: Vec<String>,
    /// Inclusive price ceiling; defaults to the configured limit
    #[arg(long)]
    pub(crate) max_price: Option<Decimal>,
    /// Only Fancy-style designs
    #[arg(long)]
    pub(crate) featured: bool,
    /// priority, price-asc or price-desc
    #[arg(long, default_value = "priority")]
    pub(crate) sort: SortKey,
}

impl ListArgs {
    /// Builds the filter state the same way the sidebar would, one toggle
    /// at a time.
    pub(crate) fn filter_state(&self, price_limit: Decimal) -> FilterState {
        let mut state = FilterState::new(price_limit);
        for category in &self.categories {
            state = state.toggle_category(category);
        }
        for size_group in &self.size_groups {
            state = state.toggle_size_group(size_group);
        }
        for fabric in &self.fabrics {
            state = state.toggle_fabric(fabric);
        }
        if let Some(max_price) = self.max_price {
            state = state.with_max_price(max_price);
        }
        state
            .with_only_featured(self.featured)
            .with_search(self.search.as_deref().unwrap_or_default())
            .with_sort(self.sort)
    }
}

/// Price column text: the base price when partner pricing is unlocked.
fn price_cell(session: &Session, product: &Product) -> String {
    session
        .gate
        .visible_prices(product)
        .and_then(|variants| variants.first())
        .map_or_else(|| "login".to_string(), |v| format!("₹{}", v.price))
}

/// Filter the catalog and print the matching designs after the loading
/// placeholder clears.
pub(crate) async fn run_list(session: &Session, loading: &mut LoadingGate, args: &ListArgs) {
    let state = args.filter_state(session.config.max_price_limit);

    let ticket = loading.request();
    eprintln!("loading designs...");
    if !ticket.ready().await {
        return;
    }

    let results = session.repository.query(&state);
    if results.is_empty() {
        println!(
            "no designs match the current filters ({} active); try `--max-price` or fewer facets",
            state.active_filter_count()
        );
        return;
    }

    println!(
        "{:<6}{:<14}{:<18}{:<18}{:<10}PRICE",
        "ID", "DESIGN", "CATEGORY", "FABRIC", "SIZES"
    );
    for product in &results {
        let marker = if product.is_featured { "*" } else { "" };
        println!(
            "{:<6}{:<14}{:<18}{:<18}{:<10}{}",
            product.id,
            format!("{}{marker}", product.design_number),
            product.category,
            product.fabric_type,
            product.size_group().unwrap_or("-"),
            price_cell(session, product)
        );
    }
    println!("\n{} of {} designs", results.len(), session.repository.len());
}

/// Print one design with its sizes, and per-size prices when unlocked.
///
/// # Errors
///
/// Returns an error if no product has the given id.
pub(crate) fn run_show(session: &Session, id: &str) -> anyhow::Result<()> {
    let product = session
        .repository
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("design '{id}' not found"))?;

    println!("{}", product.design_number);
    println!("  category: {}", product.category);
    println!("  fabric:   {}", product.fabric_type);
    println!("  style:    {}", product.style_label());
    if !product.colors.is_empty() {
        println!("  colours:  {}", product.colors.join(", "));
    }
    println!("  image:    {}", product.image_url);
    if let Some(hover) = &product.hover_image_url {
        println!("  close-up: {hover}");
    }

    match session.gate.visible_prices(product) {
        Some(variants) => {
            println!("\n  {:<10}PRICE/UNIT", "SIZE");
            for variant in variants {
                println!("  {:<10}₹{}", variant.size, variant.price);
            }
        }
        None => {
            let sizes: Vec<&str> = product.sizes().collect();
            println!("  sizes:    {}", sizes.join(", "));
            println!("\n  wholesale prices are shown to partners; pass --partner-code");
        }
    }

    Ok(())
}

/// Print every facet value with the number of designs carrying it.
pub(crate) fn run_facets(session: &Session) {
    for kind in [FacetKind::Category, FacetKind::SizeGroup, FacetKind::Fabric] {
        println!("{kind}:");
        for (value, count) in session.repository.facet_counts(kind) {
            println!("  {value:<24}{count}");
        }
    }
    println!(
        "price ceiling: ₹{} (default)",
        session.config.max_price_limit
    );
}

/// Print the landing-page category groups and the carousel preview.
///
/// # Errors
///
/// Returns an error if the showcase file cannot be read or is invalid.
pub(crate) fn run_showcase(session: &Session) -> anyhow::Result<()> {
    let showcase = kat_core::load_showcase(&session.config.showcase_path)?;

    println!("carousel:");
    for product in session.repository.carousel_preview(PREVIEW_COUNT) {
        println!("  {:<14}{}", product.design_number, product.image_url);
    }

    for group in &showcase.groups {
        println!("\n{}", group.title.to_uppercase());
        for card in &group.cards {
            let resolved = card.resolve(&session.repository);
            println!(
                "  {:<16}{:<16}{} designs, {} images",
                resolved.label,
                resolved.category,
                resolved.product_count,
                resolved.images.len()
            );
        }
    }

    Ok(())
}

//! Inquiry command handlers: build WhatsApp links for a selection, a single
//! design, or a general greeting.
//!
//! Unknown designs and sizes in `--item` are logged and skipped rather than
//! failing the whole command.

use kat_core::{InquiryEvent, QuantityDraft};

use crate::session::Session;

/// One `--item` argument: a product id and `(size, typed quantity)` pairs.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ItemSpec {
    pub(crate) product_id: String,
    pub(crate) sizes: Vec<(String, String)>,
}

/// Parses `ID=SIZE:QTY[,SIZE:QTY...]`.
///
/// Sizes may contain `/`; the quantity follows the last `:` of each pair and
/// is parsed later with the usual clamping rules.
///
/// # Errors
///
/// Returns an error if the id or the size list is missing, or a pair has no
/// `:` separator.
pub(crate) fn parse_item(raw: &str) -> anyhow::Result<ItemSpec> {
    let (id, sizes) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("item '{raw}' must look like ID=SIZE:QTY"))?;
    let id = id.trim();
    if id.is_empty() {
        anyhow::bail!("item '{raw}' has no design id");
    }

    let sizes = sizes
        .split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            pair.rsplit_once(':')
                .map(|(size, qty)| (size.trim().to_string(), qty.trim().to_string()))
                .ok_or_else(|| anyhow::anyhow!("size entry '{pair}' in item '{raw}' needs SIZE:QTY"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if sizes.is_empty() {
        anyhow::bail!("item '{raw}' lists no sizes");
    }

    Ok(ItemSpec {
        product_id: id.to_string(),
        sizes,
    })
}

/// Add each item to the session's inquiry list and print the resulting link.
///
/// An item for the same design as an earlier one replaces its quantities.
/// If nothing ends up selected, the general greeting link is printed instead.
///
/// # Errors
///
/// Returns an error if any `--item` argument is malformed.
pub(crate) fn run_inquire(
    session: &mut Session,
    items: &[String],
    show_text: bool,
) -> anyhow::Result<()> {
    let specs = items
        .iter()
        .map(|raw| parse_item(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    for spec in &specs {
        let Some(product) = session.repository.get(&spec.product_id) else {
            tracing::warn!(product_id = %spec.product_id, "design not found; skipping item");
            continue;
        };

        let mut draft = QuantityDraft::for_product(product, None);
        for (size, qty) in &spec.sizes {
            if !draft.set_from_input(size, qty) {
                tracing::warn!(
                    product_id = %product.id,
                    size = %size,
                    "design is not offered in this size; skipping it"
                );
            }
        }

        if !draft.confirm(product, &mut session.inquiry) {
            tracing::warn!(product_id = %product.id, "no pieces selected; skipping item");
        }
    }

    for event in session.inquiry.drain_events() {
        if event == InquiryEvent::PanelOpened {
            tracing::debug!(designs = session.inquiry.len(), "selection panel opened");
        }
    }

    let price_visible = session.gate.is_unlocked();
    if session.inquiry.is_empty() {
        println!("nothing selected; sending a general inquiry instead");
    } else {
        println!("{:<14}{:<18}PIECES", "DESIGN", "CATEGORY");
        for entry in session.inquiry.entries() {
            println!(
                "{:<14}{:<18}{}",
                entry.product.design_number,
                entry.product.category,
                entry.total_pieces()
            );
        }
        println!(
            "\n{} designs, {} pieces\n",
            session.inquiry.len(),
            session.inquiry.grand_total_pieces()
        );
    }

    if show_text {
        println!(
            "{}\n",
            session
                .template
                .render_inquiry(session.inquiry.entries(), price_visible)
        );
    }
    let encoded = session
        .template
        .format_inquiry(session.inquiry.entries(), price_visible);
    println!("{}", session.link.with_text(&encoded));

    Ok(())
}

/// Print the inquiry link for a single design.
///
/// # Errors
///
/// Returns an error if no product has the given id.
pub(crate) fn run_ask(session: &Session, id: &str, show_text: bool) -> anyhow::Result<()> {
    let product = session
        .repository
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("design '{id}' not found"))?;
    let price_visible = session.gate.is_unlocked();

    if show_text {
        println!("{}\n", session.template.render_single(product, price_visible));
    }
    let encoded = session.template.format_single(product, price_visible);
    println!("{}", session.link.with_text(&encoded));
    Ok(())
}

/// Print the general contact links.
pub(crate) fn run_contact(session: &Session) {
    println!("chat:    {}", session.link.chat_url());
    println!(
        "inquiry: {}",
        session.link.with_text(&session.template.format_generic())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::bundled_session;

    #[test]
    fn inquire_builds_selection_from_items() {
        let mut session = bundled_session();
        let items = vec![
            "1=22/32:5,34/38:3".to_string(),
            "3=20/30:abc,32/40:4".to_string(),
            "1=34/38:2".to_string(),
            "999=20/30:1".to_string(),
            "4=XXL:6".to_string(),
        ];
        run_inquire(&mut session, &items, false).expect("items are well formed");

        assert_eq!(session.inquiry.len(), 2);
        let first = session.inquiry.quantities_for("1").expect("design 1 selected");
        assert_eq!(first.iter().collect::<Vec<_>>(), vec![("34/38", 2)]);
        assert_eq!(
            session.inquiry.quantities_for("3").map(|q| q.total()),
            Some(4)
        );
        assert!(!session.inquiry.contains("4"));
        assert!(session.inquiry.drain_events().is_empty());
    }

    #[test]
    fn repeated_item_replaces_earlier_sizes() {
        let mut session = bundled_session();
        let items = vec!["1=22/32:3".to_string(), "1=34/38:5".to_string()];
        run_inquire(&mut session, &items, false).expect("items are well formed");

        assert_eq!(session.inquiry.len(), 1);
        let quantities = session.inquiry.quantities_for("1").expect("design 1 selected");
        assert_eq!(quantities.iter().collect::<Vec<_>>(), vec![("34/38", 5)]);
        assert_eq!(session.inquiry.grand_total_pieces(), 5);
    }

    #[test]
    fn inquire_rejects_malformed_item() {
        let mut session = bundled_session();
        let items = vec!["1-22/32-5".to_string()];
        assert!(run_inquire(&mut session, &items, false).is_err());
        assert!(session.inquiry.is_empty());
    }

    #[test]
    fn ask_requires_known_design() {
        let session = bundled_session();
        assert!(run_ask(&session, "1", true).is_ok());
        assert!(run_ask(&session, "999", false).is_err());
    }

    #[test]
    fn parses_single_size() {
        let spec = parse_item("3=20/30:12").expect("valid item");
        assert_eq!(spec.product_id, "3");
        assert_eq!(spec.sizes, vec![("20/30".to_string(), "12".to_string())]);
    }

    #[test]
    fn parses_multiple_sizes_with_spaces() {
        let spec = parse_item(" 7 = 22/32:5 , 34/38: 3 ,").expect("valid item");
        assert_eq!(spec.product_id, "7");
        assert_eq!(
            spec.sizes,
            vec![
                ("22/32".to_string(), "5".to_string()),
                ("34/38".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn keeps_bad_quantities_for_later_clamping() {
        let spec = parse_item("3=20/30:lots").expect("valid item");
        assert_eq!(spec.sizes[0].1, "lots");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(parse_item("3").is_err());
        assert!(parse_item("=20/30:1").is_err());
        assert!(parse_item("3=").is_err());
        assert!(parse_item("3=20/30").is_err());
    }
}

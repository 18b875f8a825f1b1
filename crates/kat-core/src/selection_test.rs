use proptest::prelude::*;
use rust_decimal::Decimal;

use super::*;
use crate::products::Variant;

fn product(id: &str, sizes: &[&str]) -> Product {
    Product {
        id: id.to_string(),
        design_number: format!("D-{id}"),
        category: "Capri".to_string(),
        fabric_type: "Cotton Lycra".to_string(),
        style: "Core".to_string(),
        colors: vec![],
        is_featured: false,
        image_url: String::new(),
        hover_image_url: None,
        variants: sizes
            .iter()
            .map(|s| Variant {
                size: (*s).to_string(),
                price: Decimal::from(200),
            })
            .collect(),
    }
}

#[test]
fn all_zero_add_is_a_no_op() {
    let p = product("1", &["S", "M"]);
    let mut list = InquiryList::new();
    list.add(&p, [("S", 0), ("M", 0)]);
    assert!(list.is_empty());
    assert!(!list.contains("1"));
    assert!(!list.is_panel_open());
    assert!(list.drain_events().is_empty());
}

#[test]
fn negative_counts_are_dropped() {
    let p = product("1", &["S", "M"]);
    let mut list = InquiryList::new();
    list.add(&p, [("S", -4), ("M", 2)]);
    let q = list.quantities_for("1").expect("entry should exist");
    assert_eq!(q.get("S"), None);
    assert_eq!(q.get("M"), Some(2));
    assert_eq!(q.len(), 1);
}

#[test]
fn re_adding_replaces_quantities() {
    let p = product("1", &["S", "M"]);
    let mut list = InquiryList::new();
    list.add(&p, [("S", 3)]);
    list.add(&p, [("M", 5)]);

    assert_eq!(list.len(), 1);
    let q = list.quantities_for("1").expect("entry should exist");
    assert_eq!(q.iter().collect::<Vec<_>>(), vec![("M", 5)]);
}

#[test]
fn all_zero_re_add_keeps_existing_entry() {
    let p = product("1", &["S"]);
    let mut list = InquiryList::new();
    list.add(&p, [("S", 3)]);
    list.add(&p, [("S", 0)]);
    assert_eq!(list.quantities_for("1").map(SizeQuantities::total), Some(3));
}

#[test]
fn replaced_entry_keeps_its_position() {
    let a = product("a", &["S"]);
    let b = product("b", &["S"]);
    let mut list = InquiryList::new();
    list.add(&a, [("S", 1)]);
    list.add(&b, [("S", 1)]);
    list.add(&a, [("S", 9)]);
    let order: Vec<&str> = list.entries().iter().map(|e| e.product.id.as_str()).collect();
    assert_eq!(order, vec!["a", "b"]);
}

#[test]
fn quantities_follow_catalog_size_order() {
    let p = product("1", &["20/30", "22/32", "34/38"]);
    let mut list = InquiryList::new();
    list.add(&p, [("34/38", 2), ("XL", 1), ("20/30", 4)]);
    let sizes: Vec<&str> = list
        .quantities_for("1")
        .expect("entry should exist")
        .iter()
        .map(|(s, _)| s)
        .collect();
    assert_eq!(sizes, vec!["20/30", "34/38", "XL"]);
}

#[test]
fn remove_and_clear() {
    let mut list = InquiryList::new();
    list.add(&product("1", &["S"]), [("S", 1)]);
    list.add(&product("2", &["S"]), [("S", 2)]);

    list.remove("missing");
    assert_eq!(list.len(), 2);

    list.remove("1");
    assert!(!list.contains("1"));
    assert!(list.contains("2"));

    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.grand_total_pieces(), 0);
}

#[test]
fn totals() {
    let mut list = InquiryList::new();
    list.add(&product("1", &["S", "M"]), [("S", 3), ("M", 4)]);
    list.add(&product("2", &["S"]), [("S", 10)]);
    assert_eq!(list.entries()[0].total_pieces(), 7);
    assert_eq!(list.entries()[1].total_pieces(), 10);
    assert_eq!(list.grand_total_pieces(), 17);
}

#[test]
fn add_opens_panel_and_emits_event() {
    let mut list = InquiryList::new();
    list.add(&product("1", &["S"]), [("S", 1)]);
    assert!(list.is_panel_open());
    assert_eq!(list.drain_events(), vec![InquiryEvent::PanelOpened]);
    assert!(list.drain_events().is_empty());

    list.toggle_panel();
    assert!(!list.is_panel_open());
    list.toggle_panel();
    assert_eq!(
        list.drain_events(),
        vec![InquiryEvent::PanelClosed, InquiryEvent::PanelOpened]
    );
}

#[test]
fn parse_quantity_clamps_bad_input() {
    assert_eq!(parse_quantity("12"), 12);
    assert_eq!(parse_quantity(" 7 "), 7);
    assert_eq!(parse_quantity("+3"), 3);
    assert_eq!(parse_quantity("12pcs"), 12);
    assert_eq!(parse_quantity(""), 0);
    assert_eq!(parse_quantity("abc"), 0);
    assert_eq!(parse_quantity("-5"), 0);
    assert_eq!(parse_quantity("99999999999999"), u32::MAX);
}

#[test]
fn draft_is_seeded_from_product_sizes_and_existing_counts() {
    let p = product("1", &["S", "M", "L"]);
    let existing = SizeQuantities::from_input([("M", 4)]);
    let draft = QuantityDraft::for_product(&p, Some(&existing));
    assert_eq!(draft.product_id(), "1");
    assert_eq!(draft.get("S"), Some(0));
    assert_eq!(draft.get("M"), Some(4));
    assert_eq!(draft.get("XL"), None);
    assert_eq!(draft.total_pieces(), 4);
}

#[test]
fn draft_edits() {
    let p = product("1", &["S", "M"]);
    let mut draft = QuantityDraft::for_product(&p, None);
    assert!(!draft.can_confirm());

    assert!(draft.increment("S"));
    assert!(draft.increment("S"));
    assert!(draft.decrement("M"));
    assert_eq!(draft.get("M"), Some(0));
    assert!(draft.set_from_input("M", "oops"));
    assert_eq!(draft.get("M"), Some(0));
    assert!(draft.set_from_input("M", "6"));
    assert!(!draft.increment("XL"));

    assert_eq!(draft.total_pieces(), 8);
    assert!(draft.can_confirm());
}

#[test]
fn draft_confirm_commits_non_zero_sizes() {
    let p = product("1", &["S", "M"]);
    let mut list = InquiryList::new();
    let mut draft = QuantityDraft::for_product(&p, None);
    draft.set_from_input("M", "5");

    assert!(draft.confirm(&p, &mut list));
    let q = list.quantities_for("1").expect("entry should exist");
    assert_eq!(q.iter().collect::<Vec<_>>(), vec![("M", 5)]);
}

#[test]
fn empty_draft_does_not_confirm() {
    let p = product("1", &["S"]);
    let mut list = InquiryList::new();
    let draft = QuantityDraft::for_product(&p, None);
    assert!(!draft.confirm(&p, &mut list));
    assert!(list.is_empty());
}

#[test]
fn draft_for_other_product_does_not_confirm() {
    let p = product("1", &["S"]);
    let other = product("2", &["S"]);
    let mut list = InquiryList::new();
    let mut draft = QuantityDraft::for_product(&p, None);
    draft.increment("S");
    assert!(!draft.confirm(&other, &mut list));
    assert!(list.is_empty());
}

proptest! {
    #[test]
    fn grand_total_matches_sum_of_entries(
        rows in prop::collection::vec(prop::collection::vec(-5i64..50, 1..5), 0..12)
    ) {
        let mut list = InquiryList::new();
        let mut expected = 0u64;
        for (i, counts) in rows.iter().enumerate() {
            let sizes: Vec<String> = (0..counts.len()).map(|s| format!("S{s}")).collect();
            let size_refs: Vec<&str> = sizes.iter().map(String::as_str).collect();
            let p = product(&i.to_string(), &size_refs);
            list.add(&p, sizes.iter().cloned().zip(counts.iter().copied()));
            expected += counts
                .iter()
                .map(|&c| u64::try_from(c.max(0)).unwrap())
                .sum::<u64>();
        }

        let by_entry: u64 = list.entries().iter().map(SelectionEntry::total_pieces).sum();
        prop_assert_eq!(list.grand_total_pieces(), by_entry);
        prop_assert_eq!(list.grand_total_pieces(), expected);
        for entry in list.entries() {
            prop_assert!(entry.total_pieces() > 0);
        }
    }
}

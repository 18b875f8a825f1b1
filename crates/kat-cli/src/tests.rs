use clap::Parser;
use kat_core::SortKey;
use rust_decimal::Decimal;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["kat-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.partner_code.is_none());
}

#[test]
fn parses_list_defaults() {
    let cli = Cli::try_parse_from(["kat-cli", "list"]).expect("expected valid cli args");
    let Some(Commands::List(args)) = cli.command else {
        panic!("expected list command");
    };
    assert!(args.search.is_none());
    assert!(args.categories.is_empty());
    assert!(args.max_price.is_none());
    assert!(!args.featured);
    assert_eq!(args.sort, SortKey::PriorityDescending);
}

#[test]
fn parses_list_filters() {
    let cli = Cli::try_parse_from([
        "kat-cli",
        "list",
        "--search",
        "kd",
        "--category",
        "Capri",
        "--category",
        "Skirts",
        "--size-group",
        "22/32",
        "--fabric",
        "Rayon",
        "--max-price",
        "450.5",
        "--featured",
        "--sort",
        "price-desc",
    ])
    .expect("expected valid cli args");
    let Some(Commands::List(args)) = cli.command else {
        panic!("expected list command");
    };
    assert_eq!(args.search.as_deref(), Some("kd"));
    assert_eq!(args.categories, vec!["Capri", "Skirts"]);
    assert_eq!(args.size_groups, vec!["22/32"]);
    assert_eq!(args.fabrics, vec!["Rayon"]);
    assert_eq!(args.max_price, Some(Decimal::new(4505, 1)));
    assert!(args.featured);
    assert_eq!(args.sort, SortKey::PriceDescending);
}

#[test]
fn rejects_unknown_sort_key() {
    let result = Cli::try_parse_from(["kat-cli", "list", "--sort", "cheapest"]);
    assert!(result.is_err());
}

#[test]
fn rejects_non_numeric_max_price() {
    let result = Cli::try_parse_from(["kat-cli", "list", "--max-price", "cheap"]);
    assert!(result.is_err());
}

#[test]
fn partner_code_is_global() {
    let cli = Cli::try_parse_from(["kat-cli", "show", "3", "--partner-code", "secret"])
        .expect("expected valid cli args");
    assert_eq!(cli.partner_code.as_deref(), Some("secret"));
    assert!(matches!(cli.command, Some(Commands::Show { ref id }) if id == "3"));
}

#[test]
fn parses_inquire_items() {
    let cli = Cli::try_parse_from([
        "kat-cli",
        "inquire",
        "--item",
        "1=22/32:5",
        "--item",
        "3=20/30:2,32/40:4",
        "--show-text",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Inquire { ref items, show_text: true }) if items.len() == 2
    ));
}

#[test]
fn inquire_requires_an_item() {
    let result = Cli::try_parse_from(["kat-cli", "inquire"]);
    assert!(result.is_err());
}

#[test]
fn parses_ask_and_contact() {
    let cli = Cli::try_parse_from(["kat-cli", "ask", "5"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Ask { ref id, show_text: false }) if id == "5"
    ));

    let cli = Cli::try_parse_from(["kat-cli", "contact"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Contact)));
}

#[test]
fn parses_facets_and_showcase() {
    let cli = Cli::try_parse_from(["kat-cli", "facets"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Facets)));

    let cli = Cli::try_parse_from(["kat-cli", "showcase"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Showcase)));
}

#[test]
fn help_is_handled_by_the_parser() {
    let err = Cli::try_parse_from(["kat-cli", "--help"]).expect_err("help should short-circuit");
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

    let err = Cli::try_parse_from(["kat-cli", "inquire", "--help"])
        .expect_err("help should short-circuit");
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

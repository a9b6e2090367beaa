//! Command line arguments.
//!
//! The flags mirror the catalog's deep links: a product (optionally one of
//! its variants) can be opened directly, a category pre-selected, and the
//! login or dashboard screen reached on startup.

use std::path::PathBuf;

use clap::Parser;

/// Which screen to open at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StartPage {
    #[default]
    Catalog,
    Login,
    Dashboard,
}

#[derive(Debug, Default, Parser)]
#[command(name = "listino", version, about = "Catalogo prodotti per terminale")]
pub struct Args {
    /// Dataset file; when given, no fallback paths are tried.
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Fall back to the embedded demo dataset when nothing else loads.
    #[arg(long)]
    pub demo: bool,

    /// Pre-select a category filter.
    #[arg(long, value_name = "ID")]
    pub category: Option<String>,

    /// Open a product detail page directly.
    #[arg(long, value_name = "ID")]
    pub product: Option<String>,

    /// With --product, pre-select this variant row.
    #[arg(long, value_name = "CODE")]
    pub variant: Option<String>,

    /// With --product, open this variant's sub-page.
    #[arg(long, value_name = "CODE")]
    pub sub: Option<String>,

    /// Screen to show at startup.
    #[arg(long, value_enum, default_value_t = StartPage::Catalog)]
    pub page: StartPage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_link_flags_parse() {
        let args = Args::parse_from([
            "listino",
            "--demo",
            "--product",
            "GR-001",
            "--sub",
            "668/LITIO",
            "--page",
            "catalog",
        ]);
        assert!(args.demo);
        assert_eq!(args.product.as_deref(), Some("GR-001"));
        assert_eq!(args.sub.as_deref(), Some("668/LITIO"));
        assert_eq!(args.page, StartPage::Catalog);
    }

    #[test]
    fn defaults_are_empty() {
        let args = Args::parse_from(["listino"]);
        assert!(!args.demo);
        assert!(args.data.is_none());
        assert_eq!(args.page, StartPage::Catalog);
    }
}

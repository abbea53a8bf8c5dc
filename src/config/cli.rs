use crate::config::toml_config::AppConfig;
use crate::core::i18n::Language;
use crate::core::view::{AvailabilityFilter, CategoryFilter, SortOrder, ViewQuery};
use crate::utils::error::PickerError;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::str::FromStr;

#[derive(Debug, Clone, Parser)]
#[command(name = "supply-picker")]
#[command(about = "Browse a supply catalog, build a cart and export orders")]
pub struct CliConfig {
    /// TOML 配置檔
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true)]
    pub csv_url: Option<String>,

    #[arg(long, global = true)]
    pub output_path: Option<String>,

    /// en, es or ja
    #[arg(long, global = true)]
    pub language: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the catalog view
    List {
        #[arg(long, default_value = "")]
        search: String,

        /// all, cups, flavors, consumables, other
        #[arg(long, default_value = "all", value_parser = parse_tag::<CategoryFilter>)]
        category: CategoryFilter,

        /// all, in-stock, out-of-stock
        #[arg(long, default_value = "all", value_parser = parse_tag::<AvailabilityFilter>)]
        availability: AvailabilityFilter,

        /// name-asc, name-desc, price-asc, price-desc
        #[arg(long, default_value = "name-asc", value_parser = parse_tag::<SortOrder>)]
        sort: SortOrder,
    },

    /// Export the full catalog as CSV
    ExportCsv,

    /// Build a cart and write the order PDF
    Order {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        company: String,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        comments: String,

        /// SKU=QTY or ID=QTY, repeatable
        #[arg(long = "item", value_parser = parse_item_spec, required = true)]
        items: Vec<ItemSpec>,

        /// Also export the cart lines as CSV
        #[arg(long)]
        with_csv: bool,
    },

    /// Show or save the preferred language
    Language { code: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub key: String,
    pub quantity: u32,
}

fn parse_tag<T: FromStr<Err = PickerError>>(value: &str) -> Result<T, String> {
    value.parse().map_err(|e: PickerError| e.to_string())
}

/// `VAFR-001=3`
pub fn parse_item_spec(value: &str) -> anyhow::Result<ItemSpec> {
    let Some((key, quantity)) = value.split_once('=') else {
        bail!("expected KEY=QTY, got '{}'", value);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("missing item key in '{}'", value);
    }
    let quantity: u32 = quantity
        .trim()
        .parse()
        .with_context(|| format!("invalid quantity in '{}'", value))?;
    if quantity == 0 {
        bail!("quantity must be at least 1 in '{}'", value);
    }
    Ok(ItemSpec {
        key: key.to_string(),
        quantity,
    })
}

impl CliConfig {
    /// 命令列參數覆蓋配置檔
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(url) = &self.csv_url {
            config.source.csv_url = url.clone();
        }
        if let Some(path) = &self.output_path {
            config.export.output_path = path.clone();
        }
        if let Some(code) = &self.language {
            config.preferences.language = Some(code.clone());
        }
    }

    pub fn language_override(&self) -> Option<Language> {
        self.language.as_deref().and_then(Language::from_code)
    }
}

impl Command {
    pub fn view_query(&self) -> Option<ViewQuery> {
        match self {
            Command::List {
                search,
                category,
                availability,
                sort,
            } => Some(ViewQuery {
                search: search.clone(),
                category: *category,
                availability: *availability,
                sort: *sort,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;

    #[test]
    fn test_parse_item_spec() {
        assert_eq!(
            parse_item_spec("VAFR-001=3").unwrap(),
            ItemSpec {
                key: "VAFR-001".to_string(),
                quantity: 3
            }
        );
        assert!(parse_item_spec("VAFR-001").is_err());
        assert!(parse_item_spec("=2").is_err());
        assert!(parse_item_spec("VAFR-001=zero").is_err());
        assert!(parse_item_spec("VAFR-001=0").is_err());
    }

    #[test]
    fn test_parse_list_command() {
        let cli = CliConfig::try_parse_from([
            "supply-picker",
            "list",
            "--search",
            "torani",
            "--category",
            "flavors",
            "--sort",
            "price-desc",
        ])
        .unwrap();

        let query = cli.command.view_query().unwrap();
        assert_eq!(query.search, "torani");
        assert_eq!(query.category, CategoryFilter::Only(Category::Flavors));
        assert_eq!(query.sort, SortOrder::PriceDesc);
        assert_eq!(query.availability, AvailabilityFilter::All);
    }

    #[test]
    fn test_parse_order_command_with_globals() {
        let cli = CliConfig::try_parse_from([
            "supply-picker",
            "order",
            "--name",
            "Juan",
            "--email",
            "juan@example.com",
            "--item",
            "VAFR-001=2",
            "--item",
            "3=1",
            "--output-path",
            "/tmp/orders",
            "--language",
            "ja",
        ])
        .unwrap();

        match &cli.command {
            Command::Order { items, with_csv, .. } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].key, "3");
                assert!(!with_csv);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.export.output_path, "/tmp/orders");
        assert_eq!(config.language_override(), Some(Language::Ja));
        assert_eq!(cli.language_override(), Some(Language::Ja));
    }

    #[test]
    fn test_order_requires_items() {
        let result = CliConfig::try_parse_from([
            "supply-picker",
            "order",
            "--name",
            "Juan",
            "--email",
            "juan@example.com",
        ]);
        assert!(result.is_err());
    }
}

use clap::Parser;
use supply_picker::config::{CliConfig, Command};
use supply_picker::core::ConfigProvider;
use supply_picker::utils::error::{ErrorSeverity, PickerError, Result};
use supply_picker::utils::money::format_yen;
use supply_picker::utils::{logger, validation::Validate};
use supply_picker::{
    AppConfig, CatalogLoader, HttpCatalogSource, Language, LocalStorage, OrderForm,
    PreferenceStore, Session, Translations,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting supply-picker");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    // 驗證配置
    config.validate()?;

    let preferences = PreferenceStore::new(LocalStorage::new(config.state_dir()));

    if let Command::Language { code } = &cli.command {
        return language_command(code.as_deref(), &preferences).await;
    }

    let language = match config.language_override() {
        Some(language) => language,
        None => preferences.load_language().await,
    };
    let translations = Translations::for_language(language);

    let source = HttpCatalogSource::from_config(&config)?;
    let loader = CatalogLoader::new(source).with_price_backfill(config.backfill_prices());
    let load = loader.load(&translations).await;

    let mut session = Session::new(load, translations, config.export_settings());
    if let Some(notice) = session.notice() {
        eprintln!("⚠️  {}", notice);
    }

    let storage = LocalStorage::new(config.output_path());
    let today = chrono::Local::now().date_naive();
    let query = cli.command.view_query();

    match cli.command {
        Command::List { .. } => {
            if let Some(query) = query {
                session.set_query(query);
            }
            print_view(&session);
        }
        Command::ExportCsv => {
            let filename = session.export_catalog_csv(&storage, today).await?;
            println!("✅ {}", session.translations().export_success);
            println!("📁 {}", storage.full_path(&filename).display());
        }
        Command::Order {
            name,
            email,
            company,
            address,
            comments,
            items,
            with_csv,
        } => {
            for spec in &items {
                if !session.add_to_cart(&spec.key, spec.quantity) {
                    return Err(PickerError::ValidationError {
                        message: format!("Unknown product: {}", spec.key),
                    });
                }
            }

            let form = OrderForm {
                customer_name: name,
                customer_email: email,
                company_name: company,
                company_address: address,
                comments,
            };
            let filename = session.submit_order(&form, &storage, today).await?;
            println!("✅ {}", session.translations().order_success);
            println!("📁 {}", storage.full_path(&filename).display());
            println!("💴 {}", format_yen(session.cart().grand_total()));

            if with_csv {
                let csv_name = session.export_cart_csv(&storage, today).await?;
                println!("📁 {}", storage.full_path(&csv_name).display());
            }
        }
        Command::Language { .. } => {}
    }

    Ok(())
}

async fn language_command(code: Option<&str>, preferences: &PreferenceStore<LocalStorage>) -> Result<()> {
    match code {
        Some(code) => {
            let language = Language::from_code(code).ok_or_else(|| PickerError::ValidationError {
                message: format!("Unsupported language '{}'. Use en, es or ja", code),
            })?;
            preferences.save_language(language).await?;
            println!("✅ {}", language);
        }
        None => println!("{}", preferences.load_language().await),
    }
    Ok(())
}

fn print_view(session: &Session) {
    let translations = session.translations();
    let items = session.visible_items();

    if items.is_empty() {
        println!("{}", translations.no_products);
        return;
    }

    for item in items {
        println!(
            "{:<12} {:<40} {:>10}  {:<12} {}",
            item.sku,
            item.product_name,
            item.current_price,
            translations.category_name(item.category),
            if item.in_stock { "✓" } else { "✗" }
        );
    }
}

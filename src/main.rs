use clap::{CommandFactory, Parser, Subcommand};
use comfy_table::{Attribute, Cell, Table};
use inquire::{Confirm, DateSelect, Select, Text};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Local;
use metalbill::config::{self, Profile};
use metalbill::error::Result;
use metalbill::model::{InvoiceCurrency, InvoiceDraft, InvoiceTotals, LineItem};
use metalbill::{pdf, render, sheet, totals};

#[derive(Parser)]
#[command(name = "metalbill")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new invoice
    New,
    /// List the remote company directory
    Companies,
    /// Configure data directory and defaults
    Config,
    /// Open output folder
    Open,
}

fn main() {
    let cli = Cli::parse();

    let (settings, first_run) = match config::load_settings() {
        Some(settings) => (settings, false),
        None => (config::setup_config_wizard(), true),
    };
    let root = PathBuf::from(config::expand_home_dir(&settings.data_root));

    // First run seeds the default template and profile; afterwards 'config'
    // is the only command that re-seeds them.
    let init = if first_run {
        config::init_data_root(&root)
    } else {
        fs::create_dir_all(root.join("output"))
    };
    if let Err(e) = init {
        eprintln!("❌ Error: Failed to initialize data directory: {}", e);
        return;
    }

    if cli.command.is_none() {
        Cli::command().print_help().ok();
        return;
    }

    match cli.command.unwrap() {
        Commands::New => {
            let profile = config::load_profile(&root);
            new_invoice(&root, &profile);
        }
        Commands::Companies => {
            let profile = config::load_profile(&root);
            list_companies(&profile);
        }
        Commands::Config => {
            // the missing-settings branch above already ran the wizard and
            // seeded the data root on a first run
            if first_run {
                println!("✅ Data root ready: {}", root.display());
            } else {
                let settings = config::setup_config_wizard();
                let root = PathBuf::from(config::expand_home_dir(&settings.data_root));
                match config::init_data_root(&root) {
                    Ok(()) => println!("✅ Data root ready: {}", root.display()),
                    Err(e) => println!("❌ Failed to initialize data root: {}", e),
                }
            }
        }
        Commands::Open => open_output_folder(&root),
    }
}

// ==========================================
// Invoice wizard
// ==========================================

fn new_invoice(root: &Path, profile: &Profile) {
    let currency = ask_currency(profile);

    let company_default = company_info_default(profile);
    println!("💡 Tip: Use '\\n' for new lines in multi-line fields.");
    let company_info = prompt_multiline("Company Info:", &company_default);
    let customer_ref = prompt_multiline("Customer Reference:", &profile.customer_ref);
    let invoice_number = prompt_text("Invoice Number:", &profile.invoice_number);

    let invoice_date = match DateSelect::new("Invoice Date:")
        .with_default(Local::now().date_naive())
        .prompt()
    {
        Ok(d) => d,
        Err(_) => std::process::exit(0),
    };

    let bank_details = prompt_multiline("Bank Details:", &profile.bank_details);

    let items = enter_invoice_items(&currency, profile);
    if items.is_empty() {
        println!("❌ No items entered. Aborting.");
        return;
    }

    let totals = totals::compute(&items, &currency);
    let draft = InvoiceDraft {
        company_info,
        customer_ref,
        invoice_number,
        invoice_date,
        bank_details,
        items,
        currency,
    };

    if let Err(e) = generate(root, &draft, &totals) {
        println!("❌ {}", e);
    }
}

fn ask_currency(profile: &Profile) -> InvoiceCurrency {
    let label = match Select::new("Invoice Currency:", vec!["USD", "SAR"]).prompt() {
        Ok(choice) => choice,
        Err(_) => std::process::exit(0),
    };

    if label == "USD" {
        let sar_rate =
            prompt_positive_decimal("Dollar to SAR Rate:", &profile.sar_rate, Decimal::ONE);
        InvoiceCurrency::Usd { sar_rate }
    } else {
        InvoiceCurrency::Sar
    }
}

/// Offer the remote company directory; fetch or contract failures degrade to
/// the profile's manual-entry default.
fn company_info_default(profile: &Profile) -> String {
    match sheet::fetch_companies(&profile.company_sheet_url) {
        Ok(companies) if !companies.is_empty() => {
            let names: Vec<String> = companies.iter().map(|c| c.name.clone()).collect();
            match Select::new("Select a Company:", names).prompt() {
                Ok(choice) => companies
                    .iter()
                    .find(|c| c.name == choice)
                    .map(|c| format!("{}\n{}", c.name, c.address))
                    .unwrap_or_else(|| profile.company_info.clone()),
                Err(_) => std::process::exit(0),
            }
        }
        Ok(_) => {
            println!("⚠️  Company directory is empty. Enter company info manually.");
            profile.company_info.clone()
        }
        Err(e) => {
            println!("⚠️  Could not load company directory: {}", e);
            println!("   Enter company info manually.");
            profile.company_info.clone()
        }
    }
}

fn enter_invoice_items(currency: &InvoiceCurrency, profile: &Profile) -> Vec<LineItem> {
    let mut items = Vec::new();
    println!("\n--- Enter Invoice Items ---");
    println!("(Leave Description empty to finish)");

    loop {
        let desc = match Text::new("Description (leave empty to finish):")
            .with_placeholder(&profile.item_description)
            .prompt()
        {
            Ok(d) => d,
            Err(_) => std::process::exit(0),
        };
        if desc.trim().is_empty() {
            break;
        }

        let quantity =
            prompt_nonneg_decimal("Quantity:", &profile.item_quantity, Decimal::ZERO);

        let use_lme = match Confirm::new("Enable LME pricing for this item?")
            .with_default(false)
            .prompt()
        {
            Ok(v) => v,
            Err(_) => std::process::exit(0),
        };

        let item = if use_lme {
            let provision =
                prompt_nonneg_decimal("Provision LME Value:", "0.00", Decimal::ZERO);
            let percentage = prompt_lme_percentage();
            match LineItem::lme(desc, quantity, provision, percentage) {
                Ok(item) => item,
                Err(e) => {
                    println!("⚠️  {}. Skipping item.", e);
                    continue;
                }
            }
        } else {
            let rate = prompt_nonneg_decimal(
                &format!("Base Rate ({}):", currency.label()),
                &profile.item_rate,
                Decimal::ZERO,
            );
            LineItem::flat(desc, quantity, rate)
        };
        items.push(item);
    }
    items
}

fn prompt_lme_percentage() -> Decimal {
    let raw = prompt_text("LME Percentage (40.00 - 100.00):", "100.00");
    let min = Decimal::new(40, 0);
    match raw.trim().parse::<Decimal>() {
        Ok(value) if value < min => {
            println!("⚠️  Percentage below 40.00, clamping to 40.00.");
            min
        }
        Ok(value) if value > Decimal::ONE_HUNDRED => {
            println!("⚠️  Percentage above 100.00, clamping to 100.00.");
            Decimal::ONE_HUNDRED
        }
        Ok(value) => value,
        Err(_) => {
            println!("⚠️  Invalid percentage, using 100.00.");
            Decimal::ONE_HUNDRED
        }
    }
}

// ==========================================
// Generation
// ==========================================

fn generate(root: &Path, draft: &InvoiceDraft, totals: &InvoiceTotals) -> Result<()> {
    let html = render::render_invoice(&root.join("templates"), draft, totals)?;

    let output_dir = root.join("output");
    fs::create_dir_all(&output_dir)?;
    let html_path = output_dir.join("invoice.html");
    fs::write(&html_path, html)?;
    println!("📄 HTML written: {}", html_path.display());

    println!("\n🔨 Converting to PDF...");
    let pdf_path = output_dir.join("invoice.pdf");
    pdf::convert(&html_path, &pdf_path)?;

    println!("✅ PDF Generated: {}", pdf_path.display());
    open_and_reveal(&pdf_path);
    Ok(())
}

// ==========================================
// Company directory listing
// ==========================================

fn list_companies(profile: &Profile) {
    match sheet::fetch_companies(&profile.company_sheet_url) {
        Ok(companies) => {
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Company Name").add_attribute(Attribute::Bold),
                Cell::new("Company Address").add_attribute(Attribute::Bold),
            ]);
            for company in &companies {
                table.add_row(vec![Cell::new(&company.name), Cell::new(&company.address)]);
            }
            println!("{table}");
            println!("({} companies)", companies.len());
        }
        Err(e) => println!("❌ {}", e),
    }
}

// ==========================================
// Prompt helpers
// ==========================================

fn prompt_text(msg: &str, default: &str) -> String {
    match Text::new(msg).with_default(default).prompt() {
        Ok(v) => v,
        Err(_) => std::process::exit(0),
    }
}

/// Multi-line blocks are entered on one line with '\n' escapes; defaults are
/// shown the same way.
fn prompt_multiline(msg: &str, default: &str) -> String {
    prompt_text(msg, &default.replace('\n', "\\n")).replace("\\n", "\n")
}

fn prompt_positive_decimal(msg: &str, default: &str, fallback: Decimal) -> Decimal {
    let raw = prompt_text(msg, default);
    match raw.trim().parse::<Decimal>() {
        Ok(v) if v > Decimal::ZERO => v,
        Ok(_) => {
            println!("⚠️  Value must be positive, using {}.", fallback);
            fallback
        }
        Err(_) => {
            println!("⚠️  Invalid number, using {}.", fallback);
            fallback
        }
    }
}

fn prompt_nonneg_decimal(msg: &str, default: &str, fallback: Decimal) -> Decimal {
    let raw = prompt_text(msg, default);
    match raw.trim().parse::<Decimal>() {
        Ok(v) if v >= Decimal::ZERO => v,
        Ok(_) => {
            println!("⚠️  Value must not be negative, using {}.", fallback);
            fallback
        }
        Err(_) => {
            println!("⚠️  Invalid number, using {}.", fallback);
            fallback
        }
    }
}

// ==========================================
// Open folder / reveal helpers
// ==========================================

fn open_output_folder(root: &Path) {
    let output_dir = root.join("output");
    if !output_dir.exists() {
        println!("❌ No output directory found.");
        return;
    }
    println!("🚀 Opening: {}", output_dir.display());

    #[cfg(target_os = "macos")]
    Command::new("open").arg(&output_dir).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer").arg(&output_dir).spawn().ok();

    #[cfg(target_os = "linux")]
    Command::new("xdg-open").arg(&output_dir).spawn().ok();
}

fn open_and_reveal(path: &Path) {
    #[cfg(target_os = "macos")]
    Command::new("open").arg("-R").arg(path).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer")
        .arg(format!("/select,{}", path.to_string_lossy()))
        .spawn()
        .ok();

    #[cfg(target_os = "linux")]
    if let Some(parent) = path.parent() {
        Command::new("xdg-open").arg(parent).spawn().ok();
    }

    #[cfg(target_os = "macos")]
    Command::new("open").arg(path).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer").arg(path).spawn().ok();

    #[cfg(target_os = "linux")]
    Command::new("xdg-open").arg(path).spawn().ok();
}

//! Settings, seller profile, and data-root initialization.

use directories::{BaseDirs, ProjectDirs};
use inquire::Text;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::render;

// Embedded defaults, written out to the data root when absent.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/invoice.html");
const DEFAULT_PROFILE: &str = include_str!("../profile.toml");

#[derive(Debug, Serialize, Deserialize)]
pub struct AppSettings {
    pub data_root: String,
}

/// Reusable seller defaults offered by the wizard prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub company_info: String,
    pub customer_ref: String,
    pub invoice_number: String,
    pub bank_details: String,
    pub sar_rate: String,
    pub item_description: String,
    pub item_quantity: String,
    pub item_rate: String,
    pub company_sheet_url: String,
}

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "metalbill", "app") {
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).ok();
        }
        return config_dir.join("settings.toml");
    }
    PathBuf::from("settings.toml")
}

pub fn load_settings() -> Option<AppSettings> {
    load_settings_from(&get_config_path())
}

pub fn load_settings_from(path: &Path) -> Option<AppSettings> {
    if !path.exists() {
        return None;
    }
    let content = fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

pub fn save_settings_to(path: &Path, settings: &AppSettings) -> std::io::Result<()> {
    let toml_str = toml::to_string_pretty(settings)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(path, toml_str)
}

pub fn setup_config_wizard() -> AppSettings {
    println!("\n⚙️  --- Configuration Setup ---");
    let current = load_settings();
    let default_val = current
        .map(|s| s.data_root)
        .unwrap_or_else(|| "~/Documents/Invoices".to_string());

    println!("📂 Opening folder picker...");
    let picked_path = rfd::FileDialog::new()
        .set_title("Select Root Data Directory")
        .pick_folder();

    let new_root = if let Some(path) = picked_path {
        path.to_string_lossy().to_string()
    } else {
        println!("❌ No folder selected. Falling back to manual input.");
        match Text::new("Enter Root Data Directory:").with_default(&default_val).prompt() {
            Ok(v) => v,
            Err(_) => std::process::exit(0),
        }
    };

    let settings = AppSettings { data_root: new_root };

    if let Err(e) = save_settings_to(&get_config_path(), &settings) {
        println!("❌ Failed to save settings: {}", e);
    } else {
        println!("✅ Settings saved.");
    }
    settings
}

pub fn expand_home_dir(path: &str) -> String {
    if path.starts_with("~") {
        if let Some(base_dirs) = BaseDirs::new() {
            let home = base_dirs.home_dir().to_string_lossy();
            return path.replacen("~", &home, 1);
        }
    }
    path.to_string()
}

/// Load `profile.toml` from the data root, seeding the embedded defaults
/// when the file is absent. A profile that fails to parse is reported and
/// the embedded defaults are used for this run.
pub fn load_profile(root: &Path) -> Profile {
    let path = root.join("profile.toml");
    if !path.exists() {
        println!("✨ Initializing default profile...");
        if let Err(e) = fs::write(&path, DEFAULT_PROFILE) {
            println!("⚠️  Failed to write profile.toml: {}", e);
        }
        return embedded_profile();
    }

    let parsed = fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
    match parsed {
        Ok(profile) => profile,
        Err(e) => {
            println!("⚠️  Could not read profile.toml ({}). Using built-in defaults.", e);
            embedded_profile()
        }
    }
}

fn embedded_profile() -> Profile {
    toml::from_str(DEFAULT_PROFILE).expect("embedded profile.toml is valid")
}

/// Create the data-root layout and seed the default template and profile.
/// Generation never writes the template itself; it aborts when it is gone.
pub fn init_data_root(root: &Path) -> std::io::Result<()> {
    let template_dir = root.join("templates");
    fs::create_dir_all(&template_dir)?;
    fs::create_dir_all(root.join("output"))?;

    let template_path = template_dir.join(render::TEMPLATE_NAME);
    if !template_path.exists() {
        println!("✨ Initializing default template...");
        fs::write(&template_path, DEFAULT_TEMPLATE)?;
    }

    let profile_path = root.join("profile.toml");
    if !profile_path.exists() {
        println!("✨ Initializing default profile...");
        fs::write(&profile_path, DEFAULT_PROFILE)?;
    }
    Ok(())
}

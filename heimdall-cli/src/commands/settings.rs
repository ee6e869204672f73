//! Settings command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use heimdall_core::domain::settings::Settings;
use serde_json::Value;

use crate::config::Config;
use crate::render::print_settings;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show all preferences
    Show,
    /// Set a single preference
    Set {
        /// Preference name, e.g. refreshInterval
        key: String,
        /// New value
        value: String,
    },
    /// Restore the defaults
    Reset,
}

/// Handle settings commands
pub fn handle_settings_command(command: SettingsCommands, config: &Config) -> Result<()> {
    let store = config.settings_store();

    match command {
        SettingsCommands::Show => {
            print_settings(&store.get());
        }
        SettingsCommands::Set { key, value } => {
            store
                .update(|mut settings| {
                    let parsed = parse_setting_value(&value, settings.get(&key));
                    settings.insert(key.clone(), parsed);
                    settings
                })
                .context("Failed to save settings")?;
            println!("{} {} = {}", "✓".green(), key.cyan(), value);
        }
        SettingsCommands::Reset => {
            store
                .set(Settings::defaults())
                .context("Failed to save settings")?;
            println!("{}", "✓ Settings reset to defaults".green());
        }
    }

    Ok(())
}

/// Interprets a command-line value for a preference
///
/// Keeps the type of the value it replaces: a string stays a string (so
/// `refreshInterval` remains `"30"`-style), booleans and numbers are parsed
/// when they parse. New keys become a boolean or integer if the text looks
/// like one, otherwise a string.
fn parse_setting_value(raw: &str, current: Option<&Value>) -> Value {
    let as_bool = || raw.parse::<bool>().ok().map(Value::from);
    let as_int = || raw.parse::<i64>().ok().map(Value::from);
    let as_text = || Value::from(raw);

    match current {
        Some(Value::String(_)) => as_text(),
        Some(Value::Bool(_)) => as_bool().unwrap_or_else(as_text),
        Some(Value::Number(_)) => as_int().unwrap_or_else(as_text),
        _ => as_bool().or_else(as_int).unwrap_or_else(as_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_existing_type() {
        assert_eq!(parse_setting_value("60", Some(&json!("30"))), json!("60"));
        assert_eq!(parse_setting_value("false", Some(&json!(true))), json!(false));
        assert_eq!(parse_setting_value("50", Some(&json!(20))), json!(50));
    }

    #[test]
    fn test_parse_falls_back_to_text() {
        assert_eq!(parse_setting_value("maybe", Some(&json!(true))), json!("maybe"));
        assert_eq!(parse_setting_value("ten", Some(&json!(20))), json!("ten"));
    }

    #[test]
    fn test_parse_new_keys() {
        assert_eq!(parse_setting_value("true", None), json!(true));
        assert_eq!(parse_setting_value("7", None), json!(7));
        assert_eq!(parse_setting_value("cards", None), json!("cards"));
    }
}

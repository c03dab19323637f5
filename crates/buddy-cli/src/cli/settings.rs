//! Settings verbs: `buddy model`, `buddy endpoint`, `buddy config`.

use console::style;

use buddy_infra::settings::SettingsStore;

use crate::state::AppState;

/// Save a new default model.
pub async fn set_model(store: &SettingsStore, name: &str, json: bool) -> anyhow::Result<()> {
    let settings = store.save_model(name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        println!(
            "  {} Model set to {}",
            style("✓").green().bold(),
            style(&settings.model).cyan()
        );
    }
    Ok(())
}

/// Save a new backend endpoint.
pub async fn set_endpoint(store: &SettingsStore, url: &str, json: bool) -> anyhow::Result<()> {
    let settings = store.save_endpoint(url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        println!(
            "  {} Endpoint set to {}",
            style("✓").green().bold(),
            style(&settings.endpoint).cyan()
        );
    }
    Ok(())
}

/// Print the effective settings.
pub fn show_config(state: &AppState, json: bool) -> anyhow::Result<()> {
    let path = state.store.path().display().to_string();

    if json {
        let output = serde_json::json!({
            "model": state.settings.model,
            "endpoint": state.settings.endpoint,
            "settings_file": path,
            "settings_file_exists": state.store.path().exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("  {} v{}", style("buddy").cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!();
    println!("  {} {}", style(format!("{:<10}", "Model")).bold(), state.settings.model);
    println!("  {} {}", style(format!("{:<10}", "Endpoint")).bold(), state.settings.endpoint);
    println!("  {} {}", style(format!("{:<10}", "File")).bold(), style(&path).dim());
    println!();
    Ok(())
}

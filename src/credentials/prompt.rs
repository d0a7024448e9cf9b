use anyhow::{Context, Result};

/// Prompts user to enter a TBA read API key (input hidden)
pub fn prompt_for_key() -> Result<String> {
    eprintln!("The Blue Alliance read API key required.");
    eprintln!("Create one at: https://www.thebluealliance.com/account");
    eprintln!();

    let key = rpassword::prompt_password("Enter key: ").context("Failed to read key from stdin")?;

    let key = key.trim();

    if key.is_empty() {
        anyhow::bail!("Key cannot be empty");
    }

    Ok(key.to_string())
}

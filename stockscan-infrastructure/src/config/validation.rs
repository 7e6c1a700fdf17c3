use anyhow::{anyhow, Result};

pub fn validate_table_name(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("store_table is empty"));
    }
    let mut chars = value.chars();
    let starts_well = chars
        .next()
        .map(|c| c.is_ascii_lowercase() || c == '_')
        .unwrap_or(false);
    if !starts_well || !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return Err(anyhow!(
            "store_table '{}' must be a lowercase identifier",
            value
        ));
    }
    Ok(())
}

pub fn validate_store_url(value: &str) -> Result<()> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(anyhow!("store_url must start with http:// or https://"));
    }
    Ok(())
}

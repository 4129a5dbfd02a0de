use anyhow::Result;

/// Prints the JSON schema of `config.toml`.
fn main() -> Result<()> {
    let schema = leercopy::Config::json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

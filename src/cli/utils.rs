use serde_json::Value;

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
            if !data.is_null() && data != &Value::String(String::new()) {
                println!("{}", serde_json::to_string_pretty(data)?);
            }
        }
    }
    Ok(())
}

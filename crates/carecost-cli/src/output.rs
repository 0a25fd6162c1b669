use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(data: &Value, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(data)?
            } else {
                serde_json::to_string(data)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(data)?,
    }

    Ok(())
}

fn render_table(data: &Value) -> Result<(), CliError> {
    match data {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{key}:");
                        let nested = serde_json::to_string_pretty(value)?;
                        for line in nested.lines() {
                            println!("  {line}");
                        }
                    }
                    other => println!("{key}: {other}"),
                }
            }
        }
        other => {
            let payload = serde_json::to_string_pretty(other)?;
            println!("{payload}");
        }
    }

    Ok(())
}

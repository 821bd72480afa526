use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    #[test]
    fn json_is_pretty_and_raw_is_single_line() {
        let value = Example {
            id: "ld-1",
            value: 7,
        };

        let pretty = render(&value, OutputFormat::Json).expect("json render should work");
        assert!(pretty.contains('\n'));

        let raw = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!raw.contains('\n'));

        let parsed: serde_json::Value = serde_json::from_str(&raw).expect("json should parse");
        assert_eq!(parsed["id"], "ld-1");
        assert_eq!(parsed["value"], 7);
    }
}

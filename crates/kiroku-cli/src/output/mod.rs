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
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Sample {
        id: u32,
        title: &'static str,
    }

    #[test]
    fn raw_is_single_line_json() {
        let rendered = render(&Sample { id: 1, title: "Root" }, OutputFormat::Raw).unwrap();
        assert_eq!(rendered, r#"{"id":1,"title":"Root"}"#);
    }

    #[test]
    fn json_is_pretty_printed() {
        let rendered = render(&Sample { id: 1, title: "Root" }, OutputFormat::Json).unwrap();
        assert_eq!(rendered, "{\n  \"id\": 1,\n  \"title\": \"Root\"\n}");
    }
}

//! Schema command - fetch an extraction schema file.

use colored::Colorize;
use refgrid::{RefgridConfig, SchemaClient};

pub fn run(
    workspace: String,
    name: String,
    version_id: Option<String>,
    api_url: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = RefgridConfig::from_env();
    if let Some(url) = api_url {
        config = config.with_api_url(url);
    }

    let client = SchemaClient::new(&config)?;
    if verbose {
        eprintln!("GET {}", client.schema_url(&workspace, &name));
    }

    let (schema, metadata) = client.fetch(&workspace, &name, version_id.as_deref())?;

    let show = |value: Option<&str>| value.unwrap_or("-").to_string();
    eprintln!("{} {}", "Schema".cyan().bold(), metadata.schema_name.white());
    eprintln!("  etag:          {}", show(metadata.etag.as_deref()));
    eprintln!("  version-id:    {}", show(metadata.version_id.as_deref()));
    eprintln!("  version-tag:   {}", show(metadata.version_tag.as_deref()));
    eprintln!(
        "  last-modified: {}",
        metadata
            .last_modified
            .map(|d| d.to_rfc3339())
            .unwrap_or_else(|| "-".to_string())
    );

    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

//! Config command handlers.

use crate::config::{
    discover_config_file, generate_full_example_config, generate_json_schema, load_or_default, user_config_dir,
};
use crate::pipeline::exit_codes;
use anyhow::{Context, Result};
use std::path::Path;

/// File written by `config init`.
const INIT_FILE_NAME: &str = ".apidiff.yaml";

/// Print the effective configuration (defaults merged with the config file).
pub fn run_config_show(explicit: Option<&Path>) -> Result<i32> {
    let (config, loaded_from) = load_or_default(explicit)?;
    if let Some(path) = &loaded_from {
        eprintln!("# Loaded from: {}", path.display());
    } else {
        eprintln!("# No config file found; showing defaults");
    }
    let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
    print!("{yaml}");
    Ok(exit_codes::SUCCESS)
}

/// Print the config search paths and the file that would be used.
pub fn run_config_path(explicit: Option<&Path>) -> Result<i32> {
    let search_paths = [
        std::env::current_dir().ok(),
        user_config_dir(),
        dirs::home_dir(),
    ];
    eprintln!("Config file search paths (in order, after the git root):");
    for path in search_paths.into_iter().flatten() {
        eprintln!("  {}", path.display());
    }
    eprintln!();
    eprintln!("Recognized file names:");
    for name in [".apidiff.yaml", ".apidiff.yml", "apidiff.yaml", "apidiff.yml"] {
        eprintln!("  {name}");
    }
    eprintln!();
    match discover_config_file(explicit) {
        Some(path) => eprintln!("Active config file: {}", path.display()),
        None => eprintln!("No config file found."),
    }
    Ok(exit_codes::SUCCESS)
}

/// Write a commented example config to the current directory.
pub fn run_config_init() -> Result<i32> {
    let target = std::env::current_dir()
        .context("cannot determine current directory")?
        .join(INIT_FILE_NAME);
    if target.exists() {
        anyhow::bail!("{} already exists. Remove it first to re-initialize.", target.display());
    }
    std::fs::write(&target, generate_full_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    eprintln!("Created {}", target.display());
    Ok(exit_codes::SUCCESS)
}

/// Print the JSON Schema of the config format, or write it to `output`.
pub fn run_config_schema(output: Option<&Path>) -> Result<i32> {
    let schema = generate_json_schema();
    match output {
        Some(path) => {
            std::fs::write(path, &schema).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Schema written to {}", path.display());
        }
        None => println!("{schema}"),
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_schema_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        assert_eq!(run_config_schema(Some(&path)).unwrap(), exit_codes::SUCCESS);
        let schema: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(schema["properties"]["comparison"].is_object());
    }
}

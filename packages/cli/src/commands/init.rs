use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config_json = serde_json::to_string_pretty(&Config::default())?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Run: geomark inspect <dir>");
    println!("  2. Run: geomark session --load <file.geojson>");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        init(InitArgs { force: false }, dir.path()).unwrap();

        let written = Config::load(dir.path(), None).unwrap();
        assert_eq!(written, Config::default());
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, r#"{ "hitTolerance": 3 }"#).unwrap();

        init(InitArgs { force: false }, dir.path()).unwrap();
        assert_eq!(Config::load(dir.path(), None).unwrap().hit_tolerance, 3.0);

        init(InitArgs { force: true }, dir.path()).unwrap();
        assert_eq!(Config::load(dir.path(), None).unwrap(), Config::default());
    }
}

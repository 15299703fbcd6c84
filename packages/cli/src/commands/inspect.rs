use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use geomark_collection::{parse_collection, FeatureCollection, MarkerTemplate};
use geomark_surface::{to_lon_lat, Extent, Projected};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// File or directory to inspect (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// What a single document contains
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub features: usize,
    pub geometry_types: BTreeMap<String, usize>,
    pub markers: usize,
    /// `[min_lon, min_lat, max_lon, max_lat]`
    pub bounds: Option<[f64; 4]>,
}

pub fn summarize(collection: &FeatureCollection, markers: &MarkerTemplate) -> Summary {
    let mut geometry_types = BTreeMap::new();
    for feature in collection.iter() {
        let name = feature
            .geometry
            .as_ref()
            .map(|g| g.type_name().to_string())
            .unwrap_or_else(|| "null".to_string());
        *geometry_types.entry(name).or_insert(0) += 1;
    }

    let bounds = Extent::of_collection(collection).map(|extent| {
        let min = to_lon_lat(Projected::new(extent.min_x, extent.min_y));
        let max = to_lon_lat(Projected::new(extent.max_x, extent.max_y));
        [min.lon, min.lat, max.lon, max.lat]
    });

    Summary {
        features: collection.len(),
        geometry_types,
        markers: collection.iter().filter(|f| markers.matches(f)).count(),
        bounds,
    }
}

pub fn inspect(args: InspectArgs, cwd: &Path, config: &Config) -> Result<()> {
    let root = cwd.join(&args.path);
    if !root.exists() {
        return Err(anyhow!("Path does not exist: {}", root.display()));
    }

    let files = find_documents(&root, config);
    if files.is_empty() {
        println!(
            "{} No files matching {} found",
            "⚠️".yellow(),
            config.extensions.join(", ")
        );
        return Ok(());
    }

    let markers = config.marker_template();
    let mut failed = 0;

    for file in &files {
        let relative = file.strip_prefix(cwd).unwrap_or(file);
        let summary = fs::read_to_string(file)
            .map_err(anyhow::Error::from)
            .and_then(|raw| {
                let collection = parse_collection(&raw, &file.to_string_lossy())?;
                Ok(summarize(&collection, &markers))
            });

        match summary {
            Ok(summary) => print_summary(relative, &summary),
            Err(e) => {
                failed += 1;
                eprintln!("  {} {} - {}", "✗".red(), relative.display(), e);
            }
        }
    }

    println!();
    println!(
        "Inspected {} files, {} failed",
        files.len(),
        if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().green()
        }
    );
    Ok(())
}

/// `root` itself when it is a file, otherwise every accepted file below it
pub fn find_documents(root: &Path, config: &Config) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && config.accepts(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

fn print_summary(path: &Path, summary: &Summary) {
    println!(
        "  {} {} ({} features, {} markers)",
        "✓".green(),
        path.display().to_string().bright_white(),
        summary.features,
        summary.markers
    );
    for (name, count) in &summary.geometry_types {
        println!("      {:<20} {}", name, count);
    }
    if let Some([min_lon, min_lat, max_lon, max_lat]) = summary.bounds {
        println!(
            "      extent [{:.5}, {:.5}] - [{:.5}, {:.5}]",
            min_lon, min_lat, max_lon, max_lat
        );
    }
}

use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use geomark_collection::{serialize_pretty, Coordinate};
use geomark_editor::{ClickEvent, ClickOutcome, ModeController, Pixel, SaveOutcome, SubscriptionId};
use geomark_surface::HeadlessSurface;
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Document to load before running the script
    #[arg(short, long)]
    pub load: Option<PathBuf>,

    /// Command script (reads stdin when omitted)
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Print the committed collection as GeoJSON when done
    #[arg(short, long)]
    pub print: bool,
}

/// One line of a session script
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Load(PathBuf),
    Edit,
    View,
    Save,
    Click(Pixel),
    ClickGeo(Coordinate),
    Status,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("`{0}` is not a number")]
    InvalidNumber(String),
}

/// Parse a script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let command = match (name, args.as_slice()) {
        ("load", []) => return Err(ScriptError::Usage("load <file>")),
        // Paths may contain spaces
        ("load", _) => ScriptCommand::Load(PathBuf::from(line["load".len()..].trim())),
        ("edit", []) => ScriptCommand::Edit,
        ("view", []) => ScriptCommand::View,
        ("save", []) => ScriptCommand::Save,
        ("status", []) => ScriptCommand::Status,
        ("click", [x, y]) => ScriptCommand::Click(Pixel::new(number(x)?, number(y)?)),
        ("click", _) => return Err(ScriptError::Usage("click <x> <y>")),
        ("click-geo", [lon, lat]) => {
            ScriptCommand::ClickGeo(Coordinate::new(number(lon)?, number(lat)?))
        }
        ("click-geo", _) => return Err(ScriptError::Usage("click-geo <lon> <lat>")),
        ("edit", _) | ("view", _) | ("save", _) | ("status", _) => {
            return Err(ScriptError::Usage("edit | view | save | status take no arguments"))
        }
        (other, _) => return Err(ScriptError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn number(word: &str) -> Result<f64, ScriptError> {
    word.parse()
        .map_err(|_| ScriptError::InvalidNumber(word.to_string()))
}

/// A controller on a headless surface, driven by script commands
pub struct Session<'a, W: Write> {
    controller: ModeController<HeadlessSurface>,
    config: &'a Config,
    cwd: PathBuf,
    out: W,
}

impl<'a, W: Write> Session<'a, W> {
    pub fn new(config: &'a Config, cwd: &Path, out: W) -> Self {
        Self {
            controller: ModeController::new(
                HeadlessSurface::new(config.surface_options()),
                config.controller_options(),
            ),
            config,
            cwd: cwd.to_path_buf(),
            out,
        }
    }

    /// Run every line of `input`. Bad lines and bad documents are reported
    /// and skipped; only output failures abort.
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        for (index, line) in input.lines().enumerate() {
            let line = line.context("Cannot read script")?;
            match parse_line(&line) {
                Ok(Some(command)) => self.execute(command)?,
                Ok(None) => {}
                Err(e) => writeln!(self.out, "{} line {}: {}", "✗".red(), index + 1, e)?,
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, command: ScriptCommand) -> io::Result<()> {
        debug!(?command, "script command");
        match command {
            ScriptCommand::Load(path) => self.load_file(&path),
            ScriptCommand::Edit => {
                self.controller.enter_edit();
                writeln!(self.out, "mode: {}", self.controller.mode())
            }
            ScriptCommand::View => {
                if let Some(id) = self.controller.return_to_view() {
                    writeln!(self.out, "discarded {}", id)?;
                }
                writeln!(self.out, "mode: {}", self.controller.mode())
            }
            ScriptCommand::Save => match self.controller.save() {
                SaveOutcome::NothingLoaded => {
                    writeln!(self.out, "{} nothing loaded", "⚠️".yellow())
                }
                SaveOutcome::Unchanged => writeln!(self.out, "saved (no changes)"),
                SaveOutcome::Committed => writeln!(
                    self.out,
                    "{} saved, {} features",
                    "✓".green(),
                    self.controller.committed().map_or(0, |c| c.len())
                ),
            },
            ScriptCommand::Click(pixel) => {
                let clicks = self.controller.surface().click(pixel);
                self.dispatch(clicks)
            }
            ScriptCommand::ClickGeo(at) => {
                let clicks = self.controller.surface().click_at(at);
                self.dispatch(clicks)
            }
            ScriptCommand::Status => self.status(),
        }
    }

    pub fn load_file(&mut self, path: &Path) -> io::Result<()> {
        let full = self.cwd.join(path);
        if !self.config.accepts(&full) {
            return writeln!(
                self.out,
                "{} {} is not a {} file",
                "✗".red(),
                path.display(),
                self.config.extensions.join(" / ")
            );
        }

        let raw = match fs::read_to_string(&full) {
            Ok(raw) => raw,
            Err(e) => {
                return writeln!(self.out, "{} Cannot read {}: {}", "✗".red(), path.display(), e)
            }
        };

        match self.controller.load(&raw, &full.to_string_lossy()) {
            Ok(()) => writeln!(
                self.out,
                "{} Loaded {} ({} features)",
                "✓".green(),
                path.display(),
                self.controller.committed().map_or(0, |c| c.len())
            ),
            Err(e) => writeln!(
                self.out,
                "{} Could not load {}: {}",
                "✗".red(),
                path.display(),
                e
            ),
        }
    }

    /// Write the committed collection as GeoJSON
    pub fn print_committed(&mut self) -> Result<()> {
        match self.controller.committed() {
            Some(committed) => {
                let json = serialize_pretty(committed)?;
                writeln!(self.out, "{}", json)?;
            }
            None => writeln!(self.out, "{} nothing loaded", "⚠️".yellow())?,
        }
        Ok(())
    }

    pub fn controller(&self) -> &ModeController<HeadlessSurface> {
        &self.controller
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn dispatch(&mut self, clicks: Vec<(SubscriptionId, ClickEvent)>) -> io::Result<()> {
        for (subscription, event) in clicks {
            match self.controller.handle_click(subscription, event) {
                ClickOutcome::Placed {
                    feature,
                    evicted: Some(evicted),
                } => writeln!(
                    self.out,
                    "placed {} at [{}, {}] (replaced {})",
                    feature, event.geo.lon, event.geo.lat, evicted
                )?,
                ClickOutcome::Placed { feature, .. } => writeln!(
                    self.out,
                    "placed {} at [{}, {}]",
                    feature, event.geo.lon, event.geo.lat
                )?,
                ClickOutcome::PopupShown(popup) => writeln!(
                    self.out,
                    "popup {}: {}",
                    popup.feature,
                    popup.content.bright_white()
                )?,
                ClickOutcome::PopupCleared => writeln!(self.out, "popup cleared")?,
                ClickOutcome::Ignored => writeln!(self.out, "click ignored")?,
            }
        }
        Ok(())
    }

    fn status(&mut self) -> io::Result<()> {
        let controller = &self.controller;
        let count = |c: Option<&geomark_collection::FeatureCollection>| {
            c.map_or_else(|| "-".to_string(), |c| c.len().to_string())
        };
        let viewport = controller.surface().viewport();
        let center = viewport.center_coordinate();

        writeln!(self.out, "mode: {}", controller.mode())?;
        writeln!(
            self.out,
            "pending: {}",
            controller
                .pending()
                .map_or_else(|| "-".to_string(), |f| f.id.to_string())
        )?;
        writeln!(self.out, "committed: {}", count(controller.committed()))?;
        writeln!(self.out, "working: {}", count(controller.working()))?;
        writeln!(
            self.out,
            "unsaved: {}",
            if controller.has_unsaved_changes() { "yes" } else { "no" }
        )?;
        if let Some(popup) = controller.popup() {
            writeln!(self.out, "popup: {} ({})", popup.content, popup.feature)?;
        }
        writeln!(
            self.out,
            "viewport: [{:.5}, {:.5}] zoom {:.2}",
            center.lon,
            center.lat,
            viewport.zoom()
        )
    }
}

pub fn session(args: SessionArgs, cwd: &Path, config: &Config) -> Result<()> {
    let stdout = io::stdout();
    let mut session = Session::new(config, cwd, stdout.lock());

    if let Some(path) = &args.load {
        session.load_file(path)?;
    }

    match &args.script {
        Some(path) => {
            let file = fs::File::open(cwd.join(path))
                .with_context(|| format!("Cannot open script {}", path.display()))?;
            session.run(BufReader::new(file))?;
        }
        None => session.run(io::stdin().lock())?,
    }

    if args.print {
        session.print_committed()?;
    }
    Ok(())
}

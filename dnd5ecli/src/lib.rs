use std::{
  fs::{self, File},
  io::Write,
  path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use dnd5e::{bindings, ConfigOverlay, Dnd5eConfig};

#[derive(Parser, Debug)]
#[command(name = "dnd5e-config", about = "Inspect and check 5e rules configuration")]
pub struct Opts {
  /// YAML or JSON overlay merged over the defaults, in the order given.
  #[arg(long = "overlay", value_name = "FILE")]
  pub overlays: Vec<PathBuf>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
  /// Print the whole configuration.
  Dump {
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
  },
  /// Print one entry of a table, by host field name and key.
  Lookup { table: String, key: String },
  /// Check the configuration and list every problem found.
  Validate,
  /// List the host field names.
  Tables,
  /// Write TypeScript declarations.
  Bindings {
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
  Json,
  Yaml,
}

pub fn read_overlay(path: &Path) -> anyhow::Result<ConfigOverlay> {
  let text = fs::read_to_string(path).context(format!("Reading overlay {path:?}"))?;
  let overlay = match path.extension().and_then(|e| e.to_str()) {
    Some("json") => ConfigOverlay::from_json_str(&text),
    _ => ConfigOverlay::from_yaml_str(&text),
  };
  overlay.context(format!("Parsing overlay {path:?}"))
}

/// The defaults with every overlay merged in, unchecked.
pub fn merge_overlays(paths: &[PathBuf]) -> anyhow::Result<Dnd5eConfig> {
  let mut config = Dnd5eConfig::default();
  for path in paths {
    let touched = config.merge_overlay(read_overlay(path)?);
    debug!(event = "overlay-loaded", path = ?path, tables = ?touched);
  }
  Ok(config)
}

pub fn load_config(paths: &[PathBuf]) -> anyhow::Result<Dnd5eConfig> {
  let config = merge_overlays(paths)?;
  config.validate()?;
  Ok(config)
}

pub fn run<W: Write>(opts: Opts, out: &mut W) -> anyhow::Result<()> {
  let Opts { overlays, command } = opts;
  info!(event = "run", command = ?command, overlays = overlays.len());
  match command {
    Command::Dump { format } => {
      let config = load_config(&overlays)?;
      match format {
        Format::Json => serde_json::to_writer_pretty(&mut *out, &config)?,
        Format::Yaml => serde_yaml::to_writer(&mut *out, &config)?,
      }
      writeln!(out)?;
    }
    Command::Lookup { table, key } => {
      let config = load_config(&overlays)?;
      let value = config.lookup_value(&table, &key)?;
      writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    }
    Command::Validate => {
      let violations = merge_overlays(&overlays)?.violations();
      if !violations.is_empty() {
        for violation in violations.iter() {
          writeln!(out, "{violation}")?;
        }
        return Err(anyhow!("Found {} problems in the configuration", violations.len()));
      }
      writeln!(out, "Configuration is valid")?;
    }
    Command::Tables => {
      for name in load_config(&overlays)?.table_names()? {
        writeln!(out, "{name}")?;
      }
    }
    Command::Bindings { out: Some(path) } => {
      let mut file = File::create(&path).context(format!("Creating {path:?}"))?;
      bindings::write_bindings(&mut file)?;
      info!(event = "bindings-written", path = ?path);
    }
    Command::Bindings { out: None } => bindings::write_bindings(out)?,
  }
  Ok(())
}

#[cfg(test)]
mod test {
  use std::path::PathBuf;

  use tempfile::tempdir;

  use super::*;

  fn t_run(args: &[&str]) -> (anyhow::Result<()>, String) {
    let opts = Opts::try_parse_from(std::iter::once("dnd5e-config").chain(args.iter().copied()))
      .unwrap();
    let mut out = vec![];
    let result = run(opts, &mut out);
    (result, String::from_utf8(out).unwrap())
  }

  fn t_write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
  }

  #[test]
  fn parses_overlays_before_command() {
    let opts =
      Opts::try_parse_from(["dnd5e-config", "--overlay", "a.yaml", "--overlay", "b.json", "tables"])
        .unwrap();
    assert_eq!(opts.overlays, vec![PathBuf::from("a.yaml"), PathBuf::from("b.json")]);
    assert_eq!(opts.command, Command::Tables);
  }

  #[test]
  fn lookup_default_entry() {
    let (result, out) = t_run(&["lookup", "skills", "ste"]);
    result.unwrap();
    assert_eq!(out, "\"Stealth\"\n");
  }

  #[test]
  fn lookup_unknown_table() {
    let (result, _) = t_run(&["lookup", "nope", "x"]);
    assert!(result.unwrap_err().to_string().contains("nope"));
  }

  #[test]
  fn overlays_apply_in_order() {
    let dir = tempdir().unwrap();
    let first = t_write(dir.path(), "first.yaml", "currencies:\n  gp: Crowns\n");
    let second = t_write(dir.path(), "second.json", r#"{"currencies": {"gp": "Sovereigns"}}"#);
    let config = load_config(&[first, second]).unwrap();
    assert_eq!(config.currencies.lookup_str("gp").unwrap(), "Sovereigns");
  }

  #[test]
  fn validate_lists_problems() {
    let dir = tempdir().unwrap();
    let path = t_write(dir.path(), "bad.yaml", "CHARACTER_EXP_LEVELS: [0, 300, 200]\n");
    let path = path.to_str().unwrap();
    let (result, out) = t_run(&["--overlay", path, "validate"]);
    assert!(result.is_err());
    assert!(!out.is_empty());
    let (result, _) = t_run(&["--overlay", path, "tables"]);
    assert!(result.is_err());
  }

  #[test]
  fn validate_defaults() {
    let (result, out) = t_run(&["validate"]);
    result.unwrap();
    assert_eq!(out, "Configuration is valid\n");
  }

  #[test]
  fn dump_yaml_uses_host_names() {
    let (result, out) = t_run(&["dump", "--format", "yaml"]);
    result.unwrap();
    assert!(out.contains("SPELL_SLOT_TABLE:"));
    assert!(out.contains("consumableTypes:"));
  }

  #[test]
  fn bindings_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.ts");
    let (result, out) = t_run(&["bindings", "--out", path.to_str().unwrap()]);
    result.unwrap();
    assert!(out.is_empty());
    assert!(fs::read_to_string(&path).unwrap().contains("export interface Dnd5eConfig"));
  }

  #[test]
  fn missing_overlay_file() {
    let (result, _) = t_run(&["--overlay", "/nonexistent/overlay.yaml", "tables"]);
    assert!(format!("{:?}", result.unwrap_err()).contains("Reading overlay"));
  }
}

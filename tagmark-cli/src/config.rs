//! Settings file and command line

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use tagmark_core::{DEFAULT_TAG_COLOR, FALLBACK_MARK_COLOR};

#[derive(Debug, Parser)]
#[command(name = "tagmark", version, about = "Tag spans of text with named colors")]
pub struct Args {
    /// Text file to submit for annotation at startup
    pub file: Option<PathBuf>,

    /// Register a tag at startup (repeatable)
    #[arg(long = "tag", value_name = "NAME=COLOR", value_parser = parse_tag_arg)]
    pub tags: Vec<TagPreset>,

    /// Settings file to read instead of ~/.tagmark/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Color offered for new tags
    #[arg(long, value_name = "COLOR")]
    pub default_color: Option<String>,
}

/// A tag registered before the session starts
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TagPreset {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub default_color: String,
    pub mark_fallback_color: String,
    pub log_filter: String,
    pub tags: Vec<TagPreset>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            mark_fallback_color: FALLBACK_MARK_COLOR.to_string(),
            log_filter: "info".to_string(),
            tags: Vec::new(),
        }
    }
}

impl Settings {
    /// Flags win over the file; `--tag` presets come after file presets
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(color) = &args.default_color {
            self.default_color = color.clone();
        }
        self.tags.extend(args.tags.iter().cloned());
    }
}

/// Read settings from `path`. A missing file gives the defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Failed to parse config: {}", path.display()))
}

fn default_color() -> String {
    DEFAULT_TAG_COLOR.to_string()
}

fn parse_tag_arg(raw: &str) -> Result<TagPreset, String> {
    let (name, color) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=COLOR, got \"{}\"", raw))?;
    let color = if color.is_empty() {
        default_color()
    } else {
        color.to_string()
    };
    Ok(TagPreset {
        name: name.to_string(),
        color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_color, "#ffcc00");
        assert_eq!(settings.mark_fallback_color, "#a6e22d");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r##"
log_filter = "tagmark_core=debug"

[[tags]]
name = "PERSON"
color = "#ff0000"

[[tags]]
name = "PLACE"
"##
        )
        .unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.log_filter, "tagmark_core=debug");
        assert_eq!(settings.default_color, "#ffcc00");
        assert_eq!(
            settings.tags,
            vec![
                TagPreset { name: "PERSON".into(), color: "#ff0000".into() },
                TagPreset { name: "PLACE".into(), color: "#ffcc00".into() },
            ]
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_color = [").unwrap();
        assert!(load_settings(file.path()).is_err());
    }

    #[test]
    fn test_args_override_file() {
        let args = Args::parse_from([
            "tagmark",
            "notes.txt",
            "--tag",
            "ORG=#0000ff",
            "--tag",
            "MISC=",
            "--default-color",
            "#123456",
        ]);
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));

        let mut settings = Settings {
            tags: vec![TagPreset { name: "PERSON".into(), color: "#ff0000".into() }],
            ..Settings::default()
        };
        settings.apply_args(&args);

        assert_eq!(settings.default_color, "#123456");
        let names: Vec<_> = settings.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["PERSON", "ORG", "MISC"]);
        assert_eq!(settings.tags[2].color, "#ffcc00");
    }

    #[test]
    fn test_tag_arg_needs_separator() {
        assert!(parse_tag_arg("PERSON").is_err());
        assert_eq!(
            parse_tag_arg("A=B=C").unwrap(),
            TagPreset { name: "A".into(), color: "B=C".into() }
        );
    }
}

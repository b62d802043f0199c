//! Reading records, preferences and caption logs from disk

use crate::RecordArgs;
use anyhow::{bail, Context, Result};
use cuesync_panel::{Preferences, Record};
use std::{fs, path::Path};

/// A line of a caption log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    /// Cue text as the player reported it, possibly empty
    Cue(String),
    /// Switch the transcript language
    Language(String),
}

const LANGUAGE_DIRECTIVE: &str = "#lang";

/// Read a UTF-8 text file
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Parse records from JSON: one object or an array of objects
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    if json.trim_start().starts_with('[') {
        serde_json::from_str(json).context("invalid record array")
    } else {
        let record: Record = serde_json::from_str(json).context("invalid record object")?;
        Ok(vec![record])
    }
}

/// Load the record selected by the arguments
pub fn load_record(args: &RecordArgs) -> Result<Record> {
    let json = read_text(&args.record)?;
    let mut records = parse_records(&json)
        .with_context(|| format!("failed to parse {}", args.record.display()))?;
    if args.index >= records.len() {
        bail!(
            "record index {} out of range: {} holds {} record(s)",
            args.index,
            args.record.display(),
            records.len()
        );
    }
    Ok(records.swap_remove(args.index))
}

/// Load preferences, defaults when no file is given
pub fn load_preferences(path: Option<&Path>) -> Result<Preferences> {
    let Some(path) = path else {
        return Ok(Preferences::default());
    };
    let json = read_text(path)?;
    serde_json::from_str(&json)
        .with_context(|| format!("invalid preferences in {}", path.display()))
}

/// Split a caption log into cue and directive lines
#[must_use]
pub fn parse_cue_log(log: &str) -> Vec<LogLine> {
    log.lines()
        .map(|line| {
            let trimmed = line.trim();
            match trimmed.strip_prefix(LANGUAGE_DIRECTIVE) {
                Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                    LogLine::Language(rest.trim().to_string())
                }
                _ => LogLine::Cue(trimmed.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_from_object_or_array() {
        let single = parse_records(r#"{"Transcript": "Hi."}"#).unwrap();
        assert_eq!(single.len(), 1);

        let many = parse_records(r#" [{"Notion": "a"}, {"Notion": "b"}]"#).unwrap();
        assert_eq!(many[1].get("Notion"), Some("b"));

        assert!(parse_records("not json").is_err());
    }

    #[test]
    fn cue_log_directives() {
        assert_eq!(
            parse_cue_log("quick brown fox\n\n#lang fr\n#language\n#lang"),
            vec![
                LogLine::Cue("quick brown fox".to_string()),
                LogLine::Cue(String::new()),
                LogLine::Language("fr".to_string()),
                LogLine::Cue("#language".to_string()),
                LogLine::Language(String::new()),
            ]
        );
    }
}

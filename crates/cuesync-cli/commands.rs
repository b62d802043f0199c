//! Subcommand implementations
//!
//! Every command writes to the given writer so tests can capture output.

use crate::{
    input::{load_preferences, load_record, parse_cue_log, read_text, LogLine},
    Cli, Commands, OutputFormat, RecordArgs,
};
use anyhow::{Context, Result};
use cuesync_core::{explain_cue, ChunkIndex, MatchResult, RangeTier, ScoringWeights, WordRange};
use cuesync_panel::{MemorySurface, PanelSession};
use serde::Serialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

/// Run a parsed command line
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Commands::Chunks { transcript, format } => chunks(&read_text(transcript)?, *format, out),
        Commands::Match {
            transcript,
            cues,
            format,
        } => match_cues(&read_text(transcript)?, cues, *format, out),
        Commands::Languages { source } => languages(source, out),
        Commands::Replay {
            source,
            cues,
            format,
        } => replay(source, &read_text(cues)?, *format, out),
        Commands::Html { source, output } => html(source, output.as_deref(), out),
        Commands::Export { source, dir } => {
            let path = export(source, dir)?;
            writeln!(out, "{}", path.display())?;
            Ok(())
        }
    }
}

/// Print the chunks of a transcript
pub fn chunks(transcript: &str, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let index = ChunkIndex::build(transcript);
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &index)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for chunk in index.chunks() {
                writeln!(out, "{}\t{}\t{}", chunk.index, chunk.words.len(), chunk.text)?;
            }
        }
    }
    Ok(())
}

/// One matched cue with its diagnostics
#[derive(Debug, Clone, Serialize)]
struct MatchReport<'a> {
    cue: &'a str,
    chunk_index: Option<usize>,
    word_range: Option<WordRange>,
    tier: Option<RangeTier>,
    score: Option<f64>,
}

/// Explain which chunk each cue lands on
pub fn match_cues(
    transcript: &str,
    cues: &[String],
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let index = ChunkIndex::build(transcript);
    let weights = ScoringWeights::default();

    let reports: Vec<MatchReport<'_>> = cues
        .iter()
        .map(|cue| {
            let details = explain_cue(cue, &index, &weights);
            MatchReport {
                cue: cue.as_str(),
                chunk_index: details.map(|d| d.result.chunk_index),
                word_range: details.and_then(|d| d.result.word_range),
                tier: details.map(|d| d.tier),
                score: details.map(|d| d.score.value()),
            }
        })
        .collect();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &reports)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for report in &reports {
                match (report.chunk_index, report.tier, report.score) {
                    (Some(chunk), Some(tier), Some(score)) => writeln!(
                        out,
                        "{}\t{}\t{:?}\t{score}",
                        report.cue,
                        describe(&MatchResult {
                            chunk_index: chunk,
                            word_range: report.word_range,
                        }),
                        tier
                    )?,
                    _ => writeln!(out, "{}\tno match", report.cue)?,
                }
            }
        }
    }
    Ok(())
}

fn describe(result: &MatchResult) -> String {
    match result.word_range {
        Some(range) => format!("chunk {} words {range}", result.chunk_index),
        None => format!("chunk {}", result.chunk_index),
    }
}

fn open_session(source: &RecordArgs) -> Result<PanelSession<MemorySurface>> {
    let preferences = load_preferences(source.prefs.as_deref())?;
    let record = load_record(source)?;

    let mut session = PanelSession::new(MemorySurface::new()).with_preferences(preferences);
    if let Some(lang) = &source.lang {
        session.set_language_override(lang);
    }
    session.open_record(record);
    info!(
        language = ?session.transcript_language(),
        chunks = session.index().len(),
        "record opened"
    );
    Ok(session)
}

/// List transcript languages and subtitle options
pub fn languages(source: &RecordArgs, out: &mut dyn Write) -> Result<()> {
    let session = open_session(source)?;
    let transcripts = session.transcripts();

    writeln!(out, "transcripts: {}", transcripts.languages().join(", "))?;
    let offset = session.start_offset_s();
    if offset > 0.0 {
        writeln!(out, "start offset: {offset}s")?;
    }
    for option in transcripts.subtitle_options() {
        if option.url.is_empty() {
            writeln!(out, "subtitle\t{}\t{}", option.code, option.label)?;
        } else {
            writeln!(out, "subtitle\t{}\t{}\t{}", option.code, option.label, option.url)?;
        }
    }
    Ok(())
}

/// One replayed caption log line
#[derive(Debug, Clone, Serialize)]
struct ReplayStep {
    line: usize,
    cue: String,
    language: Option<String>,
    result: Option<MatchResult>,
}

/// Feed a caption log through a panel session
pub fn replay(
    source: &RecordArgs,
    log: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let mut session = open_session(source)?;
    let mut steps = Vec::new();

    for (number, line) in parse_cue_log(log).into_iter().enumerate() {
        match line {
            LogLine::Language(language) => session.set_language_override(&language),
            LogLine::Cue(cue) => {
                let result = session.on_cue_change(&cue);
                steps.push(ReplayStep {
                    line: number + 1,
                    cue,
                    language: session.transcript_language().map(str::to_string),
                    result,
                });
            }
        }
    }

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &steps)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for step in &steps {
                let outcome = step.result.as_ref().map_or_else(|| "cleared".to_string(), describe);
                let language = step.language.as_deref().unwrap_or("-");
                writeln!(out, "{}\t{language}\t{}\t{outcome}", step.line, step.cue)?;
            }
        }
    }
    Ok(())
}

/// Render the transcript HTML to a file or the writer
pub fn html(source: &RecordArgs, output: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let session = open_session(source)?;
    let html = session.transcript_html();
    match output {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => writeln!(out, "{html}")?,
    }
    Ok(())
}

/// Write the plain-text download into a directory, returning its path
pub fn export(source: &RecordArgs, dir: &Path) -> Result<PathBuf> {
    let session = open_session(source)?;
    let export = session.export_text();
    if export.contents.is_empty() {
        anyhow::bail!("record has no transcript to export");
    }

    let path = dir.join(&export.file_name);
    fs::write(&path, &export.contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = export.contents.len(), "transcript exported");
    Ok(path)
}

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::FiltersConfig;
use crate::filter::BoolFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Filter clause (repeatable): NAME, not-NAME, =true, =false, !=true, !=false
    #[arg(short, long = "filter", value_name = "CLAUSE", allow_hyphen_values = true)]
    pub filters: Vec<String>,

    /// Filter configuration file (YAML)
    #[arg(short, long, env = "BOOLFILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Subjects to test: true, false or missing (read from stdin if omitted)
    #[arg(value_name = "SUBJECT")]
    pub subjects: Vec<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum OutputFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "jsonl", alias = "json")]
    Jsonl,
}

/// Observed state of the filtered property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Value(bool),
    Missing,
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Subject::Value(true)),
            "false" => Ok(Subject::Value(false)),
            "missing" => Ok(Subject::Missing),
            _ => Err(format!("invalid subject: {value}")),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Value(value) => write!(f, "{}", value),
            Subject::Missing => write!(f, "missing"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    #[serde(serialize_with = "serialize_display")]
    pub subject: Subject,
    pub matched: bool,
}

fn serialize_display<S: serde::Serializer>(
    subject: &Subject,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(subject)
}

pub fn evaluate(filter: &BoolFilter, subject: Subject) -> Verdict {
    let matched = match subject {
        Subject::Value(value) => filter.filter(value),
        Subject::Missing => filter.match_if_key_missing(),
    };
    Verdict { subject, matched }
}

pub fn build_filter(cli: &Cli) -> Result<BoolFilter> {
    let config = match &cli.config {
        Some(path) => FiltersConfig::load(path)?,
        None => FiltersConfig::default(),
    };
    let clause_count = config.filters.len() + cli.filters.len();
    let filter = config.into_filter(&cli.filters)?;

    tracing::info!("Filter: {} clause(s), accepting {}", clause_count, filter);
    if filter.is_empty() {
        tracing::warn!("Filter: no clauses given; only missing keys will match");
    }
    Ok(filter)
}

pub fn parse_subjects<I, S>(inputs: I) -> Result<Vec<Subject>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .filter(|input| !input.as_ref().trim().is_empty())
        .map(|input| {
            input
                .as_ref()
                .parse::<Subject>()
                .map_err(anyhow::Error::msg)
                .context("CLI: Could not parse subject")
        })
        .collect()
}

pub fn read_subjects(reader: impl BufRead) -> Result<Vec<Subject>> {
    let lines = reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .context("CLI: Failed to read subjects from stdin")?;
    parse_subjects(lines)
}

pub fn write_verdict(out: &mut impl Write, format: OutputFormat, verdict: &Verdict) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let label = if verdict.matched { "match" } else { "no-match" };
            writeln!(out, "{}\t{}", verdict.subject, label)?;
        }
        OutputFormat::Jsonl => {
            serde_json::to_writer(&mut *out, verdict)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Evaluate every subject and write one verdict per line. Returns the
/// number of matches.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<usize> {
    let filter = build_filter(cli)?;

    let subjects = if cli.subjects.is_empty() {
        read_subjects(std::io::stdin().lock())?
    } else {
        parse_subjects(&cli.subjects)?
    };

    let mut match_count = 0;
    for subject in subjects {
        let verdict = evaluate(&filter, subject);
        tracing::debug!("Subject {} -> matched={}", subject, verdict.matched);
        if verdict.matched {
            match_count += 1;
        }
        write_verdict(out, cli.format, &verdict).context("CLI: Failed to write output")?;
    }

    Ok(match_count)
}

//! CLI argument definitions for the catalog browser.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mediadive",
    version,
    about = "MediaDive - Browse microbial growth media, solutions and ingredients",
    long_about = "Browse a MediaDive data snapshot from the command line.\n\n\
                  Reads the published JSON collections from a data directory,\n\
                  groups media that share a description and resolves recipe\n\
                  ingredients by name."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Data directory (default: $MEDIADIVE_DATA_DIR, then ./data).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table", global = true)]
    pub format: OutputFormatArg,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List media with their canonical ids.
    Media(ListArgs),

    /// Show a medium with its recipe and known strains.
    Medium(IdArgs),

    /// List reusable solutions.
    Solutions(ListArgs),

    /// Show a solution and its recipe.
    Solution(IdArgs),

    /// List chemical ingredients.
    Ingredients(ListArgs),

    /// Show an ingredient and its reference data.
    Ingredient(IdArgs),

    /// List strain and species names.
    Strains(ListArgs),

    /// Show the media a strain grows on.
    Strain(NameArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Media(_) => "media",
            Command::Medium(_) => "medium",
            Command::Solutions(_) => "solutions",
            Command::Solution(_) => "solution",
            Command::Ingredients(_) => "ingredients",
            Command::Ingredient(_) => "ingredient",
            Command::Strains(_) => "strains",
            Command::Strain(_) => "strain",
        }
    }
}

#[derive(Parser)]
pub struct ListArgs {
    /// Show only rows whose KEY column contains TEXT (case-insensitive).
    ///
    /// Repeat to combine filters; a row must match all of them.
    #[arg(long = "filter", value_name = "KEY=TEXT", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
}

#[derive(Parser)]
pub struct IdArgs {
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Parser)]
pub struct NameArgs {
    /// Strain or species name, exactly as listed by `strains`.
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=TEXT, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing column key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_values_keep_their_text() {
        assert_eq!(
            parse_filter("name= broth").unwrap(),
            ("name".to_string(), " broth".to_string())
        );
        assert_eq!(
            parse_filter("formula=a=b").unwrap(),
            ("formula".to_string(), "a=b".to_string())
        );
        assert!(parse_filter("name").is_err());
        assert!(parse_filter("=x").is_err());
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mediadive",
            "media",
            "--filter",
            "name=agar",
            "--filter",
            "source=DSMZ",
            "--format",
            "json",
            "--data-dir",
            "/tmp/data",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormatArg::Json);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/data")));
        let Command::Media(args) = cli.command else {
            panic!("expected media command");
        };
        assert_eq!(args.filters.len(), 2);
        assert_eq!(args.filters[1], ("source".to_string(), "DSMZ".to_string()));
    }
}

//! Parse definition files or C sources and print their trees and diagnostics.

mod config;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use cdef_syntax::{EntryPoint, SyntaxParser};
use clap::Parser;
use tracing::{debug, info};

use crate::render::Format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Entry {
    /// Definition file: header, `---`, C declarations.
    Def,
    /// C translation unit.
    C,
    /// Single C expression.
    Expr,
    /// Single C compound statement.
    Block,
}

impl From<Entry> for EntryPoint {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Def => Self::DefinitionFile,
            Entry::C => Self::TranslationUnit,
            Entry::Expr => Self::Expression,
            Entry::Block => Self::Block,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "cdef-dump",
    about = "Print the syntax tree and diagnostics of definition files and C sources"
)]
struct Args {
    /// Start rule. Defaults to `def` for `.def` files and `c` otherwise.
    #[arg(long, value_enum)]
    entry: Option<Entry>,
    /// Parser limits file. Defaults to `cdef.toml` in the working directory.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value = "tree")]
    format: Format,
    /// Files to parse.
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn entry_for(path: &Path, explicit: Option<Entry>) -> EntryPoint {
    match explicit {
        Some(entry) => entry.into(),
        None if path.extension().is_some_and(|ext| ext == "def") => EntryPoint::DefinitionFile,
        None => EntryPoint::TranslationUnit,
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let root = std::env::current_dir().context("failed to read the working directory")?;
    let config = config::load(args.config.as_deref(), &root);
    debug!(?config, "parser limits");
    let parser = SyntaxParser::new(config);

    let mut failed = 0usize;
    for path in &args.files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let entry = entry_for(path, args.entry);
        let parse = parser.parse(&text, entry);

        print!("{}", render::render(&parse, args.format));
        let name = path.display().to_string();
        for error in parse.errors() {
            eprintln!("{}", render::diagnostic(&name, &text, error));
        }
        if !parse.ok() {
            failed += 1;
        }
    }

    if failed > 0 {
        info!("{failed} of {} file(s) had errors", args.files.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_extension() {
        assert_eq!(
            entry_for(Path::new("zlib.def"), None),
            EntryPoint::DefinitionFile
        );
        assert_eq!(
            entry_for(Path::new("zlib.h"), None),
            EntryPoint::TranslationUnit
        );
        assert_eq!(
            entry_for(Path::new("zlib.def"), Some(Entry::Expr)),
            EntryPoint::Expression
        );
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "cdef-dump",
            "--entry",
            "block",
            "--format",
            "sexp",
            "a.c",
        ])
        .unwrap();
        assert_eq!(args.entry, Some(Entry::Block));
        assert_eq!(args.format, Format::Sexp);
        assert_eq!(args.files, vec![PathBuf::from("a.c")]);
        assert!(Args::try_parse_from(["cdef-dump"]).is_err());
    }
}

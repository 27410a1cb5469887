use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use lnx_column::{
    ColumnConfig,
    IntColumn,
    IntPredicate,
    MissingTokens,
    RoaringBitmap,
};
use tracing::info;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Display the size, aggregates and cardinality of a column.
    Stats {
        #[command(flatten)]
        input: IngestOptions,
    },
    /// Display the row ordinals matching a predicate.
    Filter {
        #[command(flatten)]
        input: IngestOptions,
        #[arg(value_enum)]
        /// The predicate to evaluate against each cell.
        predicate: PredicateKind,
        #[arg(long, allow_negative_numbers = true)]
        /// The operand for comparison predicates.
        value: Option<i32>,
    },
    /// Display the column one cell per line, missing cells are blank.
    Print {
        #[command(flatten)]
        input: IngestOptions,
        #[arg(long, value_enum)]
        /// Sort the column before printing.
        sort: Option<SortOrder>,
    },
}

#[derive(Debug, clap::Args)]
/// Options for reading a column from a text file.
pub struct IngestOptions {
    /// The file to ingest, each line is a single cell.
    path: PathBuf,
    #[arg(long, default_value = "value")]
    /// The name of the column, this is included in any ingestion errors.
    name: String,
    #[arg(long = "missing-token", env = "LNX_MISSING_TOKENS", value_delimiter = ',')]
    /// The tokens which represent a missing value.
    ///
    /// Defaults to `NaN`, `*`, `NA` and `null`. Empty lines are always missing.
    missing_tokens: Vec<String>,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum PredicateKind {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    Positive,
    Negative,
    NonNegative,
    Zero,
    Even,
    Odd,
    Missing,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Commands {
    /// Executes the command
    pub fn execute(self) -> Result<()> {
        let stdout = io::stdout().lock();

        match self {
            Commands::Stats { input } => {
                let column = ingest(&input)?;
                write_stats(&column, stdout)?;
            },
            Commands::Filter {
                input,
                predicate,
                value,
            } => {
                let column = ingest(&input)?;
                let rows = select(&column, predicate, value)?;
                info!(column = column.name(), matches = rows.len(), "Filtered column");
                write_rows(&rows, stdout)?;
            },
            Commands::Print { input, sort } => {
                let column = ingest(&input)?;
                let column = match sort {
                    None => column,
                    Some(SortOrder::Asc) => column.sort_ascending(),
                    Some(SortOrder::Desc) => column.sort_descending(),
                };
                column.write_values(stdout)?;
            },
        }

        Ok(())
    }
}

/// Reads the file into a new column, one cell per line.
fn ingest(options: &IngestOptions) -> Result<IntColumn> {
    let text = std::fs::read_to_string(&options.path)
        .with_context(|| format!("Read {}", options.path.display()))?;

    let tokens = if options.missing_tokens.is_empty() {
        MissingTokens::default()
    } else {
        MissingTokens::new(options.missing_tokens.iter().map(String::as_str))
    };
    let config = ColumnConfig::builder()
        .missing_indicators(Arc::new(tokens))
        .build();

    let mut column = IntColumn::with_config(options.name.as_str(), Arc::new(config));
    for (line_no, line) in text.lines().enumerate() {
        column
            .add_cell(Some(line))
            .with_context(|| format!("Ingest line {}", line_no + 1))?;
    }
    column.compact().context("Compact column")?;

    info!(
        column = column.name(),
        path = %options.path.display(),
        rows = column.len(),
        custom_tokens = !options.missing_tokens.is_empty(),
        "Ingested column"
    );

    Ok(column)
}

fn select(
    column: &IntColumn,
    kind: PredicateKind,
    value: Option<i32>,
) -> Result<RoaringBitmap> {
    let operand =
        || value.with_context(|| format!("The `{kind:?}` predicate requires a `--value`"));

    let predicate = match kind {
        PredicateKind::Missing => return Ok(column.is_missing()),
        PredicateKind::Lt => IntPredicate::LessThan(operand()?),
        PredicateKind::Gt => IntPredicate::GreaterThan(operand()?),
        PredicateKind::Le => IntPredicate::LessThanOrEqual(operand()?),
        PredicateKind::Ge => IntPredicate::GreaterThanOrEqual(operand()?),
        PredicateKind::Eq => IntPredicate::Equal(operand()?),
        PredicateKind::Ne => IntPredicate::NotEqual(operand()?),
        PredicateKind::Positive => IntPredicate::Positive,
        PredicateKind::Negative => IntPredicate::Negative,
        PredicateKind::NonNegative => IntPredicate::NonNegative,
        PredicateKind::Zero => IntPredicate::Zero,
        PredicateKind::Even => IntPredicate::Even,
        PredicateKind::Odd => IntPredicate::Odd,
    };

    Ok(column.select(&predicate))
}

fn write_stats<W: Write>(column: &IntColumn, mut writer: W) -> io::Result<()> {
    let display = |value: Option<i32>| match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    };

    writeln!(writer, "name: {}", column.name())?;
    writeln!(writer, "rows: {}", column.len())?;
    writeln!(writer, "missing: {}", column.count_missing())?;
    writeln!(writer, "unique: {}", column.count_unique())?;
    writeln!(writer, "sum: {}", column.sum())?;
    writeln!(writer, "min: {}", display(column.min()))?;
    writeln!(writer, "max: {}", display(column.max()))?;
    if column.checked_sum().is_none() {
        writeln!(writer, "warning: sum overflowed and has wrapped")?;
    }
    writer.flush()
}

fn write_rows<W: Write>(rows: &RoaringBitmap, mut writer: W) -> io::Result<()> {
    for row in rows {
        writeln!(writer, "{row}")?;
    }
    writeln!(writer, "matched: {}", rows.len())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_for(contents: &str, tokens: &[&str]) -> (tempfile::NamedTempFile, IngestOptions) {
        let mut file = tempfile::NamedTempFile::new().expect("Create temp file");
        file.write_all(contents.as_bytes()).expect("Write temp file");
        let options = IngestOptions {
            path: file.path().to_path_buf(),
            name: "sample".to_string(),
            missing_tokens: tokens.iter().map(|t| t.to_string()).collect(),
        };
        (file, options)
    }

    #[test]
    fn test_ingest_with_custom_tokens() {
        let (_file, options) = options_for("10\n-5\nmissing\n20\n", &["missing"]);
        let column = ingest(&options).expect("Ingest column");
        assert_eq!(column.len(), 4);
        assert_eq!(column.count_missing(), 1);
        assert_eq!(column.name(), "sample");
    }

    #[test]
    fn test_ingest_reports_line_and_column() {
        let (_file, options) = options_for("1\n2\nthree\n", &[]);
        let err = ingest(&options).unwrap_err();
        assert_eq!(err.to_string(), "Ingest line 3");
        let chain = format!("{err:#}");
        assert!(chain.contains("sample: invalid digit"), "Unexpected error: {chain}");
        assert!(chain.contains(r#"input string "three""#), "Unexpected error: {chain}");
    }

    #[rstest::rstest]
    #[case(PredicateKind::Gt, Some(0), vec![0, 3])]
    #[case(PredicateKind::Negative, None, vec![1])]
    #[case(PredicateKind::Missing, None, vec![2])]
    #[case(PredicateKind::Even, None, vec![0, 3])]
    fn test_select(
        #[case] kind: PredicateKind,
        #[case] value: Option<i32>,
        #[case] expected: Vec<u32>,
    ) {
        let (_file, options) = options_for("10\n-5\nNA\n20\n", &[]);
        let column = ingest(&options).unwrap();
        let rows = select(&column, kind, value).unwrap();
        assert_eq!(rows.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_comparison_requires_value() {
        let column = IntColumn::new("empty");
        let err = select(&column, PredicateKind::Lt, None).unwrap_err();
        assert!(err.to_string().contains("--value"));
    }

    #[test]
    fn test_write_stats() {
        let column = IntColumn::from_values("stats", vec![4, lnx_column::MISSING_VALUE, -1]).unwrap();
        let mut out = Vec::new();
        write_stats(&column, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("rows: 3\n"));
        assert!(out.contains("missing: 1\n"));
        assert!(out.contains("sum: 3\n"));
        assert!(out.contains("min: -1\n"));
        assert!(out.contains("max: 4\n"));
        assert!(!out.contains("warning"));
    }

    #[test]
    fn test_write_rows() {
        let rows: RoaringBitmap = [1u32, 5].into_iter().collect();
        let mut out = Vec::new();
        write_rows(&rows, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n5\nmatched: 2\n");
    }
}

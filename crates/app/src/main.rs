use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use grosz_classify::{classify, CategoryRuleSet};
use grosz_import::{read_statement_file, StatementProfile};
use grosz_report::{
    aggregate, write_summary_file, write_unmatched_file, ColorMap, DEFAULT_COLOR,
};

#[derive(Parser, Debug)]
#[command(
    name = "grosz",
    version,
    about = "Monthly spending report from a bank-statement CSV export"
)]
struct Cli {
    /// Statement CSV export (PKO BP layout)
    statement: PathBuf,

    /// Category rules, JSON or TOML (extension decides)
    categories: PathBuf,

    /// Category color map consumed by chart renderers
    #[arg(long)]
    colors: Option<PathBuf>,

    /// Output path for the monthly summary table
    #[arg(long, default_value = "monthly_expenses_summary.csv")]
    summary: PathBuf,

    /// Output path for transactions no rule matched
    #[arg(long, default_value = "unmatched_transactions.csv")]
    unmatched: PathBuf,
}

fn load_rules(path: &Path) -> Result<CategoryRuleSet> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rules = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => CategoryRuleSet::from_toml_str(&raw),
        _ => CategoryRuleSet::from_json_str(&raw),
    }
    .with_context(|| format!("loading category rules from {}", path.display()))?;
    Ok(rules)
}

fn load_colors(path: &Path) -> Result<ColorMap> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    ColorMap::from_json_str(&raw)
        .with_context(|| format!("loading color map from {}", path.display()))
}

fn run(cli: &Cli) -> Result<()> {
    // Both config files are validated before any statement row is touched.
    let rules = load_rules(&cli.categories)?;
    tracing::info!(rules = rules.len(), "category rules loaded");
    if rules.is_empty() {
        tracing::warn!("rule set has no keywords; every transaction will land in the unmatched list");
    }
    let colors = cli.colors.as_deref().map(load_colors).transpose()?;

    let outcome = read_statement_file(&cli.statement, &StatementProfile::pko_bp())
        .with_context(|| format!("reading statement {}", cli.statement.display()))?;
    for skip in &outcome.skipped {
        tracing::warn!(line = skip.line, "skipped statement row: {}", skip.reason);
    }
    tracing::info!(
        transactions = outcome.transactions.len(),
        skipped = outcome.skipped.len(),
        "statement loaded"
    );

    let entries: Vec<_> = outcome
        .transactions
        .into_iter()
        .map(|tx| {
            let classification = classify(&tx, &rules);
            (tx, classification)
        })
        .collect();

    let (summary, unmatched) = aggregate(&entries);

    if let Some(colors) = &colors {
        for category in summary.columns() {
            if !colors.contains(category) {
                tracing::warn!(
                    category,
                    "no color configured, charts fall back to {}",
                    DEFAULT_COLOR
                );
            }
        }
    }

    write_unmatched_file(&unmatched, &cli.unmatched)
        .with_context(|| format!("writing {}", cli.unmatched.display()))?;
    write_summary_file(&summary, &cli.summary)
        .with_context(|| format!("writing {}", cli.summary.display()))?;

    tracing::info!(
        months = summary.months().len(),
        unmatched = unmatched.len(),
        summary = %cli.summary.display(),
        "report written"
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: &str = "\
Lista operacji na rachunku\n\
Data transakcji,Data waluty,Typ transakcji,Kwota,Waluta,Saldo po transakcji,Opis transakcji,Lokalizacja,Data i czas operacji,Oryginalna kwota,Numer karty,,\n\
2024-05-12,2024-05-12,Platnosc karta,\"-45,50\",PLN,\"1 234,56\",LIDL WARSZAWA,WARSZAWA,2024-05-12 14:03,,4246XXXX1234,,\n\
2024-05-14,2024-05-14,Platnosc karta,\"-12,05\",PLN,\"1 222,51\",CINEMA CITY,,2024-05-14 19:30,,4246XXXX1234,,\n\
2024-06-02,2024-06-02,Platnosc karta,\"-30,00\",PLN,\"1 192,51\",STACJA PKN ORLEN,,2024-06-02 08:00,,4246XXXX1234,,\n";

    const CATEGORIES: &str = r#"{
        "Food": { "Grocery": ["lidl"] },
        "Transport": { "Fuel": ["orlen"] }
    }"#;

    #[test]
    fn load_rules_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("categories.json");
        fs::write(&json_path, CATEGORIES).unwrap();
        assert_eq!(load_rules(&json_path).unwrap().len(), 2);

        let toml_path = dir.path().join("categories.toml");
        fs::write(&toml_path, "[Food]\nGrocery = [\"lidl\"]\n").unwrap();
        assert_eq!(load_rules(&toml_path).unwrap().len(), 1);
    }

    #[test]
    fn load_rules_fails_on_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        fs::write(&path, r#"{ "Food": { "Grocery": [""] } }"#).unwrap();
        assert!(load_rules(&path).is_err());
    }

    #[test]
    fn pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let statement = dir.path().join("statement.csv");
        let categories = dir.path().join("categories.json");
        let summary = dir.path().join("summary.csv");
        let unmatched = dir.path().join("unmatched.csv");
        fs::write(&statement, STATEMENT).unwrap();
        fs::write(&categories, CATEGORIES).unwrap();

        let cli = Cli {
            statement,
            categories,
            colors: None,
            summary: summary.clone(),
            unmatched: unmatched.clone(),
        };
        run(&cli).unwrap();

        let summary = fs::read_to_string(&summary).unwrap();
        assert_eq!(
            summary,
            "Month,Food,Transport,Total\n\
             2024-05,45.50,0.00,45.50\n\
             2024-06,0.00,30.00,30.00\n"
        );

        let unmatched = fs::read_to_string(&unmatched).unwrap();
        assert!(unmatched.contains("2024-05-14,CINEMA CITY,-12.05,,2024-05-14 19:30,false"));
    }
}

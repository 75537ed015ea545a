//! Evaluate command implementation
//!
//! Evaluates one product of a book on a scenario read from a JSON file.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use payoff_products::{Product, ProductTrait, Scenario};

use crate::book::Book;
use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// One evaluated payoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffRow {
    /// Payoff label
    pub label: String,
    /// Payoff value on the scenario
    pub value: f64,
}

/// Run the evaluate command
pub fn run(book: &Path, product: usize, scenario: &Path, config: &CliConfig) -> Result<String> {
    info!("Starting evaluation...");
    info!("  Book: {}", book.display());
    info!("  Product: {}", product);
    info!("  Scenario: {}", scenario.display());
    info!("  Output format: {}", config.output_format);

    for path in [book, scenario] {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
    }

    let products = Book::load(book)?.build_products(config.system_time)?;
    let selected = products.get(product).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "Product index {} out of range: book has {} products",
            product,
            products.len()
        ))
    })?;

    let content = std::fs::read_to_string(scenario)?;
    let path: Scenario<f64> = serde_json::from_str(&content)?;

    let rows = evaluate(selected, &path)?;
    let out = render(&rows, config.output_format)?;

    info!("Evaluation complete");
    Ok(out)
}

/// Evaluates `product` on `path` with the checked entry point.
pub fn evaluate(product: &Product, path: &Scenario<f64>) -> Result<Vec<PayoffRow>> {
    let mut payoffs = vec![0.0; product.payoff_width()];
    product.evaluate(path, &mut payoffs)?;

    Ok(product
        .payoff_labels()
        .iter()
        .zip(payoffs)
        .map(|(label, value)| PayoffRow {
            label: label.clone(),
            value,
        })
        .collect())
}

/// Renders payoffs in the requested format.
pub fn render(rows: &[PayoffRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Table => {
            let width = rows
                .iter()
                .map(|r| r.label.chars().count())
                .max()
                .unwrap_or(0)
                .max("Payoff".len());

            let mut out = format!("{:<width$}  {:>14}\n", "Payoff", "Value", width = width);
            out.push_str(&format!("{}  {}\n", "-".repeat(width), "-".repeat(14)));
            for row in rows {
                out.push_str(&format!(
                    "{:<width$}  {:>14.6}\n",
                    row.label,
                    row.value,
                    width = width
                ));
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use payoff_products::{allocate_path, ProductError, Uoc};

    fn uoc() -> Product {
        Uoc::new(100.0, 120.0, 1.0, 0.5, 0.05).unwrap().into()
    }

    #[test]
    fn test_evaluate_rows_follow_labels() {
        let product = uoc();
        let mut path = allocate_path::<f64>(product.dataline());
        path[0].forwards[0] = 100.0;
        path[1].forwards[0] = 120.0;
        path[2].forwards[0] = 110.0;

        let rows = evaluate(&product, &path).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].label.contains("up and out"));
        assert_relative_eq!(rows[0].value, 5.0, epsilon = 1e-12);
        assert_relative_eq!(rows[1].value, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_evaluate_reports_bad_scenario() {
        let product = uoc();
        let path = allocate_path::<f64>(&product.dataline()[..2]);

        let err = evaluate(&product, &path).unwrap_err();
        assert!(matches!(
            err,
            CliError::Product(ProductError::PathLength {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_render_table() {
        let rows = vec![PayoffRow {
            label: "call 1.00 100.00".to_string(),
            value: 2.5,
        }];
        let out = render(&rows, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Payoff"));
        assert!(lines[2].starts_with("call 1.00 100.00"));
        assert!(lines[2].ends_with("2.500000"));
    }

    #[test]
    fn test_render_json() {
        let rows = vec![PayoffRow {
            label: "contingent bond 1.00 0.01".to_string(),
            value: 1.0,
        }];
        let out = render(&rows, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed[0]["label"], "contingent bond 1.00 0.01");
        assert_eq!(parsed[0]["value"], 1.0);
    }
}

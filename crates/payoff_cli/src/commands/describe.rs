//! Describe command implementation
//!
//! Builds every product in a book and lists its payoffs and simulation needs.

use std::path::Path;

use tracing::info;

use payoff_core::types::Time;
use payoff_products::{Product, ProductTrait, SimulationRequirement};

use crate::book::Book;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the describe command
pub fn run(book: &Path, config: &CliConfig) -> Result<String> {
    info!("Describing book {}", book.display());

    if !book.exists() {
        return Err(CliError::FileNotFound(book.display().to_string()));
    }

    let products = Book::load(book)?.build_products(config.system_time)?;
    let out = render(&products);

    info!("Described {} products", products.len());
    Ok(out)
}

/// Renders labels, timeline and dataline of each product.
pub fn render(products: &[Product]) -> String {
    let mut out = String::new();
    for (index, product) in products.iter().enumerate() {
        out.push_str(&format!(
            "[{}] {} ({} payoffs, {} dates)\n",
            index,
            product.type_name(),
            product.payoff_width(),
            product.timeline().len()
        ));
        for (k, label) in product.payoff_labels().iter().enumerate() {
            out.push_str(&format!("    payoff {}: {}\n", k, label));
        }
        for (t, req) in product.timeline().iter().zip(product.dataline()) {
            out.push_str(&format!("    t={:.4}  {}\n", t, describe_requirement(req)));
        }
    }
    out
}

fn describe_requirement(req: &SimulationRequirement) -> String {
    let mut parts = Vec::new();
    if req.numeraire {
        parts.push("numeraire".to_string());
    }
    if !req.forward_mats.is_empty() {
        parts.push(format!("forwards {}", times(&req.forward_mats)));
    }
    if !req.discount_mats.is_empty() {
        parts.push(format!("discounts {}", times(&req.discount_mats)));
    }
    if !req.libor_defs.is_empty() {
        let libors: Vec<String> = req
            .libor_defs
            .iter()
            .map(|d| format!("{}({:.4}, {:.4})", d.curve, d.start, d.end))
            .collect();
        parts.push(format!("libors [{}]", libors.join(", ")));
    }
    parts.join("; ")
}

fn times(ts: &[Time]) -> String {
    let ts: Vec<String> = ts.iter().map(|t| format!("{:.4}", t)).collect();
    format!("[{}]", ts.join(", "))
}

//! Basic selection example.
//!
//! Classifies a handful of property usage counts into Pareto tiers and keeps
//! the properties used by at least 10% of the population.
//!
//! Run with: cargo run --example selection

use pareto_select::prelude::*;

fn main() -> Result<()> {
    println!("=== Pareto Selection Example ===\n");

    // Usage counts of properties across 1000 items
    let total = 1000.0;
    let records = vec![
        Ok(FrequencyRecord::new("P31", "instance of", "WikibaseItem", 950)),
        Ok(FrequencyRecord::new("P17", "country", "WikibaseItem", 50)),
    ];

    let config = SelectionConfig {
        name: "property-selection".to_string(),
        minimum_percentage: 10.0,
        ..SelectionConfig::default()
    };

    println!("Running selection '{}'...", config.name);
    println!("  Population: {}", total);
    println!("  Minimum percentage: {:.1}%", config.minimum_percentage);
    println!();

    let report = run_selection(&config, total, records)?;

    println!("=== Classified Records ===\n");
    println!(
        "{:<3} {:<8} {:<15} {:>8} {:>8} {:>5}",
        "#", "Key", "Label", "Ratio", "Percent", "Tier"
    );
    println!("{}", "-".repeat(52));
    for r in &report.classified {
        println!(
            "{:<3} {:<8} {:<15} {:>8} {:>8} {:>5}",
            r.index,
            r.key,
            r.label,
            r.ratio,
            r.percent_text(),
            r.tier
        );
    }

    println!("\n=== Selected ===\n");
    if report.selected.is_empty() {
        println!("No properties reach {:.1}%", config.minimum_percentage);
    } else {
        for key in &report.selected {
            println!("  {}", key);
        }
    }

    println!("\n{}", report.summary);

    println!("=== Pareto Levels ===\n");
    for level in ParetoScale::standard().iter() {
        println!("  {}", level.describe(true));
    }

    println!("\n=== Selection Configuration (YAML) ===\n");
    println!("{}", config.to_yaml()?);

    Ok(())
}

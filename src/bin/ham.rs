//! HAM CLI — inspect genomes and ancestral clusterings
//!
//! Commands:
//!   ham demo — build a small primate example and print summaries + clustering
//!   ham help — show usage

use ham_core::{AncestralGenome, ExtantGenome, Gene, Genome, Taxonomy};
use serde_json::json;
use std::env;
use std::error::Error;
use std::rc::Rc;

fn print_usage() {
    println!(
        r#"
HAM core — extant & ancestral genomes

Usage: ham <command>

Commands:
  demo      Build a primate example, compute the ancestral clustering, print JSON
  help      Show this message

Logging is controlled with RUST_LOG (default: info), e.g.
  RUST_LOG=debug ham demo
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "demo" => cmd_demo(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("  Error: {}", e);
        std::process::exit(1);
    }
}

/// Two species, one ancestor, two gene families and a singleton
fn cmd_demo() -> Result<(), Box<dyn Error>> {
    let mut taxonomy = Taxonomy::new("Hominidae");
    let root = taxonomy.root();
    let human_taxon = taxonomy.add_child(&root, "HUMAN")?;
    let chimp_taxon = taxonomy.add_child(&root, "PANTR")?;

    let mut human = ExtantGenome::new("HUMAN", 9606);
    let mut chimp = ExtantGenome::new("PANTR", 9598);
    human.set_taxon(&human_taxon)?;
    chimp.set_taxon(&chimp_taxon)?;

    let mut ancestor = AncestralGenome::new();
    ancestor.set_name(AncestralGenome::derive_name([&human.name, &chimp.name]));
    ancestor.set_taxon(&root)?;

    let families = [("HOG:0001", 2usize, 1usize), ("HOG:0002", 1, 2)];
    for (hog_id, n_human, n_chimp) in families {
        let hog = Gene::hog(hog_id);
        for i in 0..n_human {
            let gene = Gene::extant(format!("HUMAN_{}_{}", hog_id, i));
            hog.add_child(&gene)?;
            human.add_gene(gene)?;
        }
        for i in 0..n_chimp {
            let gene = Gene::extant(format!("PANTR_{}_{}", hog_id, i));
            hog.add_child(&gene)?;
            chimp.add_gene(gene)?;
        }
        ancestor.add_gene(Rc::clone(&hog))?;
    }
    human.add_gene(Gene::extant("HUMAN_orphan"))?;

    for summary in [human.summary(), chimp.summary(), ancestor.summary()] {
        println!("{}", summary.to_json()?);
    }

    let clustering = ancestor.get_ancestral_clustering()?;
    let mapping: serde_json::Map<String, serde_json::Value> = clustering
        .iter()
        .map(|(hog, genes)| {
            let ids: Vec<&str> = genes.iter().map(|g| g.id()).collect();
            (hog.id().to_string(), json!(ids))
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "genome": ancestor.to_string(),
            "ancestral_clustering": mapping,
        }))?
    );
    Ok(())
}

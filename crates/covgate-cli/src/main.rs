//! Covgate CLI - resolve evidence-backed coverage facts for one insurer.

use clap::Parser;
use covgate_cli::{sources, Cli, CliFormat, Config, Formatter, SlotRecord};
use covgate_domain::SlotKey;
use covgate_gates::AttributionGate;
use covgate_registry::CoverageRegistry;
use covgate_resolver::{apply_attribution, EvidenceResolver};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> covgate_cli::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let registry_path = cli
        .registry
        .or(config.registry)
        .unwrap_or_else(|| PathBuf::from("registry.json"));
    let docs_root = cli
        .docs
        .or(config.docs_root)
        .unwrap_or_else(|| PathBuf::from("docs"));

    // Fatal at startup: the engine never runs with a partial registry
    let registry = CoverageRegistry::load(&registry_path)?;
    info!(
        registry = %registry_path.display(),
        version = registry.version(),
        entries = registry.len(),
        "registry loaded"
    );

    let insurer_dir = docs_root.join(&cli.insurer);
    if !insurer_dir.is_dir() {
        return Err(covgate_cli::CliError::MissingInput(
            insurer_dir.display().to_string(),
        ));
    }

    let coverages = sources::load_coverages(&insurer_dir)?;
    let docs = sources::load_documents(&insurer_dir)?;

    let slots: Vec<SlotKey> = if cli.slots.is_empty() {
        SlotKey::ALL.to_vec()
    } else {
        cli.slots
            .iter()
            .map(|name| {
                SlotKey::parse(name)
                    .ok_or_else(|| covgate_cli::CliError::InvalidInput(format!("unknown slot '{}'", name)))
            })
            .collect::<covgate_cli::Result<_>>()?
    };

    let resolver =
        EvidenceResolver::standard().with_known_coverages(registry.canonical_names());
    let attribution = AttributionGate::new(&registry);
    let mut records = Vec::new();

    for coverage in &coverages {
        let results = resolver.resolve(coverage, &slots, &docs)?;
        for (slot, result) in results {
            // G5 runs over the accepted excerpts only; a slot with no
            // evidence keeps its original UNKNOWN reason
            let result = if result.evidences.is_empty() {
                result
            } else {
                let excerpts: Vec<String> = result
                    .evidences
                    .iter()
                    .map(|evidence| evidence.excerpt.clone())
                    .collect();
                let decision = attribution.check(&coverage.code, &excerpts);
                apply_attribution(result, &decision)
            };
            records.push(SlotRecord {
                insurer: cli.insurer.clone(),
                coverage_code: coverage.code.clone(),
                coverage_name: coverage.name.clone(),
                slot,
                result,
            });
        }
    }

    let formatter = Formatter::new(cli.format, cli.format == CliFormat::Table);

    if let Some(out_path) = cli
        .out
        .or_else(|| config.out_dir.map(|dir| dir.join(format!("{}.jsonl", cli.insurer))))
    {
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(&out_path)?;
        formatter.write_records(&records, &mut file)?;
        info!(out = %out_path.display(), records = records.len(), "records written");
    }

    println!("{}", formatter.render(&records)?);
    Ok(())
}

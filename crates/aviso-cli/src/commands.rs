use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use aviso_ingest::load_rules;
use aviso_model::Catalog;
use aviso_output::{catalog_file_name, write_json};

use crate::cli::{ExportIndustryArgs, GenerateArgs, IndustriesArgs, LookupArgs, RulesArgs};
use crate::pipeline::{PipelineError, RunRequest, RunSummary, run};
use crate::summary::{LookupReport, print_industries, print_industry};

pub fn run_generate(args: &GenerateArgs) -> Result<RunSummary, PipelineError> {
    let request = RunRequest {
        rules_path: args.rules.rules.clone(),
        output_dir: args.output_dir.clone(),
        skip_csv: args.no_csv,
        skip_xlsx: args.no_xlsx,
        skip_json: args.no_json,
    };
    run(&request)
}

/// List industries, or show one of them. Returns false when the requested
/// industry is unknown.
pub fn run_industries(args: &IndustriesArgs) -> Result<bool> {
    let catalog = load_catalog(&args.rules)?;
    let Some(key) = &args.industry else {
        print_industries(&catalog);
        return Ok(true);
    };
    match catalog.industry(key) {
        Some(bucket) => {
            print_industry(bucket);
            Ok(true)
        }
        None => {
            eprintln!("La industria '{key}' no está definida en el archivo de reglas.");
            Ok(false)
        }
    }
}

/// Look up one fraction. Returns false when the industry or code is unknown.
pub fn run_lookup(args: &LookupArgs) -> Result<bool> {
    let catalog = load_catalog(&args.rules)?;
    let code = args.code.trim();
    let report =
        LookupReport::from_outcome(catalog.lookup(&args.industry, code), &args.industry, code);
    report.print();
    Ok(report.is_found())
}

/// Write `catalogo_<KEY>.json` with the industry's entries and their
/// normalized and formatted codes.
pub fn run_export_industry(args: &ExportIndustryArgs) -> Result<PathBuf> {
    let span = info_span!("export_industry", industry = %args.industry);
    let _guard = span.enter();

    let catalog = load_catalog(&args.rules)?;
    let bucket = catalog
        .industry(&args.industry)
        .ok_or_else(|| anyhow!("la industria '{}' no está definida en el archivo de reglas", args.industry))?;
    let path = args.output_dir.join(catalog_file_name(&bucket.industry.key));
    write_json(&bucket.catalog_entries(), &path)
        .with_context(|| format!("export industry {}", bucket.industry.key))?;
    info!(path = %path.display(), rows = bucket.entries.len(), "industry exported");
    Ok(path)
}

fn load_catalog(args: &RulesArgs) -> Result<Catalog> {
    let entries = load_rules(&args.rules)
        .with_context(|| format!("load rules {}", args.rules.display()))?;
    Ok(Catalog::from_entries(&entries))
}

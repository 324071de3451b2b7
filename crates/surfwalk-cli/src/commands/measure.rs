use crate::cli::MeasureArgs;
use crate::config::{MeasureSettings, PartialMeasureConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use std::path::Path;
use surfwalk::{
    core::io::{
        atoms::AtomTableFile,
        crosslinks::read_crosslinks_from_path,
        paths::{PathModel, write_path_models_to_path},
        results::{QueryStatus, SasdRecord, write_results_to_path},
        traits::StructureFile,
    },
    core::models::crosslink::CrosslinkQuery,
    engine::{
        outcome::SasdReport,
        progress::ProgressReporter,
        utils::query::enumerate_crosslinks,
    },
    workflows,
};
use tracing::{error, info, warn};

pub fn run(args: MeasureArgs, quiet: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialMeasureConfig::from_file(path)?,
        None => PartialMeasureConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_cli(&args)?;

    let explicit_queries = match &args.crosslinks {
        Some(path) => {
            let queries =
                read_crosslinks_from_path(path).map_err(|e| CliError::FileParsing {
                    path: path.clone(),
                    source: e.into(),
                })?;
            info!(count = queries.len(), "Loaded crosslink list from {:?}", path);
            Some(queries)
        }
        None => None,
    };

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let mut records: Vec<SasdRecord> = Vec::new();
    let mut path_models: Vec<PathModel> = Vec::new();
    let mut failed = 0;

    for input in &args.inputs {
        progress_handler.set_prefix(&display_name(input));
        match measure_structure(input, explicit_queries.as_deref(), &settings, &reporter) {
            Ok(report) => {
                let measured = report.count_with_status(QueryStatus::Ok);
                println!(
                    "✓ {}: {} of {} crosslink(s) measured ({} surface component(s))",
                    report.structure,
                    measured,
                    report.outcomes.len(),
                    report.summary.components
                );
                records.extend(report.records());
                path_models.extend(report.path_models().into_iter().map(|mut model| {
                    model.label = format!("{} {}", report.structure, model.label);
                    model
                }));
            }
            Err(e) => {
                failed += 1;
                error!("Failed to process {:?}: {}", input, e);
                eprintln!("✗ {}: {}", input.display(), e);
            }
        }
    }

    write_results_to_path(&args.output, &records).map_err(|e| CliError::FileWriting {
        path: args.output.clone(),
        source: e,
    })?;
    println!(
        "Results for {} crosslink(s) written to: {}",
        records.len(),
        args.output.display()
    );

    if let Some(paths) = &args.paths {
        if !settings.sasd.search.record_paths {
            warn!("Path recording is disabled by the configuration; the path file will be empty.");
        }
        write_path_models_to_path(paths, &path_models).map_err(|e| CliError::FileWriting {
            path: paths.clone(),
            source: e,
        })?;
        println!(
            "{} path(s) written to: {}",
            path_models.len(),
            paths.display()
        );
    }

    if failed > 0 {
        return Err(CliError::PartialFailure {
            failed,
            total: args.inputs.len(),
        });
    }
    Ok(())
}

fn measure_structure(
    input: &Path,
    explicit_queries: Option<&[CrosslinkQuery]>,
    settings: &MeasureSettings,
    reporter: &ProgressReporter,
) -> Result<SasdReport> {
    info!("Loading input structure from {:?}", input);
    let structure =
        AtomTableFile::read_from_path(input).map_err(|e| CliError::FileParsing {
            path: input.to_path_buf(),
            source: e.into(),
        })?;

    let queries = match explicit_queries {
        Some(queries) => queries.to_vec(),
        None => {
            let generated = enumerate_crosslinks(&structure, &settings.selection);
            info!(
                structure = structure.name(),
                count = generated.len(),
                "Generated crosslink pairs."
            );
            generated
        }
    };
    if queries.is_empty() {
        warn!(structure = structure.name(), "No crosslinks to measure.");
    }

    Ok(workflows::sasd::run(
        &structure,
        &queries,
        &settings.sasd,
        reporter,
    )?)
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

use crate::cli::CleanArgs;
use crate::config::PartialCleanConfig;
use crate::error::{CliError, Result};
use strucfile::core::io::convert::FormatConverter;
use strucfile::engine::progress::{Progress, ProgressReporter};
use strucfile::workflows;
use tracing::{debug, info};

pub fn run(args: CleanArgs) -> Result<()> {
    if args.input == args.output {
        return Err(CliError::Argument(format!(
            "Refusing to overwrite the input file {:?}; choose a different output path.",
            args.input
        )));
    }

    let partial_config = match &args.config {
        Some(path) => PartialCleanConfig::from_file(path)?,
        None => PartialCleanConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_cli(&args)?;
    debug!("Final pipeline configuration: {:?}", settings.pipeline);

    let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
        Progress::StageStart { stage } => debug!("Starting stage '{}'.", stage),
        Progress::StageFinish {
            stage,
            records_before,
            records_after,
        } => debug!(
            "Finished stage '{}': {} -> {} records.",
            stage, records_before, records_after
        ),
        Progress::Message(message) => info!("{}", message),
    }));

    let converter = settings
        .converter
        .as_ref()
        .map(|c| c as &dyn FormatConverter);
    let summary = workflows::clean::run(
        &args.input,
        &args.output,
        &settings.pipeline,
        converter,
        &reporter,
    )?;

    if let Some(classification) = &summary.classification {
        println!("Molecule: {}", classification);
    }
    for outcome in &summary.stages {
        if outcome.removed() > 0 {
            println!("  {:<28} removed {} record(s)", outcome.stage, outcome.removed());
        } else {
            println!("  {}", outcome.stage);
        }
    }
    println!(
        "Wrote {} of {} records to {}",
        summary.records_out,
        summary.records_in,
        args.output.display()
    );
    println!("{}", summary.report);
    Ok(())
}

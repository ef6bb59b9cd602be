use crate::cli::InfoArgs;
use crate::error::Result;
use strucfile::core::io::convert::{FormatConverter, ObabelConverter};
use strucfile::workflows;
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    let converter = args.convert.then(|| {
        args.obabel
            .clone()
            .map(ObabelConverter::with_program)
            .unwrap_or_default()
    });

    info!("Inspecting {:?}", &args.input);
    let inspection = workflows::inspect::run(
        &args.input,
        converter.as_ref().map(|c| c as &dyn FormatConverter),
    )?;

    println!("{}", inspection);
    Ok(())
}

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use p3d_tools::{logging, p3dimg};

#[derive(Parser)]
#[clap(version, about = "Show the directory of a +3DOS/PCW disc image together with the used disc space.")]
struct Cli {
    /// Path to the disc image.
    /// Ex: p3d-dir mydisc.dsk
    #[clap(name = "IMAGE_FILE")]
    image_path: String,
    /// More diagnostics on stderr, repeat for more (-v info, -vv debug)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: &Cli) -> Result<()> {
    p3dimg::list_directory(&cli.image_path).context("error in reading disc image")?;
    Ok(())
}

fn main() -> ExitCode {

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version end up here too
            let _ = err.print();
            return if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    if let Err(err) = logging::init(cli.verbose) {
        eprintln!("error: {}", err);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

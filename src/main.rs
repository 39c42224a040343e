// src/main.rs

use stalecheck::{cli, logging, run, RunOutcome};

fn main() {
    match run_main() {
        Ok(RunOutcome::Success) => {}
        Ok(RunOutcome::Stale) => std::process::exit(1),
        Err(err) => {
            eprintln!("stalecheck error: {err:?}");
            std::process::exit(2);
        }
    }
}

fn run_main() -> anyhow::Result<RunOutcome> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args)
}

#![forbid(unsafe_code)]

//! Sketch binary entry point.

use sketch_tty::cli;
use sketch_tty::logging;
use sketch_tty::runner;

fn main() {
    let opts = cli::Opts::parse();

    if let Some(path) = &opts.log_file
        && let Err(e) = logging::init_file_logging(path)
    {
        eprintln!("Failed to initialize: {e}");
        std::process::exit(1);
    }

    match runner::open_session() {
        Ok(session) => {
            if let Err(e) = runner::run(session, &opts) {
                eprintln!("Runtime error: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    }
}

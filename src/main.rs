use argh::FromArgs;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use wish::{Interpreter, repl};

#[derive(FromArgs)]
/// A small command interpreter with aliases, environment variables and output redirection.
/// Without arguments, commands are read interactively from the terminal.
struct Args {
    #[argh(positional)]
    /// file to read commands from; each line is echoed before it runs.
    batch_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = argh::from_env();

    let mut interp = Interpreter::default();
    let result = match &args.batch_file {
        Some(path) => {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(e) => {
                    log::error!("cannot open {}: {}", path.display(), e);
                    eprintln!("Error: could not open batch file");
                    return ExitCode::FAILURE;
                }
            };
            log::info!("running batch file {}", path.display());
            repl::run_batch(
                &mut interp,
                BufReader::new(file),
                &mut std::io::stdout(),
                &mut std::io::stderr(),
            )
        }
        None => repl::run_interactive(&mut interp),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

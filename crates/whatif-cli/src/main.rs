use std::process::ExitCode;
use whatif_cli::{build_cli, init_logging, run};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    let verbose = matches
        .subcommand()
        .and_then(|(_, args)| args.get_one::<u8>("verbose").copied())
        .unwrap_or(0);
    init_logging(verbose);

    let stdout = std::io::stdout();
    match run(&matches, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

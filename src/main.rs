use eyre::{Result, WrapErr};
use std::io;
use std::process::ExitCode;
use wordle_assistant::cli::{CliInterface, parse_cli};
use wordle_assistant::logging;
use wordle_assistant::tui::TuiInterface;
use wordle_assistant::{GameInterface, SessionOutcome, game_loop, load_candidates};

fn main() -> Result<ExitCode> {
    let cli = parse_cli();

    // Log to a file while the TUI owns the screen
    let log_file = match (&cli.log_file, cli.tui) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => logging::default_log_path(),
        (None, false) => None,
    };
    logging::init(cli.verbose, log_file.as_deref()).wrap_err("Failed to set up logging")?;

    let source = cli.word_source()?;
    let candidates = load_candidates(source.as_ref())
        .wrap_err_with(|| format!("Failed to load words from '{}'", source.describe()))?;
    println!("Loaded {} words.", candidates.len());

    let mut interface: Box<dyn GameInterface> = if cli.tui {
        Box::new(TuiInterface::new().wrap_err("Failed to start the terminal interface")?)
    } else {
        Box::new(CliInterface::new(io::stdin().lock()))
    };

    let result = game_loop(&candidates, interface.as_mut());
    // Restore the terminal before printing anything
    drop(interface);

    match result {
        Ok(SessionOutcome::Won { word, turns }) => {
            log::info!("Session won with '{word}' after {turns} turns");
            Ok(ExitCode::SUCCESS)
        }
        Ok(SessionOutcome::Exited) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            log::error!("Session ended: {e}");
            eprintln!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

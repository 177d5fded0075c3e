use crate::constraints::Feedback;
use crate::error::SourceError;
use crate::game_state::{GameInterface, UserAction};
use crate::suggest::Suggestions;
use crate::wordbank::{CommandSource, DEFAULT_DICT_COMMAND, EmbeddedSource, FileSource, WordSource};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Suggests Wordle guesses from the feedback of previous ones
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (overrides the dictionary command)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Command whose stdout lists dictionary words
    #[arg(long = "dict-command", default_value = DEFAULT_DICT_COMMAND)]
    pub dict_command: String,

    /// Use the small word list built into the binary
    #[arg(long, conflicts_with = "wordbank_path")]
    pub embedded: bool,

    /// Run the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Picks the word source: `--input`, then `--embedded`, then the dictionary command.
    ///
    /// # Errors
    /// Returns [`SourceError::NoCommand`] when the dictionary command is blank.
    pub fn word_source(&self) -> Result<Box<dyn WordSource>, SourceError> {
        if let Some(path) = &self.wordbank_path {
            return Ok(Box::new(FileSource::new(path)));
        }
        if self.embedded {
            return Ok(Box::new(EmbeddedSource::default()));
        }
        Ok(Box::new(CommandSource::from_command_line(&self.dict_command)?))
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

fn parse_action(input: &str) -> Result<UserAction, String> {
    match input.to_ascii_lowercase().as_str() {
        "exit" | "quit" => Ok(UserAction::Exit),
        "next" => Ok(UserAction::NewGame),
        other => other
            .parse::<Feedback>()
            .map(UserAction::Feedback)
            .map_err(|e| e.to_string()),
    }
}

pub fn display_suggestions<W: Write>(
    out: &mut W,
    turn: usize,
    suggestions: &Suggestions,
) -> io::Result<()> {
    let Some(best) = suggestions.best() else {
        return Ok(());
    };
    writeln!(out, "\n[{turn}] Guess '{best}'")?;
    if suggestions.words.len() > 1 {
        writeln!(out, "    alternatives: {}", suggestions.words[1..].join(" "))?;
    }
    writeln!(out, "    ({} candidates remain)", suggestions.remaining)
}

/// Prompts for feedback on `guess` and reads one line.
///
/// Blank or malformed lines are reported and yield `Ok(None)`; end of input
/// is treated as `exit`.
pub fn read_action<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    guess: &str,
) -> io::Result<Option<UserAction>> {
    writeln!(
        out,
        "Feedback for '{guess}' (g=green, y=yellow, .=gray; 'next' for a new game, 'exit' to quit):"
    )?;
    out.flush()?;

    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(Some(UserAction::Exit));
    }

    match parse_action(input.trim()) {
        Ok(action) => Ok(Some(action)),
        Err(message) => {
            writeln!(out, "Invalid feedback: {message}")?;
            Ok(None)
        }
    }
}

/// Line-oriented interface over any reader and writer.
pub struct CliInterface<R: BufRead, W: Write = io::Stdout> {
    reader: R,
    out: W,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            out: io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub const fn with_writer(reader: R, out: W) -> Self {
        Self { reader, out }
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn say(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{message}") {
            log::warn!("Failed to write to terminal: {e}");
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_suggestions(&mut self, turn: usize, suggestions: &Suggestions) {
        if let Err(e) = display_suggestions(&mut self.out, turn, suggestions) {
            log::warn!("Failed to write to terminal: {e}");
        }
    }

    fn read_action(&mut self, guess: &str) -> io::Result<Option<UserAction>> {
        read_action(&mut self.reader, &mut self.out, guess)
    }

    fn display_win(&mut self, word: &str, turns: usize) {
        let plural = if turns == 1 { "" } else { "es" };
        self.say(&format!("Solved: '{word}' in {turns} guess{plural}."));
    }

    fn display_exhausted(&mut self) {
        self.say("No valid guesses remain. Check the feedback you entered.");
    }

    fn display_new_game(&mut self, word_count: usize) {
        self.say(&format!("New game started. {word_count} candidate words."));
    }

    fn display_exit(&mut self) {
        self.say("Exiting.");
    }
}

//! Where candidate words come from.
//!
//! The core only needs a finite list of tokens, fetched once at startup.
//! Tokens that are not exactly five lowercase letters are dropped here, so
//! providers can hand over raw dictionary dumps.

use crate::candidate::{Candidate, WORD_LENGTH};
use crate::error::SourceError;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Dictionary dump used when no word list is given.
pub const DEFAULT_DICT_COMMAND: &str = "aspell -d en dump master";

pub trait WordSource {
    /// Human readable origin, used in log lines and error messages.
    fn describe(&self) -> String;

    /// All raw tokens, in provider order.
    ///
    /// # Errors
    /// Returns a [`SourceError`] when the provider cannot be read.
    fn words(&self) -> Result<Vec<String>, SourceError>;
}

/// Runs an external dictionary program and reads words from its stdout.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line on whitespace. No shell quoting is supported.
    ///
    /// # Errors
    /// Returns [`SourceError::NoCommand`] for a blank command line.
    pub fn from_command_line(line: &str) -> Result<Self, SourceError> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(SourceError::NoCommand)?;
        Ok(Self::new(program, parts.collect()))
    }
}

impl WordSource for CommandSource {
    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn words(&self) -> Result<Vec<String>, SourceError> {
        log::info!("Running dictionary command: {}", self.describe());
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| SourceError::Spawn {
                command: self.describe(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::CommandFailed {
                command: self.describe(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(split_tokens(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Newline-delimited word list on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WordSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn words(&self) -> Result<Vec<String>, SourceError> {
        let data = fs::read_to_string(&self.path)?;
        Ok(split_tokens(&data))
    }
}

/// Word list held in memory, by default the one compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    data: &'static str,
}

impl EmbeddedSource {
    #[must_use]
    pub const fn new(data: &'static str) -> Self {
        Self { data }
    }
}

impl Default for EmbeddedSource {
    fn default() -> Self {
        Self::new(EMBEDDED_WORDBANK)
    }
}

impl WordSource for EmbeddedSource {
    fn describe(&self) -> String {
        "embedded word list".to_string()
    }

    fn words(&self) -> Result<Vec<String>, SourceError> {
        Ok(split_tokens(self.data))
    }
}

fn split_tokens(data: &str) -> Vec<String> {
    data.split_whitespace().map(str::to_string).collect()
}

/// Exactly five lowercase ASCII letters.
#[must_use]
pub fn is_playable(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.bytes().all(|b| b.is_ascii_lowercase())
}

/// Keeps playable tokens in provider order, first occurrence wins.
#[must_use]
pub fn candidates_from_words<I, S>(words: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    words
        .into_iter()
        .filter(|w| is_playable(w.as_ref()))
        .filter(|w| seen.insert(w.as_ref().to_string()))
        .filter_map(|w| Candidate::new(w.as_ref()))
        .collect()
}

/// Fetches the word universe once and converts it to candidates.
///
/// # Errors
/// Propagates provider failures, and returns [`SourceError::Empty`] when no
/// playable word remains after filtering.
pub fn load_candidates(source: &dyn WordSource) -> Result<Vec<Candidate>, SourceError> {
    let words = source.words()?;
    let total = words.len();
    let candidates = candidates_from_words(words);
    log::info!(
        "Loaded {} playable words out of {} tokens from {}",
        candidates.len(),
        total,
        source.describe()
    );

    if candidates.is_empty() {
        return Err(SourceError::Empty(source.describe()));
    }
    Ok(candidates)
}

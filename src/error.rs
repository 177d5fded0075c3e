use std::io;
use thiserror::Error;

/// Feedback text that is not five characters over `g`, `y` and `.`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("feedback must be exactly 5 characters, got {0}")]
    WrongLength(usize),
    #[error("invalid feedback character '{0}' (use g, y or .)")]
    InvalidMark(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("guess '{0}' is not five lowercase letters")]
    InvalidGuess(String),
}

/// Failures of the dictionary provider. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to run dictionary command '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("dictionary command '{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("failed to read word list")]
    Io(#[from] io::Error),
    #[error("no playable five-letter words in {0}")]
    Empty(String),
    #[error("dictionary command is empty")]
    NoCommand,
}

/// Terminal conditions of an interactive session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no valid guesses left")]
    NoValidGuesses,
    #[error(transparent)]
    Update(#[from] UpdateError),
    #[error("input/output failure: {0}")]
    Io(#[from] io::Error),
}

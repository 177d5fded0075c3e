use crate::candidate::Candidate;
use crate::constraints::{ConstraintState, Feedback};
use crate::error::SessionError;
use crate::info_log;
use crate::suggest::{Suggestions, suggest_excluding};
use crate::wordbank::is_playable;
use std::collections::BTreeSet;
use std::io;

/// What the player answered after being shown a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Feedback(Feedback),
    NewGame,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Won { word: String, turns: usize },
    Exited,
}

/// Front end driven by [`game_loop`].
pub trait GameInterface {
    /// Shows the ranked suggestions for `turn` (1-based). The first word is
    /// the one the player is asked to play.
    fn display_suggestions(&mut self, turn: usize, suggestions: &Suggestions);

    /// Reads the player's answer for `guess`. `Ok(None)` means the input was
    /// rejected and should be asked for again; end of input is `Exit`.
    ///
    /// # Errors
    /// Returns an error if the underlying input cannot be read.
    fn read_action(&mut self, guess: &str) -> io::Result<Option<UserAction>>;

    fn display_win(&mut self, word: &str, turns: usize);
    fn display_exhausted(&mut self);
    fn display_new_game(&mut self, word_count: usize);
    fn display_exit(&mut self);
}

/// Plays one session: suggest, read feedback, fold it into the state, repeat.
///
/// Words that were played without winning are not suggested again in the
/// same game. `candidates` must hold playable words only (see
/// [`is_playable`]); `load_candidates` guarantees that.
///
/// # Errors
/// [`SessionError::NoValidGuesses`] when no candidate fits the feedback,
/// and I/O failures of the interface.
///
/// # Panics
/// In debug builds, if a candidate is not a playable word.
pub fn game_loop<I>(
    candidates: &[Candidate],
    interface: &mut I,
) -> Result<SessionOutcome, SessionError>
where
    I: GameInterface + ?Sized,
{
    debug_assert!(
        candidates.iter().all(|c| is_playable(c.word())),
        "game_loop needs lowercase five-letter candidates"
    );

    let mut state = ConstraintState::new();
    let mut played = BTreeSet::new();
    let mut turn = 1;

    loop {
        let suggestions = suggest_excluding(&state, candidates, &played);
        let Some(guess) = suggestions.best().map(str::to_string) else {
            log::warn!("No candidate satisfies {state}");
            interface.display_exhausted();
            return Err(SessionError::NoValidGuesses);
        };
        info_log!(
            "Turn {}: suggesting '{}' ({} candidates remain)",
            turn,
            guess,
            suggestions.remaining
        );
        interface.display_suggestions(turn, &suggestions);

        match read_until_valid(interface, &guess)? {
            UserAction::Exit => {
                interface.display_exit();
                return Ok(SessionOutcome::Exited);
            }
            UserAction::NewGame => {
                state = ConstraintState::new();
                played.clear();
                turn = 1;
                interface.display_new_game(candidates.len());
            }
            UserAction::Feedback(feedback) if feedback.is_win() => {
                log::info!("Solved with '{guess}' in {turn} turns");
                interface.display_win(&guess, turn);
                return Ok(SessionOutcome::Won { word: guess, turns: turn });
            }
            UserAction::Feedback(feedback) => {
                state = state.update(&guess, &feedback)?;
                info_log!("Feedback {} for '{}' -> {}", feedback, guess, state);
                played.insert(guess);
                turn += 1;
            }
        }
    }
}

fn read_until_valid<I>(interface: &mut I, guess: &str) -> io::Result<UserAction>
where
    I: GameInterface + ?Sized,
{
    loop {
        if let Some(action) = interface.read_action(guess)? {
            return Ok(action);
        }
    }
}

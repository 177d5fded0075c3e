// Library interface for wordle-assistant
// This allows integration tests to access internal modules

pub mod candidate;
pub mod cli;
pub mod constraints;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod predicate;
pub mod suggest;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use candidate::{Candidate, WORD_LENGTH};
pub use constraints::{ConstraintState, Feedback, Mark};
pub use error::{FeedbackError, SessionError, SourceError, UpdateError};
pub use game_state::{GameInterface, SessionOutcome, UserAction, game_loop};
pub use predicate::{Predicate, Rule};
pub use suggest::{
    MAX_SUGGESTIONS, Suggestions, filter_candidates, suggest, suggest_excluding, suggest_with_count,
};
pub use wordbank::{
    CommandSource, EmbeddedSource, FileSource, WordSource, candidates_from_words, is_playable,
    load_candidates,
};

use std::collections::BTreeSet;

/// Number of letters in every playable word.
pub const WORD_LENGTH: usize = 5;

/// A dictionary word together with the lookup views the predicate needs.
///
/// The positional letters and the letter set are derived once from the word
/// and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    word: String,
    letters: [char; WORD_LENGTH],
    letter_set: BTreeSet<char>,
}

impl Candidate {
    /// Builds a candidate, or `None` if `word` is not exactly five characters.
    ///
    /// Case and alphabet are not checked here. Only words accepted by
    /// [`is_playable`](crate::wordbank::is_playable) can be guessed in
    /// [`game_loop`](crate::game_state::game_loop), because feedback can only
    /// be folded in for lowercase ASCII guesses.
    #[must_use]
    pub fn new(word: &str) -> Option<Self> {
        let mut letters = [' '; WORD_LENGTH];
        let mut chars = word.chars();
        for slot in &mut letters {
            *slot = chars.next()?;
        }
        if chars.next().is_some() {
            return None;
        }

        Some(Self {
            word: word.to_string(),
            letters,
            letter_set: letters.iter().copied().collect(),
        })
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub const fn letters(&self) -> &[char; WORD_LENGTH] {
        &self.letters
    }

    #[must_use]
    pub const fn letter_set(&self) -> &BTreeSet<char> {
        &self.letter_set
    }

    /// Number of distinct letters, used as the ranking score.
    #[must_use]
    pub fn distinct_letters(&self) -> usize {
        self.letter_set.len()
    }
}

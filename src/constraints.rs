//! Accumulated clue state and the rule that folds new feedback into it.

use crate::candidate::WORD_LENGTH;
use crate::error::{FeedbackError, UpdateError};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Outcome for one letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Right letter, right position.
    Green,
    /// Letter occurs elsewhere in the word.
    Yellow,
    /// Letter does not occur (again) in the word.
    Gray,
}

impl Mark {
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' => Some(Self::Green),
            'y' => Some(Self::Yellow),
            '.' | 'x' | '-' => Some(Self::Gray),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Green => 'g',
            Self::Yellow => 'y',
            Self::Gray => '.',
        }
    }
}

/// Marks for all five positions of one guess, aligned by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback([Mark; WORD_LENGTH]);

impl Feedback {
    pub const ALL_GREEN: Self = Self([Mark::Green; WORD_LENGTH]);

    #[must_use]
    pub const fn new(marks: [Mark; WORD_LENGTH]) -> Self {
        Self(marks)
    }

    #[must_use]
    pub const fn marks(&self) -> &[Mark; WORD_LENGTH] {
        &self.0
    }

    /// True for `ggggg`.
    #[must_use]
    pub fn is_win(&self) -> bool {
        *self == Self::ALL_GREEN
    }
}

impl FromStr for Feedback {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != WORD_LENGTH {
            return Err(FeedbackError::WrongLength(count));
        }
        let mut marks = [Mark::Gray; WORD_LENGTH];
        for (slot, c) in marks.iter_mut().zip(s.chars()) {
            *slot = Mark::from_char(c).ok_or(FeedbackError::InvalidMark(c))?;
        }
        Ok(Self(marks))
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|mark| write!(f, "{}", mark.to_char()))
    }
}

/// Everything learned from the feedback of previous guesses.
///
/// A state is never modified in place; [`ConstraintState::update`] returns a
/// new value, so earlier states stay available for replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintState {
    greens: BTreeMap<char, BTreeSet<usize>>,
    yellows: BTreeMap<char, BTreeSet<usize>>,
    grays: BTreeSet<char>,
}

impl ConstraintState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Letter -> positions where it is known to sit.
    #[must_use]
    pub const fn greens(&self) -> &BTreeMap<char, BTreeSet<usize>> {
        &self.greens
    }

    /// Letter -> positions where it is present in the word but does not sit.
    #[must_use]
    pub const fn yellows(&self) -> &BTreeMap<char, BTreeSet<usize>> {
        &self.yellows
    }

    /// Letters marked gray at least once. Only meaningful for letters that
    /// are not in [`ConstraintState::known_letters`].
    #[must_use]
    pub const fn grays(&self) -> &BTreeSet<char> {
        &self.grays
    }

    /// Letters confirmed to occur somewhere, through a green or yellow mark.
    #[must_use]
    pub fn known_letters(&self) -> BTreeSet<char> {
        self.greens
            .keys()
            .chain(self.yellows.keys())
            .copied()
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.greens.is_empty() && self.yellows.is_empty() && self.grays.is_empty()
    }

    /// Folds one guess and its feedback into a new state.
    ///
    /// # Errors
    /// Returns [`UpdateError::InvalidGuess`] unless `guess` is exactly five
    /// lowercase ASCII letters.
    pub fn update(&self, guess: &str, feedback: &Feedback) -> Result<Self, UpdateError> {
        if guess.len() != WORD_LENGTH || !guess.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(UpdateError::InvalidGuess(guess.to_string()));
        }

        let mut next = self.clone();
        for (pos, (letter, mark)) in guess.chars().zip(feedback.marks()).enumerate() {
            match mark {
                Mark::Green => {
                    next.greens.entry(letter).or_default().insert(pos);
                }
                Mark::Yellow => {
                    next.yellows.entry(letter).or_default().insert(pos);
                }
                Mark::Gray => {
                    next.grays.insert(letter);
                }
            }
        }
        Ok(next)
    }
}

impl fmt::Display for ConstraintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |map: &BTreeMap<char, BTreeSet<usize>>| {
            map.iter()
                .map(|(letter, positions)| {
                    let positions: Vec<String> = positions.iter().map(usize::to_string).collect();
                    format!("{letter}@{}", positions.join(","))
                })
                .collect::<Vec<_>>()
                .join(" ")
        };
        write!(
            f,
            "greens[{}] yellows[{}] grays[{}]",
            render(&self.greens),
            render(&self.yellows),
            self.grays.iter().collect::<String>()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fb(s: &str) -> Feedback {
        s.parse().unwrap()
    }

    fn positions(list: &[usize]) -> BTreeSet<usize> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_parse_feedback() {
        let feedback = fb("gy.gy");
        assert_eq!(
            feedback.marks(),
            &[Mark::Green, Mark::Yellow, Mark::Gray, Mark::Green, Mark::Yellow]
        );
        assert_eq!(feedback.to_string(), "gy.gy");
    }

    #[test]
    fn test_parse_feedback_case_and_aliases() {
        assert_eq!(fb("GYXg-"), fb("gy.g."));
    }

    #[test]
    fn test_parse_feedback_rejects_bad_input() {
        assert_eq!("gggg".parse::<Feedback>(), Err(FeedbackError::WrongLength(4)));
        assert_eq!("gggggg".parse::<Feedback>(), Err(FeedbackError::WrongLength(6)));
        assert_eq!("ggbgg".parse::<Feedback>(), Err(FeedbackError::InvalidMark('b')));
        assert_eq!("".parse::<Feedback>(), Err(FeedbackError::WrongLength(0)));
    }

    #[test]
    fn test_win_detection() {
        assert!(fb("ggggg").is_win());
        assert!(fb("GGGGG").is_win());
        assert!(!fb("gggg.").is_win());
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = ConstraintState::new();
        assert!(state.is_empty());
        assert!(state.known_letters().is_empty());
    }

    #[test]
    fn test_update_later_example() {
        let state = ConstraintState::new().update("later", &fb("...gy")).unwrap();

        assert_eq!(state.greens().len(), 1);
        assert_eq!(state.greens()[&'e'], positions(&[3]));
        assert_eq!(state.yellows().len(), 1);
        assert_eq!(state.yellows()[&'r'], positions(&[4]));
        assert_eq!(state.grays(), &BTreeSet::from(['a', 'l', 't']));
    }

    #[test]
    fn test_update_does_not_mutate_prior_state() {
        let first = ConstraintState::new().update("crane", &fb("..y..")).unwrap();
        let snapshot = first.clone();
        let second = first.update("stale", &fb("..g..")).unwrap();

        assert_eq!(first, snapshot);
        assert_ne!(first, second);
        assert_eq!(second.yellows()[&'a'], positions(&[2]));
        assert_eq!(second.greens()[&'a'], positions(&[2]));
    }

    #[test]
    fn test_update_accumulates_yellow_positions() {
        let state = ConstraintState::new()
            .update("earth", &fb("y...."))
            .unwrap()
            .update("mecca", &fb(".y..."))
            .unwrap();
        assert_eq!(state.yellows()[&'e'], positions(&[0, 1]));
    }

    #[test]
    fn test_repeated_letter_green_and_gray() {
        let state = ConstraintState::new().update("aabcd", &fb("g....")).unwrap();
        assert_eq!(state.greens()[&'a'], positions(&[0]));
        assert!(state.grays().contains(&'a'));
        assert!(state.known_letters().contains(&'a'));
    }

    #[test]
    fn test_same_letter_green_at_two_positions() {
        let state = ConstraintState::new().update("error", &fb("ggggg")).unwrap();
        assert_eq!(state.greens()[&'r'], positions(&[1, 2, 4]));
    }

    #[test]
    fn test_refolding_same_feedback_is_idempotent() {
        let once = ConstraintState::new().update("crane", &fb("gy..y")).unwrap();
        let twice = once.update("crane", &fb("gy..y")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_update_rejects_invalid_guess() {
        let state = ConstraintState::new();
        let feedback = fb(".....");
        assert_eq!(
            state.update("CRANE", &feedback),
            Err(UpdateError::InvalidGuess("CRANE".to_string()))
        );
        assert!(state.update("cran", &feedback).is_err());
        assert!(state.update("cranes", &feedback).is_err());
        assert!(state.update("cr4ne", &feedback).is_err());
    }

    #[test]
    fn test_display() {
        let state = ConstraintState::new().update("later", &fb("...gy")).unwrap();
        assert_eq!(state.to_string(), "greens[e@3] yellows[r@4] grays[alt]");
    }
}

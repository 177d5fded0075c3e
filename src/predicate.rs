//! Turns a [`ConstraintState`] into a test that candidates must pass.
//!
//! The predicate is a conjunction of rules. A rule is only present when the
//! state holds the facts it checks, so the predicate of an empty state
//! accepts every candidate.

use crate::candidate::{Candidate, WORD_LENGTH};
use crate::constraints::ConstraintState;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// `(letter, position)` pairs that must match exactly.
    Greens(Vec<(char, usize)>),
    /// Per position, the letters a yellow mark has ruled out there.
    NoBadYellows([BTreeSet<char>; WORD_LENGTH]),
    /// Letters that must occur somewhere in the word.
    HasYellows(BTreeSet<char>),
    /// Gray letters, checked only against letters not already known to occur.
    Grays {
        known: BTreeSet<char>,
        grays: BTreeSet<char>,
    },
}

impl Rule {
    #[must_use]
    pub fn matches(&self, candidate: &Candidate) -> bool {
        match self {
            Self::Greens(required) => required
                .iter()
                .all(|&(letter, pos)| candidate.letters()[pos] == letter),
            Self::NoBadYellows(prohibited) => candidate
                .letters()
                .iter()
                .zip(prohibited)
                .all(|(letter, banned)| !banned.contains(letter)),
            Self::HasYellows(letters) => letters.is_subset(candidate.letter_set()),
            // A gray on a repeated letter whose other occurrence is green or
            // yellow means "no further copies", not "absent".
            Self::Grays { known, grays } => candidate
                .letter_set()
                .difference(known)
                .all(|letter| !grays.contains(letter)),
        }
    }
}

/// Conjunction of the rules derived from one constraint state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    rules: Vec<Rule>,
}

impl Predicate {
    #[must_use]
    pub fn build(state: &ConstraintState) -> Self {
        let mut rules = Vec::with_capacity(4);

        if !state.greens().is_empty() {
            let required = state
                .greens()
                .iter()
                .flat_map(|(&letter, positions)| positions.iter().map(move |&pos| (letter, pos)))
                .collect();
            rules.push(Rule::Greens(required));
        }

        if !state.yellows().is_empty() {
            let mut prohibited: [BTreeSet<char>; WORD_LENGTH] = Default::default();
            for (&letter, positions) in state.yellows() {
                for &pos in positions {
                    prohibited[pos].insert(letter);
                }
            }
            rules.push(Rule::NoBadYellows(prohibited));
            rules.push(Rule::HasYellows(state.yellows().keys().copied().collect()));
        }

        rules.push(Rule::Grays {
            known: state.known_letters(),
            grays: state.grays().clone(),
        });

        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.rules.iter().all(|rule| rule.matches(candidate))
    }
}

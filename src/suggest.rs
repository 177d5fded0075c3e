use crate::candidate::Candidate;
use crate::constraints::ConstraintState;
use crate::predicate::Predicate;
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Upper bound on the number of words returned by [`suggest`].
pub const MAX_SUGGESTIONS: usize = 10;

/// Ranked suggestions plus how many candidates are still consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    pub words: Vec<String>,
    pub remaining: usize,
}

impl Suggestions {
    /// The word to play next, if any candidate survives.
    #[must_use]
    pub fn best(&self) -> Option<&str> {
        self.words.first().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Candidates consistent with `state`, in dictionary order.
#[must_use]
pub fn filter_candidates<'a>(
    state: &ConstraintState,
    candidates: &'a [Candidate],
) -> Vec<&'a Candidate> {
    let predicate = Predicate::build(state);
    candidates.iter().filter(|c| predicate.matches(c)).collect()
}

/// Orders survivors by distinct-letter count, highest first. The sort is
/// stable, so ties keep dictionary order.
pub fn rank(survivors: &mut [&Candidate]) {
    survivors.sort_by_key(|c| Reverse(c.distinct_letters()));
}

#[must_use]
pub fn suggest_with_count(state: &ConstraintState, candidates: &[Candidate]) -> Suggestions {
    suggest_excluding(state, candidates, &BTreeSet::new())
}

/// Like [`suggest_with_count`], but never offers a word in `played`.
///
/// Grays are kept as a letter set, so a guess answered with a non-winning
/// pattern can still satisfy its own constraints. Passing the words already
/// played stops the loop from offering one of them again.
#[must_use]
pub fn suggest_excluding(
    state: &ConstraintState,
    candidates: &[Candidate],
    played: &BTreeSet<String>,
) -> Suggestions {
    let mut survivors = filter_candidates(state, candidates);
    survivors.retain(|c| !played.contains(c.word()));
    rank(&mut survivors);
    Suggestions {
        remaining: survivors.len(),
        words: survivors
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|c| c.word().to_string())
            .collect(),
    }
}

/// Up to [`MAX_SUGGESTIONS`] words consistent with `state`, best first.
/// An empty result means the accumulated feedback is contradictory.
#[must_use]
pub fn suggest(state: &ConstraintState, candidates: &[Candidate]) -> Vec<String> {
    suggest_with_count(state, candidates).words
}

//! Hash set helpers for canonical word lookups
//!
//! Chunk word sets are queried once per cue word for every chunk on every
//! caption change, so they use ahash rather than SipHash.

use ahash::RandomState;
use std::collections::HashSet;

/// Hash set keyed with ahash
pub type WordSet = HashSet<String, RandomState>;

/// Create an empty word set with the given capacity
#[must_use]
pub fn create_word_set(capacity: usize) -> WordSet {
    HashSet::with_capacity_and_hasher(capacity, RandomState::new())
}

/// Collect words into a word set
pub fn word_set_from<'a, I>(words: I) -> WordSet
where
    I: IntoIterator<Item = &'a str>,
{
    let iter = words.into_iter();
    let mut set = create_word_set(iter.size_hint().0);
    set.extend(iter.map(str::to_owned));
    set
}

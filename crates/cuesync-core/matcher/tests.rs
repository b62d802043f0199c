//! Tests for cue matching

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn index_of(chunks: &[&str]) -> ChunkIndex {
    ChunkIndex::from_chunks(chunks.iter().copied())
}

#[test]
fn exact_window_in_first_chunk() {
    let index = index_of(&["The quick brown fox jumps.", "Over the lazy dog."]);
    assert_eq!(
        match_cue("quick brown fox", &index),
        Some(MatchResult::with_range(0, WordRange::new(1, 3)))
    );
}

#[test]
fn empty_cue_matches_nothing() {
    let index = index_of(&["Hello world today."]);
    assert_eq!(match_cue("", &index), None);
    assert_eq!(match_cue("   ", &index), None);
    assert_eq!(match_cue("♪ … ♪", &index), None);
}

#[test]
fn misspelled_cue_still_finds_range() {
    let index = index_of(&["Energy transition requires systemic change."]);
    let details = explain_cue(
        "energy transiton requires",
        &index,
        &ScoringWeights::default(),
    )
    .unwrap();
    assert_eq!(details.result.chunk_index, 0);
    assert_eq!(details.result.word_range, Some(WordRange::new(0, 2)));
    assert_eq!(details.tier, RangeTier::Sequential);
    assert!(!details.score.is_exact());
}

#[test]
fn unrelated_cue_clears() {
    let index = index_of(&["Alpha beta gamma.", "Delta epsilon."]);
    assert_eq!(match_cue("zeta eta theta", &index), None);
}

#[test]
fn empty_index_never_matches() {
    assert_eq!(match_cue("anything", &ChunkIndex::empty()), None);
}

#[test]
fn exact_match_has_absolute_priority() {
    // Chunk 0 shares many words with the cue and contains it as a substring
    // of a longer text; chunk 1 is exactly the cue.
    let index = index_of(&[
        "we talk today about the energy energy energy transition today",
        "Energy transition.",
    ]);
    let details = explain_cue("energy transition", &index, &ScoringWeights::default()).unwrap();
    assert_eq!(details.result.chunk_index, 1);
    assert!(details.score.is_exact());
    assert_eq!(details.result.word_range, Some(WordRange::new(0, 1)));
}

#[test]
fn first_exact_chunk_wins() {
    let index = index_of(&["Intro.", "Thank you.", "Middle part.", "Thank you!"]);
    assert_eq!(match_cue("thank you", &index).map(|r| r.chunk_index), Some(1));
}

#[test]
fn ties_go_to_the_first_chunk() {
    let index = index_of(&["red blue", "red green"]);
    assert_eq!(match_cue("red", &index).map(|r| r.chunk_index), Some(0));
}

#[test]
fn cue_spanning_two_chunks_picks_best_overlap() {
    let index = index_of(&[
        "It started in the spring.",
        "Nobody expected the harvest to fail.",
    ]);
    let result = match_cue("spring nobody expected the harvest", &index).unwrap();
    assert_eq!(result.chunk_index, 1);
    assert_eq!(result.word_range, Some(WordRange::new(0, 3)));
}

#[test]
fn cue_containing_chunk_highlights_whole_chunk_words() {
    let index = index_of(&["Yes.", "Something else entirely."]);
    let result = match_cue("yes of course", &index).unwrap();
    assert_eq!(result.chunk_index, 0);
    assert_eq!(result.word_range, Some(WordRange::single(0)));
}

#[test]
fn accents_and_case_are_ignored() {
    let index = index_of(&["L'été sera chaud.", "Puis l'automne."]);
    let result = match_cue("ETE SERA", &index).unwrap();
    assert_eq!(result.chunk_index, 0);
}

#[test]
fn zero_weights_never_match_partially() {
    let weights = ScoringWeights {
        chunk_contains_cue: 0.0,
        cue_contains_chunk: 0.0,
        per_shared_word: 0.0,
        cue_coverage: 0.0,
        chunk_coverage: 0.0,
        ..ScoringWeights::default()
    };
    let index = index_of(&["one two three"]);
    assert_eq!(match_cue_with("one two", &index, &weights), None);
    assert!(match_cue_with("One, two three", &index, &weights).is_some());
}

#[test]
fn weights_validation() {
    assert!(ScoringWeights::default().validate().is_ok());

    let negative = ScoringWeights {
        per_shared_word: -1.0,
        ..ScoringWeights::default()
    };
    assert!(matches!(negative.validate(), Err(crate::CoreError::Config(_))));

    let nan = ScoringWeights {
        cue_coverage: f64::NAN,
        ..ScoringWeights::default()
    };
    assert!(nan.validate().is_err());

    let index = Rc::new(ChunkIndex::empty());
    assert!(CueMatcher::with_weights(index, negative).is_err());
}

#[test]
fn matcher_remembers_every_cue() {
    let index = Rc::new(index_of(&["Hello world today."]));
    let mut matcher = CueMatcher::new(index);

    assert!(matcher.match_cue("hello world").is_some());
    assert_eq!(matcher.last_cue(), Some("hello world"));

    assert!(matcher.match_cue("").is_none());
    assert_eq!(matcher.last_cue(), Some(""));
    assert_eq!(matcher.replayable_cue(), None);
    assert_eq!(matcher.replay(), None);

    assert!(matcher.match_cue("nothing shared").is_none());
    assert_eq!(matcher.last_cue(), Some("nothing shared"));

    matcher.reset();
    assert_eq!(matcher.last_cue(), None);
}

#[test]
fn replay_after_index_replacement() {
    let english = Rc::new(index_of(&["Hello the world.", "Goodbye now."]));
    let french = Rc::new(index_of(&["Salut.", "Bonjour le monde."]));
    let mut matcher = CueMatcher::new(english);

    assert_eq!(matcher.match_cue("bonjour le monde"), None);

    matcher.replace_index(Rc::clone(&french));
    assert_eq!(matcher.index().len(), 2);
    let replayed = matcher.replay().unwrap();
    assert_eq!(
        replayed,
        Some(MatchResult::with_range(1, WordRange::new(0, 2)))
    );
    assert_eq!(matcher.last_cue(), Some("bonjour le monde"));
}

#[test]
fn bracketed_sound_label_matches_as_word() {
    let index = index_of(&["[Musique] ♪", "Plain words here."]);
    let result = match_cue("musique", &index).unwrap();
    assert_eq!(result.chunk_index, 0);
    assert_eq!(result.word_range, Some(WordRange::single(0)));

    let details = explain_cue("plain here", &index, &ScoringWeights::default()).unwrap();
    assert_eq!(details.result.word_range, Some(WordRange::new(0, 2)));
}

#[test]
fn contractions_keep_their_word_range() {
    let index = index_of(&["Je pense que c'est l'été maintenant."]);
    let details = explain_cue("c'est l'été", &index, &ScoringWeights::default()).unwrap();
    assert_eq!(details.result.chunk_index, 0);
    assert_eq!(details.result.word_range, Some(WordRange::new(3, 4)));
    assert_eq!(details.tier, RangeTier::Exact);

    let index = index_of(&["Well, I don't know what you're saying."]);
    let result = match_cue("i don't know", &index).unwrap();
    assert_eq!(result.word_range, Some(WordRange::new(1, 3)));
}

#[test]
fn punctuation_only_cue_is_not_replayed() {
    let index = Rc::new(index_of(&["Hello world today."]));
    let mut matcher = CueMatcher::new(index);

    assert!(matcher.match_cue("♪ … ♪").is_none());
    assert_eq!(matcher.last_cue(), Some("♪ … ♪"));
    assert_eq!(matcher.replayable_cue(), None);
    assert_eq!(matcher.replay(), None);
}

#[test]
fn remembered_cue_is_replayed() {
    let mut matcher = CueMatcher::new(Rc::new(ChunkIndex::empty()));
    matcher.remember("hello world");
    assert_eq!(matcher.last_cue(), Some("hello world"));

    matcher.replace_index(Rc::new(index_of(&["Hello world today."])));
    assert_eq!(
        matcher.replay(),
        Some(Some(MatchResult::with_range(0, WordRange::new(0, 1))))
    );
}

proptest! {
    #[test]
    fn matching_is_deterministic(
        chunks in prop::collection::vec("[a-e ]{1,30}", 1..6),
        cue in "[a-e ]{0,20}",
    ) {
        let index = ChunkIndex::from_chunks(chunks.iter().cloned());
        prop_assert_eq!(match_cue(&cue, &index), match_cue(&cue, &index));
    }

    #[test]
    fn results_stay_in_bounds(
        chunks in prop::collection::vec("[a-f .!]{1,40}", 1..6),
        cue in "[a-f ]{1,20}",
    ) {
        let index = ChunkIndex::from_chunks(chunks.iter().cloned());
        if let Some(result) = match_cue(&cue, &index) {
            let chunk = index.chunk(result.chunk_index).unwrap();
            if let Some(range) = result.word_range {
                prop_assert!(range.start <= range.end);
                prop_assert!(range.end < chunk.words.len());
            }
        }
    }

    #[test]
    fn exact_chunk_always_wins(
        chunks in prop::collection::vec("[a-d]{1,3}( [a-d]{1,3}){0,5}", 2..6),
        pick in 0usize..6,
    ) {
        let index = ChunkIndex::from_chunks(chunks.iter().cloned());
        let pick = pick % index.len();
        let target = &index.chunks()[pick].canonical;
        let first_exact = index
            .chunks()
            .iter()
            .position(|chunk| &chunk.canonical == target)
            .unwrap();
        let result = match_cue(&index.chunks()[pick].text, &index).unwrap();
        prop_assert_eq!(result.chunk_index, first_exact);
    }
}

use rand::seq::SliceRandom;
use rand::Rng;

pub const CHOICES_PER_QUESTION: usize = 4;
const DISTRACTORS_PER_QUESTION: usize = CHOICES_PER_QUESTION - 1;

/// How wrong answers get fabricated for a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DistractorStrategy {
    /// Sample standalone words out of the source text.
    #[default]
    WordSampling,
    /// Rewrite the correct answer by swapping known keywords.
    KeywordSwap,
}

const KEYWORD_SWAPS: &[(&str, &str)] = &[
    ("Earth", "Mars"),
    ("Sun", "Moon"),
    ("solar system", "galaxy"),
    ("north", "south"),
    ("largest", "smallest"),
    ("first", "last"),
];

// Used when the source text cannot supply three distractors.
const FILLER_CHOICES: [&str; 3] = [
    "None of the above",
    "Not stated in the passage",
    "All of the above",
];

/// Every distinct word in the text that could pass for an answer choice:
/// title-case or fully alphabetic, with sentence punctuation trimmed off.
fn word_pool(text: &str) -> Vec<String> {
    let mut words: Vec<String> = text
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| matches!(c, ',' | '.' | '?' | '!')))
        .filter(|word| !word.is_empty())
        .filter(|word| is_title_case(word) || word.chars().all(char::is_alphabetic))
        .map(str::to_string)
        .collect();
    words.sort_unstable();
    words.dedup();
    words
}

fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.is_uppercase() && chars.all(|c| c.is_lowercase()),
        None => false,
    }
}

/// Strategy A: up to three words sampled from the source text, skipping any
/// word that already occurs inside the correct answer.
pub fn sampled_words<R: Rng + ?Sized>(rng: &mut R, correct: &str, text: &str) -> Vec<String> {
    let mut pool = word_pool(text);
    pool.shuffle(rng);

    let correct_lower = correct.to_lowercase();
    pool.into_iter()
        .filter(|word| {
            let lower = word.to_lowercase();
            !correct_lower.contains(&lower) && lower != correct_lower
        })
        .take(DISTRACTORS_PER_QUESTION)
        .collect()
}

/// Strategy B: rewrite the correct answer once per keyword pair. A pair whose
/// keyword is absent leaves the answer unchanged and would masquerade as a
/// second correct choice, so those are dropped.
pub fn keyword_swaps(correct: &str) -> Vec<String> {
    let mut swapped = Vec::new();
    for (keyword, substitute) in KEYWORD_SWAPS {
        if swapped.len() == DISTRACTORS_PER_QUESTION {
            break;
        }
        let candidate = correct.replace(keyword, substitute);
        if candidate != correct && !swapped.contains(&candidate) {
            swapped.push(candidate);
        }
    }
    swapped
}

/// Builds the displayed choice list: the correct answer plus up to three
/// distractors, shuffled. The correct answer ends up in the list exactly
/// once; short pools are padded with fixed fillers.
pub fn build_choices<R: Rng + ?Sized>(
    rng: &mut R,
    correct: &str,
    source_text: &str,
    strategy: DistractorStrategy,
) -> Vec<String> {
    let mut candidates = match strategy {
        DistractorStrategy::WordSampling => sampled_words(rng, correct, source_text),
        DistractorStrategy::KeywordSwap => keyword_swaps(correct),
    };

    // Keyword swaps rarely fill all three slots; top up from the word pool.
    if candidates.len() < DISTRACTORS_PER_QUESTION {
        candidates.extend(sampled_words(rng, correct, source_text));
    }

    let correct_lower = correct.to_lowercase();
    let mut distractors: Vec<String> = Vec::with_capacity(DISTRACTORS_PER_QUESTION);
    for candidate in candidates {
        if distractors.len() == DISTRACTORS_PER_QUESTION {
            break;
        }
        let lower = candidate.to_lowercase();
        if lower != correct_lower && !distractors.iter().any(|d| d.to_lowercase() == lower) {
            distractors.push(candidate);
        }
    }

    for filler in FILLER_CHOICES {
        if distractors.len() == DISTRACTORS_PER_QUESTION {
            break;
        }
        let lower = filler.to_lowercase();
        if lower != correct_lower && !distractors.iter().any(|d| d.to_lowercase() == lower) {
            distractors.push(filler.to_string());
        }
    }

    let mut choices = Vec::with_capacity(CHOICES_PER_QUESTION);
    choices.push(correct.to_string());
    choices.extend(distractors);
    choices.shuffle(rng);
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PASSAGE: &str = "The Roman Empire reached its greatest extent under Trajan, \
        stretching from Britain to Mesopotamia around the Mediterranean Sea.";

    #[test]
    fn sampling_is_deterministic_for_a_fixed_seed() {
        let mut first_rng = StdRng::seed_from_u64(42);
        let mut second_rng = StdRng::seed_from_u64(42);

        let first = sampled_words(&mut first_rng, "Trajan", PASSAGE);
        let second = sampled_words(&mut second_rng, "Trajan", PASSAGE);

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn sampled_words_never_overlap_the_correct_answer() {
        let mut rng = StdRng::seed_from_u64(7);
        let correct = "the Roman Empire";

        for word in sampled_words(&mut rng, correct, PASSAGE) {
            let lower = word.to_lowercase();
            assert!(!correct.to_lowercase().contains(&lower), "leaked '{word}'");
        }
    }

    #[test]
    fn choices_hold_four_entries_with_the_correct_answer_exactly_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let choices = build_choices(&mut rng, "Trajan", PASSAGE, DistractorStrategy::WordSampling);

        assert_eq!(choices.len(), CHOICES_PER_QUESTION);
        let hits = choices
            .iter()
            .filter(|c| c.to_lowercase() == "trajan")
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn short_pool_is_padded_with_fillers() {
        let mut rng = StdRng::seed_from_u64(2);
        let choices = build_choices(&mut rng, "Paris", "Paris", DistractorStrategy::WordSampling);

        assert_eq!(choices.len(), CHOICES_PER_QUESTION);
        assert!(choices.iter().any(|c| c == "Paris"));
        for filler in FILLER_CHOICES {
            assert!(choices.iter().any(|c| c == filler), "missing '{filler}'");
        }
    }

    #[test]
    fn keyword_swap_replaces_known_keywords() {
        let swapped = keyword_swaps("Earth is the third planet from the Sun.");

        assert!(swapped.contains(&"Mars is the third planet from the Sun.".to_string()));
        assert!(swapped.contains(&"Earth is the third planet from the Moon.".to_string()));
    }

    #[test]
    fn keyword_swap_without_matches_yields_nothing() {
        assert!(keyword_swaps("Paris").is_empty());
    }

    #[test]
    fn keyword_swap_choices_keep_original_and_substitution() {
        let source = "Earth is the third planet from the Sun.";
        let mut rng = StdRng::seed_from_u64(3);
        let choices = build_choices(&mut rng, source, source, DistractorStrategy::KeywordSwap);

        assert_eq!(choices.len(), CHOICES_PER_QUESTION);
        assert!(choices.iter().any(|c| c == source));
        assert!(choices
            .iter()
            .any(|c| c == "Mars is the third planet from the Sun."));
        let hits = choices
            .iter()
            .filter(|c| c.to_lowercase() == source.to_lowercase())
            .count();
        assert_eq!(hits, 1);
    }
}

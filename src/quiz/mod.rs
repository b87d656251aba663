pub mod distractors;
pub mod extract;
pub mod generator;
pub mod source;

use rand::Rng;

use distractors::DistractorStrategy;

#[derive(Debug, Clone, Default)]
pub struct Quiz {
    pub questions: Vec<Question>,
    pub score: usize,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            score: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Question {
    pub text: String,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn new(text: String, answers: Vec<Answer>) -> Self {
        Self { text, answers }
    }

    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Answer {
    pub text: String,
    pub is_correct: bool,
}

impl Answer {
    pub fn new(text: String, is_correct: bool) -> Self {
        Self { text, is_correct }
    }
}

/// Session-level settings, built once in `main` and handed to the runner.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub strategy: DistractorStrategy,
    pub questions_per_quiz: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            strategy: DistractorStrategy::default(),
            questions_per_quiz: 5,
        }
    }
}

/// Builds one quiz question out of a raw generated line: parse it into a
/// question/answer pair, fabricate distractors from the source text, and
/// shuffle so the correct choice isn't always the first one.
pub fn question_from_output<R: Rng + ?Sized>(
    rng: &mut R,
    raw: &str,
    source_text: &str,
    strategy: DistractorStrategy,
) -> Question {
    let (text, correct) = extract::split_question_answer(raw);
    let correct_lower = correct.to_lowercase();
    let answers = distractors::build_choices(rng, &correct, source_text, strategy)
        .into_iter()
        .map(|choice| {
            let is_correct = choice.to_lowercase() == correct_lower;
            Answer::new(choice, is_correct)
        })
        .collect();
    Question::new(text, answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PASSAGE: &str = "The Nile flows north through Egypt into the Mediterranean, \
        past Cairo and the ancient temples of Luxor.";

    #[test]
    fn question_gets_four_answers_with_one_marked_correct() {
        let mut rng = StdRng::seed_from_u64(9);
        let question = question_from_output(
            &mut rng,
            "Which river flows through Egypt? A: The Nile",
            PASSAGE,
            DistractorStrategy::WordSampling,
        );

        assert_eq!(question.text, "Which river flows through Egypt?");
        assert_eq!(question.answers.len(), distractors::CHOICES_PER_QUESTION);
        let correct: Vec<_> = question.answers.iter().filter(|a| a.is_correct).collect();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].text, "The Nile");
    }

    #[test]
    fn degenerate_output_still_becomes_an_answerable_question() {
        let mut rng = StdRng::seed_from_u64(10);
        let question = question_from_output(
            &mut rng,
            "A statement with no question mark",
            PASSAGE,
            DistractorStrategy::WordSampling,
        );

        assert_eq!(question.text, "A statement with no question mark");
        let correct = question.correct_answer().expect("one correct answer");
        assert_eq!(correct.text, extract::UNKNOWN_ANSWER);
    }

    #[test]
    fn score_starts_at_zero() {
        let quiz = Quiz::new(vec![Question::default()]);
        assert_eq!(quiz.score, 0);
        assert_eq!(quiz.questions.len(), 1);
    }
}

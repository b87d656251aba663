use anyhow::Result;
use chatgpt::client::ChatGPT;
use log::debug;

/// Instruction tag prefixed to every generation prompt.
pub const PROMPT_TASK_TAG: &str = "generate question";

// Only the head of the source text is sent to the model.
const SOURCE_CHAR_BUDGET: usize = 500;

/// Knobs for one generation call. Backends honor what they can express:
/// the chat API has no beam controls, so `num_beams` degrades to the number
/// of candidate lines requested from the model.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub max_length: usize,
    pub num_return_sequences: usize,
    pub num_beams: usize,
    pub early_stopping: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 64,
            num_return_sequences: 5,
            num_beams: 5,
            early_stopping: true,
        }
    }
}

impl GenerationParams {
    /// Tighter output bound used for the short built-in passages.
    pub fn short_form() -> Self {
        Self {
            max_length: 50,
            ..Self::default()
        }
    }
}

/// A text-to-text generation capability: given a source text and parameters,
/// return candidate question lines. Anything meeting this contract can drive
/// the quiz; tests substitute a scripted backend.
pub trait GenerateText {
    async fn generate(&self, text: &str, params: &GenerationParams) -> Result<Vec<String>>;
}

/// The ChatGPT-backed generator used by the real session.
pub struct GptGenerator {
    client: ChatGPT,
}

impl GptGenerator {
    pub fn new(client: ChatGPT) -> Self {
        Self { client }
    }
}

impl GenerateText for GptGenerator {
    async fn generate(&self, text: &str, params: &GenerationParams) -> Result<Vec<String>> {
        let prompt = build_prompt(text, params);
        debug!("Sending generation prompt ({} chars)", prompt.len());

        let response = self.client.send_message(&prompt).await?;
        let content = response.message().clone().content;
        debug!("Completion: {:?}", content);

        Ok(candidate_lines(&content, params))
    }
}

pub fn build_prompt(text: &str, params: &GenerationParams) -> String {
    let excerpt: String = text.chars().take(SOURCE_CHAR_BUDGET).collect();
    let candidates = params.num_beams.max(params.num_return_sequences);
    format!(
        "{PROMPT_TASK_TAG}: write {candidates} multiple-choice quiz questions about the \
         passage below. Put each one on its own line, formatted exactly as \
         \"Question text? A: short answer\". Keep every line under {max} words and only \
         ask about facts stated in the passage.\n\n{excerpt}",
        max = params.max_length
    )
}

/// Turns a raw completion into candidate question lines. Blank lines are
/// dropped; duplicates are kept, downstream parsing tolerates them.
fn candidate_lines(content: &str, params: &GenerationParams) -> Vec<String> {
    let mut lines: Vec<String> = content
        .lines()
        .map(strip_enumeration)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if params.early_stopping {
        lines.truncate(params.num_return_sequences);
    }
    lines
}

// Chat models like to number or bullet their lists even when told not to.
fn strip_enumeration(line: &str) -> &str {
    let line = line.trim();
    let without_digits = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() != line.len() {
        without_digits.trim_start_matches(['.', ')']).trim()
    } else {
        line.trim_start_matches('-').trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_the_instruction_tag_and_candidate_count() {
        let prompt = build_prompt("Earth orbits the Sun.", &GenerationParams::default());

        assert!(prompt.starts_with("generate question:"));
        assert!(prompt.contains("write 5 multiple-choice quiz questions"));
        assert!(prompt.contains("Earth orbits the Sun."));
    }

    #[test]
    fn prompt_only_uses_the_first_500_chars_of_the_source() {
        let mut text = "a".repeat(500);
        text.push_str("UNSEEN TAIL");

        let prompt = build_prompt(&text, &GenerationParams::default());
        assert!(!prompt.contains("UNSEEN"));
        assert!(prompt.contains(&"a".repeat(500)));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let text = "é".repeat(600);
        let prompt = build_prompt(&text, &GenerationParams::default());
        assert_eq!(prompt.chars().filter(|c| *c == 'é').count(), 500);
    }

    #[test]
    fn beam_count_wins_when_larger_than_the_requested_sequences() {
        let params = GenerationParams {
            num_beams: 8,
            num_return_sequences: 5,
            ..GenerationParams::default()
        };
        assert!(build_prompt("text", &params).contains("write 8 multiple-choice"));
    }

    #[test]
    fn candidate_lines_strip_enumeration_and_blanks() {
        let content = "1. Who built Rome? A: Romans\n\n2) What is Mars? A: A planet\n- Third? A: Yes";
        let lines = candidate_lines(content, &GenerationParams::default());

        assert_eq!(
            lines,
            vec![
                "Who built Rome? A: Romans",
                "What is Mars? A: A planet",
                "Third? A: Yes",
            ]
        );
    }

    #[test]
    fn early_stopping_keeps_only_the_requested_sequences() {
        let content = "a?\nb?\nc?\nd?\ne?\nf?\ng?";
        let eager = GenerationParams {
            num_return_sequences: 2,
            ..GenerationParams::default()
        };
        assert_eq!(candidate_lines(content, &eager).len(), 2);

        let exhaustive = GenerationParams {
            num_return_sequences: 2,
            early_stopping: false,
            ..GenerationParams::default()
        };
        assert_eq!(candidate_lines(content, &exhaustive).len(), 7);
    }

    #[test]
    fn short_form_tightens_the_length_bound() {
        let params = GenerationParams::short_form();
        assert_eq!(params.max_length, 50);
        assert_eq!(params.num_return_sequences, 5);
    }
}

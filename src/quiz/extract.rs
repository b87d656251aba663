/// Placeholder answer used when the generator output has no usable answer part.
pub const UNKNOWN_ANSWER: &str = "Unknown";

/// Splits a raw generated line into a question and an answer.
///
/// The generator is asked for lines shaped like `"Question? A: answer"`, but
/// nothing guarantees it complies, so this parse never fails: the question is
/// everything up to and including the first `?`, the answer is everything
/// after it with a single leading `A:` stripped. A line without a `?` (or
/// with nothing left after it) gets the placeholder answer instead.
pub fn split_question_answer(raw: &str) -> (String, String) {
    match raw.find('?') {
        Some(idx) => {
            let question = raw[..=idx].to_string();
            let answer = raw[idx + 1..].trim();
            let answer = answer.strip_prefix("A:").unwrap_or(answer).trim();
            if answer.is_empty() {
                (question, UNKNOWN_ANSWER.to_string())
            } else {
                (question, answer.to_string())
            }
        }
        None => (raw.trim().to_string(), UNKNOWN_ANSWER.to_string()),
    }
}

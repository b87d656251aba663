mod quiz;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use chatgpt::{client::ChatGPT, config::ChatGPTEngine};
use dotenv::dotenv;
use log::{debug, info, warn};
use rand::Rng;

use quiz::distractors::DistractorStrategy;
use quiz::generator::{GenerateText, GenerationParams, GptGenerator};
use quiz::source::{Domain, TextSource};
use quiz::{Quiz, QuizConfig};

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();
    info!("Starting quiz session...");

    let api_key = std::env::var("CHATGPT_API_KEY").expect("CHATGPT_API_KEY is not set");

    let gpt = {
        let mut gpt = ChatGPT::new(api_key).expect("Unable to construct the ChatGPT client");

        gpt.config.engine = ChatGPTEngine::Gpt35Turbo;
        gpt.config.timeout = std::time::Duration::from_secs(30);

        gpt
    };
    let generator = GptGenerator::new(gpt);

    let config = QuizConfig {
        strategy: strategy_from_env(),
        ..QuizConfig::default()
    };
    debug!("Session config: {:?}", config);

    let mut rng = rand::thread_rng();
    let stdin = io::stdin();
    let result = run_quiz(
        &generator,
        &config,
        &mut rng,
        &mut stdin.lock(),
        &mut io::stdout(),
    )
    .await;

    if let Err(error) = result {
        eprintln!("The quiz hit an unexpected problem: {error}");
        std::process::exit(1);
    }
}

fn strategy_from_env() -> DistractorStrategy {
    match std::env::var("QUIZ_DISTRACTOR_STRATEGY").ok().as_deref() {
        Some("keyword-swap") => DistractorStrategy::KeywordSwap,
        Some("word-sampling") | None => DistractorStrategy::WordSampling,
        Some(other) => {
            warn!("Unknown distractor strategy '{other}', using word sampling");
            DistractorStrategy::WordSampling
        }
    }
}

/// One full interactive session: pick a text source, generate the questions
/// upfront, walk through them with validated numeric input, then print the
/// score summary. Generic over I/O and the generator so tests can drive it
/// with a script instead of a terminal.
async fn run_quiz<G, R, I, W>(
    generator: &G,
    config: &QuizConfig,
    rng: &mut R,
    input: &mut I,
    out: &mut W,
) -> Result<()>
where
    G: GenerateText,
    R: Rng + ?Sized,
    I: BufRead,
    W: Write,
{
    writeln!(out, "📚 Welcome to the AI-powered learning quiz!")?;
    writeln!(out, "Hand me a chapter and I'll turn it into a quiz for you.\n")?;

    let source = choose_source(input, out)?;
    let text = match source.resolve(rng) {
        Ok(text) => text,
        // File trouble ends the session with a message, not a crash.
        Err(error) => {
            writeln!(out, "❌ {error}. Please check the path and run me again.")?;
            return Ok(());
        }
    };

    writeln!(out, "\n✨ Generating your quiz... Please wait.\n")?;
    let base_params = match source {
        TextSource::FromFile(_) => GenerationParams::default(),
        TextSource::FromDomain(_) => GenerationParams::short_form(),
    };
    let params = GenerationParams {
        num_return_sequences: config.questions_per_quiz,
        ..base_params
    };
    let outputs = generator.generate(&text, &params).await?;
    if outputs.is_empty() {
        writeln!(out, "The generator came back empty-handed. Try a longer text.")?;
        return Ok(());
    }

    let questions = outputs
        .iter()
        .map(|raw| quiz::question_from_output(&mut *rng, raw, &text, config.strategy))
        .collect();
    let mut session = Quiz::new(questions);

    for (number, question) in session.questions.iter().enumerate() {
        writeln!(out, "\n📝 Question {}: {}", number + 1, question.text)?;
        for (idx, answer) in question.answers.iter().enumerate() {
            writeln!(out, "{}. {}", idx + 1, answer.text)?;
        }

        let picked = read_choice(
            input,
            out,
            "👉 Enter the number of your answer: ",
            question.answers.len(),
        )?;
        let chosen = &question.answers[picked - 1];
        let correct = question.correct_answer().unwrap();

        if chosen.text.to_lowercase() == correct.text.to_lowercase() {
            writeln!(out, "✅ Correct!")?;
            session.score += 1;
        } else {
            writeln!(out, "❌ Oops! The correct answer was: {}", correct.text)?;
        }
    }

    writeln!(
        out,
        "\n🎉 Quiz finished! You scored {}/{}",
        session.score,
        session.questions.len()
    )?;
    writeln!(out, "{}", summary_message(session.score, session.questions.len()))?;
    info!(
        "Session finished with score {}/{}",
        session.score,
        session.questions.len()
    );
    Ok(())
}

fn choose_source<I: BufRead, W: Write>(input: &mut I, out: &mut W) -> Result<TextSource> {
    writeln!(out, "Where should the quiz text come from?")?;
    writeln!(out, "1. A text file of your own")?;
    writeln!(out, "2. A built-in passage")?;

    match read_choice(input, out, "👉 Pick an option: ", 2)? {
        1 => {
            let path = prompt_line(
                input,
                out,
                "📄 Enter the full path to the .txt file (e.g. chapters/science_ch1.txt): ",
            )?;
            Ok(TextSource::FromFile(path.into()))
        }
        _ => {
            writeln!(out, "Pick a topic:")?;
            for (idx, domain) in Domain::ALL.iter().enumerate() {
                writeln!(out, "{}. {}", idx + 1, domain.label())?;
            }
            let picked = read_choice(input, out, "👉 Enter the number of a topic: ", Domain::ALL.len())?;
            Ok(TextSource::FromDomain(Domain::ALL[picked - 1]))
        }
    }
}

fn prompt_line<I: BufRead, W: Write>(input: &mut I, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input ended before a line was read");
    }
    Ok(line.trim().to_string())
}

/// Blocks until the user supplies a digit string between 1 and `max`.
/// Anything else re-prompts; only end-of-input breaks the loop, as an error.
fn read_choice<I: BufRead, W: Write>(
    input: &mut I,
    out: &mut W,
    prompt: &str,
    max: usize,
) -> Result<usize> {
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input ended before a choice was made");
        }

        let entered = line.trim();
        let is_digits = !entered.is_empty() && entered.bytes().all(|b| b.is_ascii_digit());
        match entered.parse::<usize>() {
            Ok(choice) if is_digits && (1..=max).contains(&choice) => return Ok(choice),
            _ => writeln!(out, "Invalid choice. Please enter a number between 1 and {max}.")?,
        }
    }
}

fn summary_message(score: usize, total: usize) -> &'static str {
    if score == total {
        "🏆 Excellent! You nailed it!"
    } else if score as f64 >= total as f64 / 2.0 {
        "👍 Good job! Keep learning!"
    } else {
        "💡 Keep practicing. You're getting better every time!"
    }
}

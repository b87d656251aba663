use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

/// Subjects covered by the built-in passages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    History,
    Science,
    Geography,
    Technology,
    Literature,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::History,
        Domain::Science,
        Domain::Geography,
        Domain::Technology,
        Domain::Literature,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Domain::History => "History",
            Domain::Science => "Science",
            Domain::Geography => "Geography",
            Domain::Technology => "Technology",
            Domain::Literature => "Literature",
        }
    }

    fn passages(&self) -> [&'static str; 2] {
        match self {
            Domain::History => [
                "The Roman Empire reached its greatest extent under the emperor Trajan, \
                 stretching from Britain to Mesopotamia. Roman roads, aqueducts and law \
                 shaped life around the Mediterranean for centuries, and Latin remained \
                 the language of scholars long after Rome itself fell.",
                "The French Revolution began in 1789 when crowds in Paris stormed the \
                 Bastille. The monarchy was abolished, the Republic was declared, and \
                 within a decade a young general named Napoleon rose from the chaos to \
                 crown himself emperor of France.",
            ],
            Domain::Science => [
                "Earth is the third planet from the Sun and the only world in the solar \
                 system known to carry life. Its neighbour Mars is smaller and colder, \
                 while giant Jupiter shields the inner planets by catching comets with \
                 its enormous gravity.",
                "Water is a simple molecule of hydrogen and oxygen, yet it dissolves \
                 more substances than any other liquid. Antoine Lavoisier showed that \
                 water is not an element at all, overturning an idea the Greeks had \
                 held for two thousand years.",
            ],
            Domain::Geography => [
                "The Nile flows north through Egypt and empties into the Mediterranean, \
                 watering a narrow green ribbon of farmland through the Sahara. By most \
                 measures it competes with the Amazon for the title of the longest \
                 river on Earth.",
                "Mount Everest stands on the border between Nepal and Tibet, the \
                 highest peak of the Himalayas. Climbers call its summit the roof of \
                 the world, and the mountain grows a few millimetres taller every year \
                 as India pushes into Asia.",
            ],
            Domain::Technology => [
                "The first general-purpose electronic computers filled entire rooms and \
                 were programmed by rewiring them by hand. Alan Turing had already \
                 described a universal machine on paper in 1936, a decade before the \
                 hardware caught up with the idea.",
                "The Internet grew out of a military research network called ARPANET, \
                 which sent its first message between two universities in California in \
                 1969. Two decades later Tim Berners-Lee layered the World Wide Web on \
                 top of it, and the network left the laboratory for good.",
            ],
            Domain::Literature => [
                "William Shakespeare wrote his plays for the Globe, an open-air theatre \
                 on the south bank of the Thames in London. Hamlet, his longest play, \
                 was probably first performed around 1600 and has never left the stage \
                 since.",
                "Jane Austen published her novels anonymously, signed only by a Lady. \
                 Pride and Prejudice opens with one of the most quoted sentences in \
                 English fiction and quietly skewers the marriage market of Regency \
                 England.",
            ],
        }
    }
}

/// Where the quiz text comes from: a file the user points at, or one of the
/// built-in domain passages.
#[derive(Debug, Clone)]
pub enum TextSource {
    FromFile(PathBuf),
    FromDomain(Domain),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read '{path}': {source}")]
    Unreadable { path: String, source: io::Error },
    #[error("'{path}' contains no text to quiz on")]
    Empty { path: String },
}

impl TextSource {
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, SourceError> {
        match self {
            TextSource::FromFile(path) => load_file(path),
            TextSource::FromDomain(domain) => Ok(pick_domain_text(*domain, rng).to_string()),
        }
    }
}

/// Reads a whole UTF-8 text file into memory.
pub fn load_file(path: &Path) -> Result<String, SourceError> {
    let text = fs::read_to_string(path).map_err(|source| SourceError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    if text.trim().is_empty() {
        return Err(SourceError::Empty {
            path: path.display().to_string(),
        });
    }
    Ok(text)
}

/// Picks one of the domain's passages uniformly at random.
pub fn pick_domain_text<R: Rng + ?Sized>(domain: Domain, rng: &mut R) -> &'static str {
    let passages = domain.passages();
    passages[rng.gen_range(0..passages.len())]
}

use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use tracing::trace;

/// Whether a word must be accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Polarity {
    /// The word must be accepted.
    Positive,
    /// The word must be rejected.
    Negative,
}

impl Polarity {
    /// Returns true for [`Polarity::Positive`].
    pub fn is_positive(&self) -> bool {
        matches!(self, Polarity::Positive)
    }

    /// Returns the opposite polarity.
    pub fn flipped(&self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }
}

impl From<bool> for Polarity {
    fn from(value: bool) -> Self {
        if value {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }
}

impl Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Positive => write!(f, "+"),
            Polarity::Negative => write!(f, "-"),
        }
    }
}

/// A finite word, given as a sequence of symbol labels, together with the
/// [`Polarity`] it must have.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabeledWord {
    /// Whether the word must be accepted or rejected.
    pub polarity: Polarity,
    /// The symbols of the word.
    pub word: Vec<String>,
}

impl LabeledWord {
    /// Creates a new labeled word.
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(polarity: Polarity, word: I) -> Self {
        Self {
            polarity,
            word: word.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a word that must be accepted.
    pub fn positive<S: Into<String>, I: IntoIterator<Item = S>>(word: I) -> Self {
        Self::new(Polarity::Positive, word)
    }

    /// Creates a word that must be rejected.
    pub fn negative<S: Into<String>, I: IntoIterator<Item = S>>(word: I) -> Self {
        Self::new(Polarity::Negative, word)
    }
}

impl Display for LabeledWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.word.is_empty() {
            write!(f, "{}", self.polarity)
        } else {
            write!(f, "{} {}", self.polarity, self.word.iter().join(" "))
        }
    }
}

/// Abstracts the types of errors that can occur when parsing a [`LabeledWord`] or
/// a [`Sample`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleParseError {
    /// The line contains no tokens.
    #[error("missing polarity")]
    MissingPolarity,
    /// The first token is neither `+` nor `-`.
    #[error("unknown polarity {0:?}, expected + or -")]
    UnknownPolarity(String),
    /// Wraps an error together with the (1-based) line of the sample it occurred on.
    #[error("line {line}: {source}")]
    OnLine {
        /// The line on which the error occurred.
        line: usize,
        /// The underlying error.
        source: Box<SampleParseError>,
    },
}

/// Parses lines of the form `<+|-> <token> <token> ...`.
impl FromStr for LabeledWord {
    type Err = SampleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let polarity = match tokens.next() {
            Some("+") => Polarity::Positive,
            Some("-") => Polarity::Negative,
            Some(other) => return Err(SampleParseError::UnknownPolarity(other.to_string())),
            None => return Err(SampleParseError::MissingPolarity),
        };
        Ok(Self::new(polarity, tokens))
    }
}

/// An ordered collection of [`LabeledWord`]s. The order matters, as words are fed
/// to the [`crate::IncrementalBuilder`] one after another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sample {
    words: Vec<LabeledWord>,
}

impl Sample {
    /// Creates a sample from the given words, keeping their order.
    pub fn new<I: IntoIterator<Item = LabeledWord>>(words: I) -> Self {
        Self {
            words: words.into_iter().collect(),
        }
    }

    /// Iterates over the words in order.
    pub fn words(&self) -> impl Iterator<Item = &'_ LabeledWord> + '_ {
        self.words.iter()
    }

    /// Iterates over the words that must be accepted.
    pub fn positive_words(&self) -> impl Iterator<Item = &'_ LabeledWord> + '_ {
        self.words_with_polarity(Polarity::Positive)
    }

    /// Iterates over the words that must be rejected.
    pub fn negative_words(&self) -> impl Iterator<Item = &'_ LabeledWord> + '_ {
        self.words_with_polarity(Polarity::Negative)
    }

    /// Iterates over the words with the given polarity.
    pub fn words_with_polarity(
        &self,
        polarity: Polarity,
    ) -> impl Iterator<Item = &'_ LabeledWord> + '_ {
        self.words.iter().filter(move |w| w.polarity == polarity)
    }

    /// The number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the sample contains no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl IntoIterator for Sample {
    type Item = LabeledWord;
    type IntoIter = std::vec::IntoIter<LabeledWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.into_iter()
    }
}

impl FromIterator<LabeledWord> for Sample {
    fn from_iter<T: IntoIterator<Item = LabeledWord>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Parses one labeled word per line, skipping blank lines and lines starting with `#`.
impl TryFrom<&str> for Sample {
    type Error = SampleParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
            .map(|(i, line)| {
                trace!("Parsing sample line \"{line}\"");
                line.parse::<LabeledWord>()
                    .map_err(|source| SampleParseError::OnLine {
                        line: i + 1,
                        source: Box::new(source),
                    })
            })
            .collect()
    }
}

impl FromStr for Sample {
    type Err = SampleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sample::try_from(s)
    }
}

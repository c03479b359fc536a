//! The textual description of an automaton looks as follows
//! ```text
//! a b
//! * p -> q p
//! ! q -> q p
//! ```
//! The first non-blank line lists the alphabet. Every following line defines the
//! transitions of one state: an optional `*` marks the initial state, an optional
//! `!` marks an accepting state, then comes the name of the state, an arrow `->`
//! and one target per symbol in the order of the alphabet. States are numbered in
//! the order in which their names first appear, be it as source or as target. A
//! state that only ever appears as a target has no transitions. A target written
//! as `-` leaves the transition unset.

use std::str::FromStr;

use itertools::Itertools;
use tracing::trace;

use crate::{AutomatonError, Dfa, StateIndex};

/// The kinds of errors that can be encountered when parsing an automaton.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The input contains no alphabet line.
    #[error("missing alphabet")]
    MissingAlphabet,
    /// A line ends before the state name.
    #[error("missing state name")]
    MissingStateName,
    /// The state name is not followed by `->`.
    #[error("expected `->`, found {}", .0.as_deref().unwrap_or("end of line"))]
    MissingArrow(Option<String>),
    /// The number of targets does not match the alphabet.
    #[error("expected {expected} targets, found {found}")]
    TargetCount {
        /// The size of the alphabet.
        expected: usize,
        /// Number of targets on the line.
        found: usize,
    },
    /// A second state is marked as initial.
    #[error("state {second} is marked as initial, but {first} already is")]
    DuplicateInitial {
        /// The state that was marked first.
        first: String,
        /// The state that was marked later.
        second: String,
    },
    /// No state is marked as initial.
    #[error("no state is marked as initial")]
    MissingInitial,
    /// The automaton rejected the parsed states or transitions.
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

/// An error encountered while parsing an automaton, along with the (1-based)
/// line on which it occurred.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// The line on which the error occurred.
    pub line: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

impl Dfa {
    /// Parses an automaton from its textual description, see the
    /// [module documentation](self) for the format.
    pub fn from_text(input: &str) -> Result<Dfa, ParseError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, alphabet) = lines
            .next()
            .ok_or(ParseError::new(1, ParseErrorKind::MissingAlphabet))?;
        let mut dfa = Dfa::new(alphabet.split_whitespace().collect());
        trace!("parsed alphabet {}", dfa.alphabet());

        let mut last_line = 1;
        for (line, content) in lines {
            last_line = line;
            parse_state_line(&mut dfa, content).map_err(|kind| ParseError::new(line, kind))?;
        }

        if dfa.initial().is_none() {
            return Err(ParseError::new(last_line, ParseErrorKind::MissingInitial));
        }
        Ok(dfa)
    }

    /// Writes `self` in the textual format that [`Dfa::from_text`] reads. Unset
    /// transitions are written as `-`.
    pub fn to_text(&self) -> String {
        let mut lines = vec![self.alphabet().symbols().map(|(_, l)| l).join(" ")];
        for (q, label) in self.states() {
            let mut line = String::new();
            if self.initial() == Some(q) {
                line.push_str("* ");
            }
            if self.is_accepting(q).unwrap_or(false) {
                line.push_str("! ");
            }
            line.push_str(label);
            line.push_str(" ->");
            for target in self.row(q) {
                line.push(' ');
                match target.and_then(|p| self.state_label(p).ok()) {
                    Some(name) => line.push_str(name),
                    None => line.push_str(UNSET),
                }
            }
            lines.push(line);
        }
        lines.into_iter().map(|line| format!("{line}\n")).collect()
    }
}

/// Placeholder for a transition that is not set.
const UNSET: &str = "-";

fn parse_state_line(dfa: &mut Dfa, line: &str) -> Result<StateIndex, ParseErrorKind> {
    let mut tokens = line.split_whitespace().peekable();
    let (mut initial, mut accepting) = (false, false);
    while let Some(marker) = tokens.next_if(|t| *t == "*" || *t == "!") {
        match marker {
            "*" => initial = true,
            _ => accepting = true,
        }
    }

    let name = tokens.next().ok_or(ParseErrorKind::MissingStateName)?;
    match tokens.next() {
        Some("->") => {}
        other => return Err(ParseErrorKind::MissingArrow(other.map(str::to_string))),
    }
    let targets = tokens.collect_vec();
    if targets.len() != dfa.alphabet().len() {
        return Err(ParseErrorKind::TargetCount {
            expected: dfa.alphabet().len(),
            found: targets.len(),
        });
    }

    let q = dfa.add_state(name);
    if initial {
        if let Some(first) = dfa.initial().filter(|p| *p != q) {
            return Err(ParseErrorKind::DuplicateInitial {
                first: dfa.state_label(first).unwrap_or_default().to_string(),
                second: name.to_string(),
            });
        }
    }
    for (sym, target) in targets.into_iter().enumerate() {
        if target == UNSET {
            continue;
        }
        let p = dfa.add_state(target);
        dfa.set_transition(q, sym, p)?;
    }
    if initial {
        dfa.set_initial(q)?;
    }
    if accepting {
        dfa.set_accepting(q, true)?;
    }
    Ok(q)
}

impl FromStr for Dfa {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dfa::from_text(s)
    }
}

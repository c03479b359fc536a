use std::fmt::{Display, Formatter};

use owo_colors::OwoColorize;
use tabled::{builder::Builder, settings::Style};

use crate::{Dfa, StateIndex};

impl Dfa {
    fn annotate_state(&self, q: StateIndex) -> String {
        let label = self.state_label(q).unwrap_or_default();
        let marker = if self.initial() == Some(q) { "*" } else { "" };
        if self.is_accepting(q).unwrap_or(false) {
            format!("{marker}{}", label.green().bold())
        } else {
            format!("{marker}{}", label.red().bold())
        }
    }
}

/// Prints the transition table. Accepting states are green, rejecting ones red and
/// the initial state is prefixed by `*`.
impl Display for Dfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(
            std::iter::once("δ".bright_yellow().to_string())
                .chain(self.alphabet().symbols().map(|(_, l)| l.purple().to_string())),
        );
        for q in self.state_indices() {
            let mut row = vec![self.annotate_state(q)];
            for target in self.row(q) {
                match target {
                    Some(p) => row.push(self.state_label(*p).unwrap_or_default().blue().to_string()),
                    None => row.push("-".dimmed().to_string()),
                }
            }
            builder.push_record(row);
        }
        let mut transition_table = builder.build();
        transition_table.with(Style::modern());
        write!(f, "{}", transition_table)
    }
}

use itertools::Itertools;

use crate::Dfa;

/// Implemented by objects that can be turned into a graph in the DOT language.
pub trait ToDot {
    /// Returns the DOT representation of `self`.
    fn to_dot(&self) -> String;

    /// Renders `self` by piping the DOT representation through the external `dot`
    /// executable and returns its output in the given format, e.g. `"svg"` or
    /// `"png"`.
    #[cfg(feature = "graphviz")]
    fn render(&self, format: &str) -> Result<Vec<u8>, std::io::Error> {
        use std::io::{Read, Write};

        let dot = self.to_dot();
        tracing::trace!("rendering dot to {format}");

        let mut child = std::process::Command::new("dot")
            .arg(format!("-T{format}"))
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let mut output = Vec::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout.read_to_end(&mut output)?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("dot process exited with status: {}", status),
            ));
        }

        Ok(output)
    }
}

/// Quotes `name` as a DOT identifier.
fn quoted(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

impl ToDot for Dfa {
    fn to_dot(&self) -> String {
        let mut lines = vec!["rankdir=LR".to_string()];

        for (q, name) in self.states() {
            let shape = if self.is_accepting(q).unwrap_or(false) {
                "doublecircle"
            } else {
                "circle"
            };
            lines.push(format!("{} [label={} shape={shape}]", quoted(name), quoted(name)));
        }

        if let Some(initial) = self.initial().and_then(|q| self.state_label(q).ok()) {
            lines.push("init [label=\"\", shape=none]".into());
            lines.push(format!("init -> {}", quoted(initial)));
        }

        for (source, sym, target) in self.transitions() {
            let (Ok(source), Ok(target)) = (self.state_label(source), self.state_label(target))
            else {
                continue;
            };
            lines.push(format!(
                "{} -> {} [label={}]",
                quoted(source),
                quoted(target),
                quoted(self.alphabet().label(sym).unwrap_or_default())
            ));
        }

        format!(
            "digraph A {{\n{}\n}}\n",
            lines.into_iter().map(|line| format!("    {line};")).join("\n")
        )
    }
}

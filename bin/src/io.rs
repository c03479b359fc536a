use std::{io::Read, path::Path};

use anyhow::Context;
use dfa::{Dfa, ToDot};
use tracing::{debug, trace};

pub fn from_file_or_stdin(maybe_file_name: Option<&String>) -> anyhow::Result<String> {
    match maybe_file_name {
        Some(f) => {
            debug!("Reading input from {f}");
            std::fs::read_to_string(f).with_context(|| format!("Unable to read file {f}"))
        }
        None => {
            debug!("No input files specified, using stdin");
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Error when reading from stdin")?;
            Ok(buf)
        }
    }
}

pub fn to_file_or_stdout(maybe_file_name: Option<&String>, output: &str) -> anyhow::Result<()> {
    if let Some(file_name) = maybe_file_name {
        debug!("Writing output to {file_name}");
        std::fs::write(file_name, output).with_context(|| format!("Unable to write {file_name}"))
    } else {
        print!("{output}");
        Ok(())
    }
}

pub fn read_automaton(file_name: &String) -> anyhow::Result<Dfa> {
    let text = from_file_or_stdin(Some(file_name))?;
    let dfa = Dfa::from_text(&text).with_context(|| format!("Could not parse {file_name}"))?;
    debug!("Parsed automaton with {} states from {file_name}", dfa.size());
    Ok(dfa)
}

/// Writes `name.dot` into `dir` and, if `render` is set, additionally `name.svg`.
pub fn write_dot(dir: &Path, name: &str, dfa: &Dfa, render: bool) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Unable to create directory {}", dir.display()))?;
    let dot_file = dir.join(format!("{name}.dot"));
    trace!("Writing {}", dot_file.display());
    std::fs::write(&dot_file, dfa.to_dot())
        .with_context(|| format!("Unable to write {}", dot_file.display()))?;

    if render {
        let svg_file = dir.join(format!("{name}.svg"));
        let svg = dfa
            .render("svg")
            .context("Rendering with graphviz failed, is `dot` installed?")?;
        std::fs::write(&svg_file, svg)
            .with_context(|| format!("Unable to write {}", svg_file.display()))?;
    }
    Ok(())
}

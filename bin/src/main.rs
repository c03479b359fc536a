use std::path::PathBuf;

use anyhow::Context;
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use dfa::prelude::*;
use dfa_learning::{IncrementalBuilder, Sample};
use tracing::{debug, error, info, Level};

mod io;

fn output_dir_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_parser(value_parser!(PathBuf))
        .help("Directory into which DOT files are written")
}

fn main() -> anyhow::Result<()> {
    let matches = command!()
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue)
                .conflicts_with("debug"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Turn on debugging information")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
        .subcommand(
            Command::new("learn")
                .about("Build an automaton from labeled words, one line at a time")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help("File with one labeled word per line, stdin if absent"),
                )
                .arg(output_dir_arg())
                .arg(
                    Arg::new("render")
                        .long("render")
                        .help("Also render the DOT files to SVG")
                        .action(ArgAction::SetTrue)
                        .requires("output"),
                ),
        )
        .subcommand(
            Command::new("minimize")
                .about("Minimize an automaton given in the textual format")
                .arg(Arg::new("file").required(true))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("File to write the minimized automaton to, stdout if absent"),
                )
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .help("Log every step of the partition refinement")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("equiv")
                .about("Minimize two automata and compare them")
                .arg(Arg::new("left").required(true))
                .arg(Arg::new("right").required(true))
                .arg(output_dir_arg())
                .arg(
                    Arg::new("language")
                        .long("language")
                        .help("Compare the accepted languages instead of the transition columns")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand_required(true)
        .get_matches();

    let level = if matches.get_flag("verbose") {
        Level::TRACE
    } else if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match matches.subcommand() {
        Some(("learn", learn_matches)) => learn(learn_matches),
        Some(("minimize", minimize_matches)) => minimize(minimize_matches),
        Some(("equiv", equiv_matches)) => equiv(equiv_matches),
        _ => unreachable!(),
    }
}

fn learn(matches: &ArgMatches) -> anyhow::Result<()> {
    let input = io::from_file_or_stdin(matches.get_one("input"))?;
    let sample = Sample::try_from(input.as_str()).context("Could not parse input sample")?;
    info!("Parsed sample with {} words", sample.len());
    let output = matches.get_one::<PathBuf>("output");
    let render = matches.get_flag("render");

    let mut builder = IncrementalBuilder::new();
    learn_words(&mut builder, &sample, |builder| {
        if let Some(dir) = output {
            io::write_dot(dir, "automaton", builder.automaton(), render)?;
            io::write_dot(dir, "minimized", &builder.minimized()?, render)?;
        }
        Ok(())
    })?;

    if builder.automaton().is_empty() {
        info!("Sample is empty, nothing to learn");
        return Ok(());
    }
    let minimized = builder.minimized()?;
    info!(
        "Learned {} states, {} after minimization",
        builder.automaton().size(),
        minimized.size()
    );
    println!("{minimized}");
    Ok(())
}

/// Feeds the words of `sample` to `builder` in order and calls `after_word` after
/// each of them. Stops at the first conflict.
fn learn_words<F>(
    builder: &mut IncrementalBuilder,
    sample: &Sample,
    mut after_word: F,
) -> anyhow::Result<()>
where
    F: FnMut(&IncrementalBuilder) -> anyhow::Result<()>,
{
    for word in sample.words() {
        debug!("Consuming {word}");
        if let Err(err) = builder.consume_word(word) {
            error!("{err}");
            return Err(err).with_context(|| format!("Conflict while learning \"{word}\""));
        }
        after_word(builder)?;
    }
    Ok(())
}

fn minimize(matches: &ArgMatches) -> anyhow::Result<()> {
    let file = matches
        .get_one::<String>("file")
        .context("No input file given")?;
    let dfa = io::read_automaton(file)?;

    let minimized = if matches.get_flag("trace") {
        minimize_with(&dfa, |event| match event {
            RefinementEvent::Initial(blocks) => info!("initial partition {blocks:?}"),
            RefinementEvent::Splitter(block) => info!("splitter {block:?}"),
            RefinementEvent::Split {
                symbol,
                block,
                intersection,
                difference,
            } => info!(
                "{} splits {block:?} into {intersection:?} and {difference:?}",
                dfa.alphabet().label(symbol).unwrap_or_default()
            ),
        })
    } else {
        dfa.minimize()
    }
    .with_context(|| format!("Could not minimize {file}"))?;

    info!("Minimized {} states to {}", dfa.size(), minimized.size());
    io::to_file_or_stdout(matches.get_one("output"), &minimized.to_text())
}

fn equiv(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut automata = Vec::with_capacity(2);
    for name in ["left", "right"] {
        let file = matches
            .get_one::<String>(name)
            .with_context(|| format!("No {name} input file given"))?;
        let dfa = io::read_automaton(file)?;
        println!("{name} automaton:\n{dfa}");
        let minimized = dfa
            .minimize()
            .with_context(|| format!("Could not minimize {file}"))?;
        println!("{name} automaton, minimized:\n{minimized}");
        if let Some(dir) = matches.get_one::<PathBuf>("output") {
            io::write_dot(dir, name, &dfa, false)?;
            io::write_dot(dir, &format!("{name}_minimized"), &minimized, false)?;
        }
        automata.push(minimized);
    }
    let (left, right) = (&automata[0], &automata[1]);

    let equal = if matches.get_flag("language") {
        language_equivalent(left, right)?
    } else {
        columns_match(left, right)
    };
    println!("{}", if equal { "Equal" } else { "Not equal" });
    Ok(())
}

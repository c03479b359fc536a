/// Contains the code that allows conversion of automata to a [Graphviz DOT representation](https://graphviz.org/doc/info/lang.html).
pub mod dot;
pub use dot::ToDot;

/// Reading and writing the textual automaton description.
pub mod text;
pub use text::{ParseError, ParseErrorKind};

mod fmt;

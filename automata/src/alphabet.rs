//! Alphabets whose symbols are arbitrary string labels.

use itertools::Itertools;

use crate::{labels::Labels, SymbolIndex};

/// An alphabet is a finite, ordered collection of symbols. Every symbol is a
/// string label and is addressed by a dense [`SymbolIndex`], where the order in
/// which symbols were added determines their index. An alphabet only ever grows,
/// so the index of a symbol never changes.
///
/// # Example
/// ```
/// use dfa::Alphabet;
///
/// let mut alphabet = Alphabet::from_iter(["a", "b"]);
/// assert_eq!(alphabet.add("c"), 2);
/// assert_eq!(alphabet.add("a"), 0);
/// assert_eq!(alphabet.label(1), Some("b"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet(Labels);

/// Helper macro for creating an [`Alphabet`], called with a comma separated
/// list of symbols.
#[macro_export]
macro_rules! alphabet {
    ($($sym:expr),* $(,)?) => {
        $crate::Alphabet::from_iter([$($sym),*])
    };
}

impl Alphabet {
    /// Creates an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the symbol `label` unless it is already present and returns its index.
    pub fn add(&mut self, label: &str) -> SymbolIndex {
        self.insert(label).0
    }

    /// Like [`Alphabet::add`], but additionally reports whether the symbol was new.
    pub fn insert(&mut self, label: &str) -> (SymbolIndex, bool) {
        self.0.intern(label)
    }

    /// Looks up the index of the symbol `label`.
    pub fn index_of(&self, label: &str) -> Option<SymbolIndex> {
        self.0.index_of(label)
    }

    /// Returns the label of the symbol with index `sym`.
    pub fn label(&self, sym: SymbolIndex) -> Option<&str> {
        self.0.label(sym)
    }

    /// Returns true if `sym` is the index of a symbol in this alphabet.
    pub fn contains(&self, sym: SymbolIndex) -> bool {
        sym < self.len()
    }

    /// The number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all symbol indices in ascending order.
    pub fn universe(&self) -> std::ops::Range<SymbolIndex> {
        0..self.len()
    }

    /// Iterates over all symbols together with their labels.
    pub fn symbols(&self) -> impl Iterator<Item = (SymbolIndex, &str)> + '_ {
        self.0.iter()
    }

    /// Translates a word given as labels into symbol indices. Returns `None` if
    /// some label is not part of the alphabet.
    pub fn translate<S: AsRef<str>>(&self, word: &[S]) -> Option<Vec<SymbolIndex>> {
        word.iter().map(|sym| self.index_of(sym.as_ref())).collect()
    }

    /// Returns true if both alphabets contain the same labels, regardless of
    /// the indices they have been assigned.
    pub fn same_symbols(&self, other: &Alphabet) -> bool {
        self.len() == other.len() && self.symbols().all(|(_, l)| other.index_of(l).is_some())
    }
}

impl<'a> FromIterator<&'a str> for Alphabet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut alphabet = Self::new();
        for sym in iter {
            alphabet.add(sym);
        }
        alphabet
    }
}

impl FromIterator<String> for Alphabet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut alphabet = Self::new();
        for sym in iter {
            alphabet.add(&sym);
        }
        alphabet
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.symbols().map(|(_, l)| l).join(", "))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Alphabet;

    #[test]
    fn indices_follow_insertion_order() {
        let mut alphabet = alphabet!("b", "a");
        assert_eq!(alphabet.index_of("b"), Some(0));
        assert_eq!(alphabet.index_of("a"), Some(1));
        assert_eq!(alphabet.insert("c"), (2, true));
        assert_eq!(alphabet.insert("b"), (0, false));
        assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(alphabet.to_string(), "{b, a, c}");
    }

    #[test]
    fn translate_words() {
        let alphabet = alphabet!("x", "y");
        assert_eq!(alphabet.translate(&["y", "x", "y"]), Some(vec![1, 0, 1]));
        assert_eq!(alphabet.translate(&["y", "z"]), None);
        assert_eq!(alphabet.translate::<&str>(&[]), Some(vec![]));
    }

    #[test]
    fn same_symbols_ignores_order() {
        let ab = alphabet!("a", "b");
        let ba = alphabet!("b", "a");
        let abc = alphabet!("a", "b", "c");
        assert!(ab.same_symbols(&ba));
        assert!(!ab.same_symbols(&abc));
        assert!(!Alphabet::new().same_symbols(&ab));
    }
}

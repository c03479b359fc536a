use crate::Map;

/// Bijection between string labels and the dense indices `0..len`. Indices are
/// handed out in insertion order and never reused.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Labels {
    names: Vec<String>,
    index: Map<String, usize>,
}

impl Labels {
    /// Returns the index of `label`, registering it first if it is new. The
    /// boolean is `true` iff the label was not known before.
    pub(crate) fn intern(&mut self, label: &str) -> (usize, bool) {
        if let Some(&idx) = self.index.get(label) {
            return (idx, false);
        }
        let idx = self.names.len();
        self.names.push(label.to_string());
        self.index.insert(label.to_string(), idx);
        (idx, true)
    }

    pub(crate) fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub(crate) fn label(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.names.iter().map(String::as_str).enumerate()
    }
}

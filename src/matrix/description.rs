//! Raw triple list handed over by a matrix reader

/// Index convention used by the producer of a description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexBase {
    /// Indices start at 0
    #[default]
    Zero,
    /// Indices start at 1 (Matrix Market convention)
    One,
}

impl IndexBase {
    /// Offset subtracted from every supplied index
    pub fn offset(&self) -> usize {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }
}

/// An unsorted list of `(row, col, value)` entries plus declared dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixDescription<T> {
    /// Declared number of rows
    pub rows: usize,
    /// Declared number of columns
    pub cols: usize,
    /// Entries in producer order
    pub entries: Vec<(usize, usize, T)>,
    /// Index base of `entries`
    pub base: IndexBase,
}

impl<T> MatrixDescription<T> {
    /// Creates a zero-based description
    pub fn new(rows: usize, cols: usize, entries: Vec<(usize, usize, T)>) -> Self {
        Self {
            rows,
            cols,
            entries,
            base: IndexBase::Zero,
        }
    }

    /// Sets the index base of the entries
    pub fn with_base(mut self, base: IndexBase) -> Self {
        self.base = base;
        self
    }

    /// Number of supplied entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

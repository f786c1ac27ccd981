use serde::Serialize;

/// Input that moves the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Previous,
    Next,
    /// A new table with this many rows was loaded.
    Load(usize),
}

/// Current viewing position within a loaded table.
///
/// `At { index, len }` always satisfies `index < len`; a table without rows
/// is represented by `Empty`. Moves are clamped at both ends, never wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Pager {
    #[default]
    Empty,
    At { index: usize, len: usize },
}

impl Pager {
    /// Pager positioned on the first of `len` rows.
    pub fn new(len: usize) -> Self {
        if len == 0 {
            Pager::Empty
        } else {
            Pager::At { index: 0, len }
        }
    }

    /// Apply a transition, returning whether the position changed.
    pub fn apply(&mut self, transition: Transition) -> bool {
        let before = *self;
        *self = match (transition, before) {
            (Transition::Load(len), _) => Pager::new(len),
            (_, Pager::Empty) => Pager::Empty,
            (Transition::Previous, Pager::At { index, len }) if index > 0 => Pager::At {
                index: index - 1,
                len,
            },
            (Transition::Next, Pager::At { index, len }) if index + 1 < len => Pager::At {
                index: index + 1,
                len,
            },
            (_, at) => at,
        };
        *self != before
    }

    pub fn previous(&mut self) -> bool {
        self.apply(Transition::Previous)
    }

    pub fn next(&mut self) -> bool {
        self.apply(Transition::Next)
    }

    pub fn load(&mut self, len: usize) {
        self.apply(Transition::Load(len));
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Pager::Empty => None,
            Pager::At { index, .. } => Some(*index),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Pager::Empty => 0,
            Pager::At { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Pager::Empty)
    }

    /// One-based position for display.
    pub fn position(&self) -> Option<usize> {
        self.index().map(|index| index + 1)
    }

    pub fn has_previous(&self) -> bool {
        matches!(self, Pager::At { index, .. } if *index > 0)
    }

    pub fn has_next(&self) -> bool {
        matches!(self, Pager::At { index, len } if index + 1 < *len)
    }
}

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileIndex {
    pub ix: u32,
    pub iy: u32,
}

impl TileIndex {
    #[must_use]
    pub fn new(ix: u32, iy: u32) -> Self {
        Self { ix, iy }
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.ix, self.iy)
    }
}

/// Lifecycle of one tile through a render.
///
/// Tiles only ever move forward one step at a time:
/// `Pending -> Submitted -> Rendered -> Composited`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TileState {
    #[default]
    Pending,
    Submitted,
    Rendered,
    Composited,
}

impl TileState {
    #[must_use]
    pub fn next(self) -> Option<TileState> {
        match self {
            Self::Pending => Some(Self::Submitted),
            Self::Submitted => Some(Self::Rendered),
            Self::Rendered => Some(Self::Composited),
            Self::Composited => None,
        }
    }

    #[must_use]
    pub fn can_advance_to(self, target: TileState) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for TileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Rendered => "rendered",
            Self::Composited => "composited",
        };

        write!(f, "{}", name)
    }
}

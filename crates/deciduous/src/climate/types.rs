use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Calendar order, starting with the first season of a northern year.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    #[inline]
    pub fn is_winter(self) -> bool {
        self == Season::Winter
    }

    /// Position in `Season::ALL`.
    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }

    /// The season `n` steps later in the year.
    pub fn shifted(self, n: usize) -> Season {
        Season::ALL[(self.index() + n) % Season::ALL.len()]
    }
}

/// Which half of the globe the map sits in. Southern maps run the calendar
/// two seasons out of phase with northern ones.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
)]
pub enum Hemisphere {
    #[default]
    Northern,
    Southern,
}

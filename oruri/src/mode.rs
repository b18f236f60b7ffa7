use std::fmt;
use std::str::FromStr;

use crate::error::InvalidModeError;

/// Tokenizer split mode, controlling the granularity of the word units the
/// engine produces. `C` is the coarsest and the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitMode {
    A,
    B,
    C,
}

impl SplitMode {
    pub(crate) fn serialize(self) -> &'static str {
        match self {
            SplitMode::A => "A",
            SplitMode::B => "B",
            SplitMode::C => "C",
        }
    }
}

impl Default for SplitMode {
    fn default() -> Self {
        SplitMode::C
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.serialize())
    }
}

impl FromStr for SplitMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(SplitMode::A),
            "B" => Ok(SplitMode::B),
            "C" => Ok(SplitMode::C),
            _ => Err(InvalidModeError(s.to_owned())),
        }
    }
}

use std::fmt;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Score(u32);

impl Score {
    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn increase(&mut self) -> u32 {
        self.0 += 1;
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}", self.0)
    }
}

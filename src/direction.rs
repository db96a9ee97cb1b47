use crate::geometry::Offset;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn offset(self) -> Offset {
        match self {
            Up => Offset::new(0, -1),
            Down => Offset::new(0, 1),
            Left => Offset::new(-1, 0),
            Right => Offset::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// Player steering. Requests are checked against the direction that was
/// last applied to the head, not against the latest accepted request, and
/// only the last accepted request of a tick is committed by `latch`.
#[derive(Copy, Clone, Debug)]
pub struct Steering {
    pending: Direction,
    committed: Direction,
}

impl Steering {
    pub fn new(initial: Direction) -> Self {
        Steering { pending: initial, committed: initial }
    }

    /// Returns whether the request was accepted.
    pub fn request(&mut self, direction: Direction) -> bool {
        if direction == self.committed.opposite() {
            return false;
        }

        self.pending = direction;
        true
    }

    pub fn latch(&mut self) -> Direction {
        self.committed = self.pending;
        self.committed
    }

    pub fn committed(&self) -> Direction {
        self.committed
    }
}

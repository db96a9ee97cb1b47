use rand::Rng;

use crate::geometry::{BoardGeometry, Cell};

/// The single piece of food on the board. Placement is uniform over every
/// cell, including cells the worm occupies.
#[derive(Copy, Clone, Debug)]
pub struct Food {
    position: Cell,
}

impl Food {
    pub fn spawn<R: Rng>(geometry: &BoardGeometry, rng: &mut R) -> Self {
        Food { position: random_cell(geometry, rng) }
    }

    pub fn at(position: Cell) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn relocate<R: Rng>(&mut self, geometry: &BoardGeometry, rng: &mut R) {
        self.position = random_cell(geometry, rng);
    }
}

fn random_cell<R: Rng>(geometry: &BoardGeometry, rng: &mut R) -> Cell {
    Cell::new(
        rng.random_range(0..geometry.width()),
        rng.random_range(0..geometry.height()),
    )
}

use std::ops::{Add, AddAssign, Neg, Sub};

use crate::{Coords, TermInt};

/// A board cell, addressed by column and row. Cells outside the board are
/// representable so that a head which has left the board can be detected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

/// Signed distance between two cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dcol: i32,
    pub drow: i32,
}

/// Rectangle in surface pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: TermInt,
    pub y: TermInt,
    pub width: TermInt,
    pub height: TermInt,
}

/// Fixed board dimensions together with the pixel size of one cell, which
/// is the display size divided by the board size on each axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardGeometry {
    width: i32,
    height: i32,
    cell_width: TermInt,
    cell_height: TermInt,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Cell { col, row }
    }
}

impl Offset {
    pub const fn new(dcol: i32, drow: i32) -> Self {
        Offset { dcol, drow }
    }
}

impl Add<Offset> for Cell {
    type Output = Cell;

    fn add(self, rhs: Offset) -> Cell {
        Cell::new(self.col + rhs.dcol, self.row + rhs.drow)
    }
}

impl AddAssign<Offset> for Cell {
    fn add_assign(&mut self, rhs: Offset) {
        *self = *self + rhs;
    }
}

impl Sub for Cell {
    type Output = Offset;

    fn sub(self, rhs: Cell) -> Offset {
        Offset::new(self.col - rhs.col, self.row - rhs.row)
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset::new(-self.dcol, -self.drow)
    }
}

impl BoardGeometry {
    pub fn new(board: Coords, display: Coords) -> Self {
        BoardGeometry {
            width: board.0 as i32,
            height: board.1 as i32,
            cell_width: display.0 / board.0,
            cell_height: display.1 / board.1,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.col) && (0..self.height).contains(&cell.row)
    }

    /// Pixel area covered by the board itself. May be smaller than the
    /// display when the display size is not a multiple of the board size.
    pub fn board_pixels(&self) -> Coords {
        (
            self.cell_width * self.width as TermInt,
            self.cell_height * self.height as TermInt,
        )
    }

    /// First pixel row below the board, where the score is shown.
    pub fn status_row(&self) -> TermInt {
        self.board_pixels().1
    }

    /// Pixel rectangle of `cell`, or `None` when the cell is off the board.
    pub fn cell_rect(&self, cell: Cell) -> Option<PixelRect> {
        if !self.contains(cell) {
            return None;
        }

        Some(PixelRect {
            x: cell.col as TermInt * self.cell_width,
            y: cell.row as TermInt * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        })
    }
}

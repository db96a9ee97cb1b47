use crate::geometry::{BoardGeometry, Cell, Offset};

/// Minimum spawn length. Growth derives the new tail's position from the
/// tail's predecessor, so at least one follower must exist.
pub const MIN_WORM_LENGTH: usize = 2;

/// Where a new segment goes when the tail has nothing ahead of it.
const DEFAULT_FOLLOW_OFFSET: Offset = Offset::new(-1, 0);

#[derive(Clone, Debug)]
pub struct Segment {
    position: Cell,
    /// Index of the segment ahead of this one in the chain.
    ahead: Option<usize>,
    displacement: Option<Offset>,
}

/// Head-first chain of segments. Each follower replays its predecessor's
/// displacement, captured before the head moves, so it steps into the cell
/// its predecessor occupied on the previous tick.
#[derive(Clone, Debug)]
pub struct Worm {
    segments: Vec<Segment>,
}

impl Segment {
    fn new(position: Cell, ahead: Option<usize>) -> Self {
        Segment { position, ahead, displacement: None }
    }

    pub fn position(&self) -> Cell {
        self.position
    }
}

impl Worm {
    pub fn spawn(head: Cell, length: usize) -> Self {
        let mut worm = Worm::with_head(head);
        for _ in 1..length.max(MIN_WORM_LENGTH) {
            worm.add_segment();
        }
        worm
    }

    pub fn head(&self) -> Cell {
        self.segments[0].position
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn positions(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().map(Segment::position)
    }

    /// Appends a tail segment one step behind the current tail, opposite to
    /// the direction the tail is about to travel.
    pub fn add_segment(&mut self) {
        let last = self.segments.len() - 1;
        let step = match self.refresh_displacement(last) {
            Some(displacement) => -displacement,
            None => DEFAULT_FOLLOW_OFFSET,
        };

        let position = self.segments[last].position + step;
        self.segments.push(Segment::new(position, Some(last)));
    }

    pub fn move_by(&mut self, step: Offset) {
        // Capture every follower's displacement before the head moves
        for i in 1..self.segments.len() {
            self.refresh_displacement(i);
        }

        self.segments[0].position += step;

        for seg in &mut self.segments[1..] {
            if let Some(displacement) = seg.displacement {
                seg.position += displacement;
            }
        }
    }

    pub fn head_on(&self, cell: Cell) -> bool {
        self.head() == cell
    }

    pub fn hit_wall(&self, geometry: &BoardGeometry) -> bool {
        !geometry.contains(self.head())
    }

    pub fn hit_self(&self) -> bool {
        let head = self.head();
        self.segments[1..].iter().any(|seg| seg.position == head)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn with_head(head: Cell) -> Self {
        Worm { segments: vec![Segment::new(head, None)] }
    }

    fn refresh_displacement(&mut self, index: usize) -> Option<Offset> {
        let ahead = self.segments[index].ahead.map(|i| self.segments[i].position);
        let seg = &mut self.segments[index];
        seg.displacement = ahead.map(|pos| pos - seg.position);
        seg.displacement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(worm: &Worm) -> Vec<Cell> {
        worm.positions().collect()
    }

    #[test]
    fn test_spawn_trails_to_the_left() {
        let worm = Worm::spawn(Cell::new(20, 20), 4);

        assert_eq!(cells(&worm), vec![
            Cell::new(20, 20),
            Cell::new(19, 20),
            Cell::new(18, 20),
            Cell::new(17, 20),
        ]);
    }

    #[test]
    fn test_spawn_enforces_minimum_length() {
        assert_eq!(Worm::spawn(Cell::new(5, 5), 0).len(), MIN_WORM_LENGTH);
        assert_eq!(Worm::spawn(Cell::new(5, 5), 1).len(), MIN_WORM_LENGTH);
    }

    #[test]
    fn test_add_segment_on_lone_head_uses_default_offset() {
        let mut worm = Worm::with_head(Cell::new(3, 3));
        worm.add_segment();

        assert_eq!(cells(&worm), vec![Cell::new(3, 3), Cell::new(2, 3)]);
    }

    #[test]
    fn test_followers_take_predecessor_previous_cell() {
        let mut worm = Worm::spawn(Cell::new(10, 10), 5);
        worm.move_by(Offset::new(0, -1));
        worm.move_by(Offset::new(-1, 0));

        let before = cells(&worm);
        worm.move_by(Offset::new(0, 1));
        let after = cells(&worm);

        assert_eq!(after[0], before[0] + Offset::new(0, 1));
        for i in 1..after.len() {
            assert_eq!(after[i], before[i - 1]);
        }
    }

    #[test]
    fn test_straight_moves_are_rigid_translation() {
        let mut worm = Worm::spawn(Cell::new(10, 10), 4);
        let start = cells(&worm);

        for _ in 0..3 {
            worm.move_by(Offset::new(1, 0));
        }

        let moved: Vec<Cell> = start.iter().map(|c| *c + Offset::new(3, 0)).collect();
        assert_eq!(cells(&worm), moved);
    }

    #[test]
    fn test_growth_after_turn_extends_behind_tail() {
        let mut worm = Worm::spawn(Cell::new(10, 10), 2);
        worm.move_by(Offset::new(0, 1));

        // Tail at (10, 10) is heading down towards the head at (10, 11)
        worm.add_segment();
        assert_eq!(cells(&worm), vec![Cell::new(10, 11), Cell::new(10, 10), Cell::new(10, 9)]);

        worm.move_by(Offset::new(0, 1));
        assert_eq!(cells(&worm), vec![Cell::new(10, 12), Cell::new(10, 11), Cell::new(10, 10)]);
    }

    #[test]
    fn test_hit_wall() {
        let geometry = BoardGeometry::new((10, 10), (10, 10));
        let mut worm = Worm::spawn(Cell::new(9, 5), 2);

        assert!(!worm.hit_wall(&geometry));
        worm.move_by(Offset::new(1, 0));
        assert!(worm.hit_wall(&geometry));
    }

    #[test]
    fn test_hit_self() {
        let mut worm = Worm::spawn(Cell::new(20, 20), 5);

        worm.move_by(Offset::new(0, -1));
        worm.move_by(Offset::new(-1, 0));
        assert!(!worm.hit_self());

        worm.move_by(Offset::new(0, 1));
        assert!(worm.hit_self());
        assert!(worm.head_on(Cell::new(19, 20)));
    }
}

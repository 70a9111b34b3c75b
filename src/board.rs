use crate::types::{Player, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    // Cells 0..=8 laid out row-major (r*3 + c)
    cells: [Option<Player>; 9],
}

impl Board {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Player> {
        self.cells[pos.idx()]
    }

    #[inline]
    pub fn set(&mut self, pos: Pos, occupant: Option<Player>) {
        self.cells[pos.idx()] = occupant;
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cells[pos.idx()].is_none()
    }

    /// Move an occupant from `from` to `to`. The destination must be empty.
    #[inline]
    pub fn relocate(&mut self, from: Pos, to: Pos) {
        debug_assert!(self.is_empty(to), "relocate onto occupied cell {to}");
        let occupant = self.cells[from.idx()].take();
        self.cells[to.idx()] = occupant;
    }

    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

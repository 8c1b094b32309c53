use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{classify, HandCategory, HAND_SIZE};

/// Side length of the square grid.
pub const SIZE: usize = 5;
/// Number of cells on the grid.
pub const NUM_CELLS: usize = SIZE * SIZE;
/// Number of hands scored at the end of a game (5 rows + 5 columns).
pub const NUM_HANDS: usize = 2 * SIZE;

/// A board position. Fields are private so a `Cell` is always on the grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Cell {
    row: usize,
    col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= SIZE || col >= SIZE {
            return Err(GameError::CellOutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major index in `[0, 25)`.
    pub fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    pub fn from_index(i: usize) -> Option<Cell> {
        (i < NUM_CELLS).then(|| Cell {
            row: i / SIZE,
            col: i % SIZE,
        })
    }

    /// All cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..NUM_CELLS).filter_map(Cell::from_index)
    }

    /// The row hand and column hand this cell belongs to.
    pub fn lines(self) -> [Line; 2] {
        [Line::Row(self.row), Line::Col(self.col)]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl TryFrom<(usize, usize)> for Cell {
    type Error = GameError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Cell::new(row, col)
    }
}

impl From<Cell> for (usize, usize) {
    fn from(c: Cell) -> Self {
        (c.row, c.col)
    }
}

/// One of the ten scored hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Line {
    Row(usize),
    Col(usize),
}

impl Line {
    /// Hand index: rows are 0..5, columns are 5..10.
    pub fn hand_index(self) -> usize {
        match self {
            Line::Row(r) => r,
            Line::Col(c) => c + SIZE,
        }
    }

    pub fn from_hand_index(i: usize) -> Option<Line> {
        match i {
            0..SIZE => Some(Line::Row(i)),
            SIZE..NUM_HANDS => Some(Line::Col(i - SIZE)),
            _ => None,
        }
    }

    /// The cells of this line, in slot order.
    pub fn cells(self) -> [Cell; SIZE] {
        std::array::from_fn(|k| match self {
            Line::Row(r) => Cell { row: r, col: k },
            Line::Col(c) => Cell { row: k, col: c },
        })
    }
}

/// The 5x5 placement grid. A filled cell never changes again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: [Option<Card>; NUM_CELLS],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: Cell) -> Option<Card> {
        self.cells[cell.index()]
    }

    pub fn is_empty_at(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    pub fn place(&mut self, cell: Cell, card: Card) -> Result<(), GameError> {
        let slot = &mut self.cells[cell.index()];
        if slot.is_some() {
            return Err(GameError::CellOccupied(cell));
        }
        *slot = Some(card);
        Ok(())
    }

    pub fn hand(&self, line: Line) -> [Option<Card>; HAND_SIZE] {
        line.cells().map(|c| self.get(c))
    }

    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::all().filter(|&c| self.is_empty_at(c)).collect()
    }

    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.filled() == NUM_CELLS
    }

    /// Category of every hand, indexed by [`Line::hand_index`].
    pub fn categories(&self) -> [HandCategory; NUM_HANDS] {
        std::array::from_fn(|i| match Line::from_hand_index(i) {
            Some(line) => classify(&self.hand(line)),
            None => HandCategory::HighCard,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            let line: Vec<String> = Line::Row(row)
                .cells()
                .iter()
                .map(|&c| match self.get(c) {
                    Some(card) => card.to_string(),
                    None => "--".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

use std::fmt;

use crate::error::IllegalMoveError;

/// A player's mark on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    X = 1,
    O = 2,
}

impl Token {
    /// The other player's token
    pub fn opponent(self) -> Self {
        match self {
            Token::X => Token::O,
            Token::O => Token::X,
        }
    }

    fn glyph(self) -> char {
        match self {
            Token::X => 'X',
            Token::O => 'O',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A single cell; `None` is empty
pub type Cell = Option<Token>;

/// A target cell as `(row, col)`, 0-indexed with row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    /// Renders 1-indexed, the way a human enters moves
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row + 1, self.col + 1)
    }
}

/// Board dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Shape {
    fn default() -> Self {
        Self { rows: 6, cols: 7 }
    }
}

/// An immutable snapshot of every cell in row-major order, used to index value tables
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(Box<[Cell]>);

impl StateKey {
    /// The key of an empty board of the given shape
    pub fn empty(shape: Shape) -> Self {
        Self(vec![None; shape.rows * shape.cols].into_boxed_slice())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}

/// A Connect Four grid with gravity
///
/// Pieces occupy the lowest empty row of a column, so a cell is playable only when it is
/// empty and either in the bottom row or resting on an occupied cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    shape: Shape,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::with_shape(Shape::default())
    }
}

impl Board {
    /// Create an empty board with `rows` rows and `cols` columns
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_shape(Shape { rows, cols })
    }

    pub fn with_shape(shape: Shape) -> Self {
        Self {
            shape,
            cells: vec![None; shape.rows * shape.cols],
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// **Panics** if `(row, col)` is outside the grid
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    fn index(&self, row: usize, col: usize) -> usize {
        let Shape { rows, cols } = self.shape;
        assert!(
            row < rows && col < cols,
            "Cell ({row}, {col}) is outside the {rows}x{cols} board."
        );
        row * cols + col
    }

    fn is_supported(&self, row: usize, col: usize) -> bool {
        row + 1 == self.shape.rows || self.get(row + 1, col).is_some()
    }

    /// Every empty cell that a piece could occupy, scanned row by row from the top
    pub fn legal_moves(&self) -> Vec<Move> {
        let Shape { rows, cols } = self.shape;
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Move::new(row, col)))
            .filter(|m| self.get(m.row, m.col).is_none() && self.is_supported(m.row, m.col))
            .collect()
    }

    /// Check a move against the occupancy and gravity rules without applying it
    ///
    /// **Panics** if the move is outside the grid
    pub fn validate(&self, mv: Move) -> Result<(), IllegalMoveError> {
        let Move { row, col } = mv;
        if self.get(row, col).is_some() {
            Err(IllegalMoveError::Occupied { row, col })
        } else if !self.is_supported(row, col) {
            Err(IllegalMoveError::Floating { row, col })
        } else {
            Ok(())
        }
    }

    /// Return a copy of the board with `token` placed at `mv`
    pub fn apply(&self, mv: Move, token: Token) -> Result<Board, IllegalMoveError> {
        let mut next = self.clone();
        next.place(mv, token)?;
        Ok(next)
    }

    /// Place `token` at `mv` in place; the board is untouched on error
    pub fn place(&mut self, mv: Move, token: Token) -> Result<(), IllegalMoveError> {
        self.validate(mv)?;
        let ix = self.index(mv.row, mv.col);
        self.cells[ix] = Some(token);
        Ok(())
    }

    /// Length of the run of `token` starting next to `(row, col)` and heading in `(dr, dc)`
    fn run(&self, row: usize, col: usize, (dr, dc): (isize, isize), token: Token) -> usize {
        let Shape { rows, cols } = self.shape;
        let mut len = 0;
        let (mut r, mut c) = (row as isize + dr, col as isize + dc);
        while (0..rows as isize).contains(&r)
            && (0..cols as isize).contains(&c)
            && self.get(r as usize, c as usize) == Some(token)
        {
            len += 1;
            r += dr;
            c += dc;
        }
        len
    }

    /// Whether the piece at `(row, col)` completes four in a row
    ///
    /// Only runs through `(row, col)` are examined, so call this right after placing a piece
    /// there rather than as a scan of the whole board.
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        let Some(token) = self.get(row, col) else {
            return false;
        };
        [(0, 1), (1, 0), (1, 1), (1, -1)].into_iter().any(|(dr, dc)| {
            1 + self.run(row, col, (dr, dc), token) + self.run(row, col, (-dr, -dc), token) >= 4
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn state_key(&self) -> StateKey {
        StateKey(self.cells.clone().into_boxed_slice())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(1 + 4 * self.shape.cols);
        for row in self.cells.chunks(self.shape.cols) {
            write!(f, "|")?;
            for cell in row {
                write!(f, " {} |", cell.map_or(' ', Token::glyph))?;
            }
            writeln!(f)?;
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

//! Local mirror of one game's board.
//!
//! The board never applies rules beyond "the point must be empty": captures,
//! suicide, and ko all live on the server. The client rebuilds the whole
//! grid from the authoritative move list whenever it resyncs, so the local
//! copy is a cheap, disposable mirror rather than a rules engine.

use crate::coord::{Coord, Move};
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Stone color. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black stones.
    Black,
    /// White stones.
    White,
}

impl Color {
    /// Returns the opposite color.
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-letter marker used in board rendering.
    fn symbol(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// One intersection's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Point {
    /// No stone.
    Empty,
    /// A stone of the given color.
    Stone(Color),
}

/// Square grid of stones plus the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u16,
    /// Points in row-major order, row 0 first.
    points: Vec<Point>,
    to_move: Color,
}

impl Board {
    /// Creates an empty board with Black to move.
    pub fn empty(size: u16) -> Self {
        Self {
            size,
            points: vec![Point::Empty; size as usize * size as usize],
            to_move: Color::Black,
        }
    }

    /// Rebuilds a board by replaying an ordered move list from empty.
    ///
    /// The list is authoritative history; if any entry targets an occupied
    /// point or the wrong board size, the whole reconstruction fails with
    /// [`Error::IllegalReplay`] naming the offending index.
    pub fn from_moves(size: u16, moves: &[Move]) -> Result<Self, Error> {
        let mut board = Self::empty(size);
        for (index, mv) in moves.iter().enumerate() {
            board.play(*mv).map_err(|e| Error::IllegalReplay {
                index,
                message: e.to_string(),
            })?;
        }
        Ok(board)
    }

    /// Board edge length.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// The color due to move next.
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Reads one point.
    ///
    /// Fails with [`Error::OutOfRange`] if the coordinate belongs to a
    /// different board size.
    pub fn get(&self, coord: Coord) -> Result<Point, Error> {
        if coord.size() != self.size {
            return Err(Error::OutOfRange {
                coord_size: coord.size(),
                board_size: self.size,
            });
        }
        Ok(self.points[coord.index()])
    }

    /// Plays one move for the side to move, then toggles the turn.
    ///
    /// A pass writes no point. A placement fails with
    /// [`Error::CoordinateOccupied`] if the point holds a stone, or
    /// [`Error::OutOfRange`] on a size mismatch; the turn does not toggle
    /// on failure.
    pub fn play(&mut self, mv: Move) -> Result<(), Error> {
        if let Move::Play(coord) = mv {
            match self.get(coord)? {
                Point::Empty => self.points[coord.index()] = Point::Stone(self.to_move),
                Point::Stone(_) => return Err(Error::CoordinateOccupied { coord }),
            }
        }
        self.to_move = self.to_move.opposite();
        Ok(())
    }

    /// All empty points in row-major order.
    ///
    /// This is placeholder legality: an empty point may still be an illegal
    /// play under the real rules (suicide, ko), which the server alone
    /// enforces.
    pub fn legal_moves(&self) -> impl Iterator<Item = Coord> + '_ {
        self.points.iter().enumerate().filter_map(|(i, point)| {
            if *point == Point::Empty {
                let x = (i % self.size as usize) as u16;
                let y = (i / self.size as usize) as u16;
                Coord::from_numeric(self.size, x, y).ok()
            } else {
                None
            }
        })
    }
}

impl std::fmt::Display for Board {
    /// Fixed-width diagram with visual column letters, top-down row numbers,
    /// and the side to move. Diagnostic output, parsed by nobody.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const COLUMNS: &str = "ABCDEFGHJKLMNOPQRSTUVWXYZ";
        write!(f, "  ")?;
        for letter in COLUMNS.chars().take(self.size as usize) {
            write!(f, " {letter}")?;
        }
        writeln!(f)?;
        for y in 0..self.size {
            write!(f, "{:2}", self.size - y)?;
            for x in 0..self.size {
                let point = self.points[y as usize * self.size as usize + x as usize];
                let symbol = match point {
                    Point::Empty => '+',
                    Point::Stone(color) => color.symbol(),
                };
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "to move: {}", self.to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(size: u16, x: u16, y: u16) -> Coord {
        Coord::from_numeric(size, x, y).unwrap()
    }

    #[test]
    fn test_empty_board() {
        let board = Board::empty(9);
        assert_eq!(board.size(), 9);
        assert_eq!(board.to_move(), Color::Black);
        assert_eq!(board.legal_moves().count(), 81);
    }

    #[test]
    fn test_play_sets_point_and_flips_turn() {
        let mut board = Board::empty(9);
        let target = coord(9, 4, 4);
        board.play(Move::Play(target)).unwrap();
        assert_eq!(board.get(target).unwrap(), Point::Stone(Color::Black));
        assert_eq!(board.to_move(), Color::White);
    }

    #[test]
    fn test_pass_flips_turn_without_writing() {
        let mut board = Board::empty(9);
        board.play(Move::Pass).unwrap();
        assert_eq!(board.to_move(), Color::White);
        assert_eq!(board.legal_moves().count(), 81);
    }

    #[test]
    fn test_occupied_point_rejected() {
        let mut board = Board::empty(9);
        let target = coord(9, 0, 0);
        board.play(Move::Play(target)).unwrap();
        let result = board.play(Move::Play(target));
        assert!(matches!(result, Err(Error::CoordinateOccupied { .. })));
        // Failed plays leave the turn alone.
        assert_eq!(board.to_move(), Color::White);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let mut board = Board::empty(9);
        let foreign = coord(13, 0, 0);
        assert!(matches!(
            board.play(Move::Play(foreign)),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(board.get(foreign), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn test_replay_empty_list_is_empty_board() {
        assert_eq!(Board::from_moves(9, &[]).unwrap(), Board::empty(9));
    }

    #[test]
    fn test_replay_alternates_colors() {
        let moves = [
            Move::Play(coord(9, 2, 2)),
            Move::Play(coord(9, 6, 6)),
            Move::Pass,
            Move::Play(coord(9, 4, 4)),
        ];
        let board = Board::from_moves(9, &moves).unwrap();
        assert_eq!(board.get(coord(9, 2, 2)).unwrap(), Point::Stone(Color::Black));
        assert_eq!(board.get(coord(9, 6, 6)).unwrap(), Point::Stone(Color::White));
        // Black passed, so White owns the fourth move.
        assert_eq!(board.get(coord(9, 4, 4)).unwrap(), Point::Stone(Color::White));
        assert_eq!(board.to_move(), Color::Black);
    }

    #[test]
    fn test_replay_duplicate_fails() {
        let moves = [Move::Play(coord(9, 2, 2)), Move::Play(coord(9, 2, 2))];
        let result = Board::from_moves(9, &moves);
        match result {
            Err(Error::IllegalReplay { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected IllegalReplay, got {other:?}"),
        }
    }

    #[test]
    fn test_legal_moves_row_major_and_restartable() {
        let mut board = Board::empty(9);
        board.play(Move::Play(coord(9, 0, 0))).unwrap();
        let first: Vec<_> = board.legal_moves().collect();
        assert_eq!(first.len(), 80);
        assert_eq!(first[0], coord(9, 1, 0));
        // A second traversal starts over.
        assert_eq!(board.legal_moves().count(), 80);
    }

    #[test]
    fn test_render_shape() {
        let mut board = Board::empty(9);
        board.play(Move::Play(coord(9, 4, 4))).unwrap();
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].contains('J'));
        assert!(!lines[0].contains('I'));
        assert!(lines[1].starts_with(" 9"));
        assert!(lines[5].contains('B'));
        assert_eq!(lines[10], "to move: White");
    }
}

use crate::board::Board;
use crate::types::Square;

/// Diagram board for tests; see [`Board::from_rows`].
pub fn board_from_rows(rows: [&str; 8]) -> Board {
    Board::from_rows(rows).unwrap()
}

pub fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

pub fn squares(names: &[&str]) -> Vec<Square> {
    let mut v: Vec<Square> = names.iter().map(|n| sq(n)).collect();
    v.sort();
    v
}

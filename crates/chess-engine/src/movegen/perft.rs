//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! The board is walked in place with make/unmake and restored on return.

use super::MoveGenerator;
use crate::Board;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    MoveGenerator::default().perft(board, depth)
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(String, u64)> {
    MoveGenerator::default().perft_divide(board, depth)
}

impl MoveGenerator {
    /// Counts the leaf nodes at `depth` using this generator's rules.
    pub fn perft(&self, board: &mut Board, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves(board);

        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0u64;
        for &m in &moves {
            if board.make_move(m, true).is_err() {
                continue;
            }
            nodes += self.perft(board, depth - 1);
            if board.unmake_move(m, true).is_err() {
                break;
            }
        }
        nodes
    }

    /// Per-move node counts at `depth`, sorted by coordinate notation.
    pub fn perft_divide(&self, board: &mut Board, depth: u32) -> Vec<(String, u64)> {
        let moves = self.generate_moves(board);
        let mut results = Vec::with_capacity(moves.len());

        for &m in &moves {
            if board.make_move(m, true).is_err() {
                continue;
            }
            let nodes = if depth > 1 {
                self.perft(board, depth - 1)
            } else {
                1
            };
            results.push((m.to_coordinate(), nodes));
            if board.unmake_move(m, true).is_err() {
                break;
            }
        }

        results.sort_by(|a, b| a.0.cmp(&b.0));
        results
    }
}

//! Depth-limited minimax search with alpha-beta pruning.
//!
//! The agent maximizes the utility of its own color: nodes where the agent's
//! color is to move take the maximum over their children, the other nodes
//! take the minimum. Search stops at a won or lost board (`±WIN_SCORE`) or when
//! the depth is exhausted, where [`evaluate`] scores the position.
//!
//! Children are explored on cloned boards, so the caller's board is never
//! touched. Moves are searched in row-major order, optionally with the root
//! moves shuffled by a seeded generator (see [`TieBreak`]). Among equally good
//! root moves the first one searched wins, so the result is the same move an
//! unpruned minimax would pick with the same order.

use tracing::debug;

use crate::agent::Agent;
use crate::board::{Board, Color, Point};
use crate::constants::{INF, WIN_SCORE};
use crate::error::AgentError;
use crate::eval::evaluate;

/// Order in which root moves are tried, which decides between equal moves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Row-major order of the legal actions.
    #[default]
    RowMajor,
    /// Root moves shuffled with a generator seeded from this value and the
    /// move number.
    Seeded(u64),
}

/// Outcome of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Point,
    /// Utility of `best_move` for the agent's color.
    pub score: i32,
    /// Positions visited, root children included.
    pub nodes: u64,
}

/// Minimax agent with alpha-beta pruning and a fixed ply limit.
pub struct AlphaBetaAgent {
    color: Color,
    depth: u8,
    tie_break: TieBreak,
    nodes: u64,
}

impl AlphaBetaAgent {
    /// An agent for `color` searching `depth` plies (at least one).
    pub fn new(color: Color, depth: u8) -> Self {
        Self {
            color,
            depth: depth.max(1),
            tie_break: TieBreak::default(),
            nodes: 0,
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Root moves in the order they will be searched.
    pub fn root_moves(&self, board: &Board) -> Vec<Point> {
        let mut moves: Vec<Point> = board.legal_actions().iter().copied().collect();
        if let TieBreak::Seeded(seed) = self.tie_break {
            let mut rng = fastrand::Rng::with_seed(seed ^ board.counter_move() as u64);
            rng.shuffle(&mut moves);
        }
        moves
    }

    /// Search `board` and return the chosen move with its score.
    ///
    /// # Errors
    /// [`AgentError::NoLegalActions`] if the side to move has no legal point.
    pub fn search(&mut self, board: &Board) -> Result<SearchResult, AgentError> {
        if board.winner().is_some() || board.legal_actions().is_empty() {
            return Err(AgentError::NoLegalActions(board.next()));
        }
        self.nodes = 0;

        let maximizing = board.next() == self.color;
        let mut alpha = -INF;
        let mut beta = INF;
        let mut best: Option<(Point, i32)> = None;

        for mv in self.root_moves(board) {
            let Some(child) = play(board, mv) else {
                continue;
            };
            let score = self.alpha_beta(&child, self.depth - 1, alpha, beta);
            let improves = match best {
                None => true,
                Some((_, s)) if maximizing => score > s,
                Some((_, s)) => score < s,
            };
            if improves {
                best = Some((mv, score));
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        let (best_move, score) = best.ok_or(AgentError::NoLegalActions(board.next()))?;
        debug!(
            color = %self.color,
            depth = self.depth,
            nodes = self.nodes,
            score,
            best = %best_move,
            "search finished"
        );
        Ok(SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        })
    }

    fn alpha_beta(&mut self, board: &Board, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if let Some(winner) = board.winner() {
            return if winner == self.color {
                WIN_SCORE
            } else {
                -WIN_SCORE
            };
        }
        if depth == 0 {
            return evaluate(board, self.color);
        }

        if board.next() == self.color {
            let mut value = -INF;
            for &mv in board.legal_actions() {
                let Some(child) = play(board, mv) else {
                    continue;
                };
                value = value.max(self.alpha_beta(&child, depth - 1, alpha, beta));
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        } else {
            let mut value = INF;
            for &mv in board.legal_actions() {
                let Some(child) = play(board, mv) else {
                    continue;
                };
                value = value.min(self.alpha_beta(&child, depth - 1, alpha, beta));
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        }
    }
}

/// The board after `mv`, on a fresh copy.
fn play(board: &Board, mv: Point) -> Option<Board> {
    let mut child = board.clone();
    child.put_stone(mv).ok()?;
    Some(child)
}

impl Agent for AlphaBetaAgent {
    fn name(&self) -> &'static str {
        "AlphaBetaAgent"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn get_action(&mut self, board: &Board) -> Result<Point, AgentError> {
        self.search(board).map(|r| r.best_move)
    }
}

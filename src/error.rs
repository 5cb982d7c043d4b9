//! Error types for the rule engine, the agents and match configuration.

use std::io;

use thiserror::Error;

use crate::board::{Color, Point};

/// A rejected `put_stone` call. The board is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move at {0}: point is off the board")]
    OffBoard(Point),
    #[error("illegal move at {0}: point not empty")]
    Occupied(Point),
    #[error("illegal move at {0}: suicide")]
    Suicide(Point),
    #[error("illegal move at {0}: game is over")]
    GameOver(Point),
}

/// A programmed participant was asked for a move it cannot give.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The board is terminal; the caller must not ask for a move.
    #[error("no legal action available for {0}")]
    NoLegalActions(Color),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid agent '{0}' (allowed: minimax, random, none)")]
    UnknownAgent(String),
    #[error("board size {size} out of range {min}..={max}")]
    InvalidBoardSize { size: usize, min: usize, max: usize },
    #[error("search depth {depth} out of range 1..={max}")]
    InvalidDepth { depth: u8, max: u8 },
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read move: {0}")]
    Io(#[from] io::Error),
}

//! Mini Go: a small Go engine with a minimax opponent.
//!
//! The crate enforces the rules of Go on a square board and provides a
//! depth-limited alpha-beta search agent to play against.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, search limits and evaluation weights
//! - [`board`] - Rule engine (stones, groups, captures, legal moves)
//! - [`group`] - Stone groups and their liberties
//! - [`eval`] - Static evaluation at the search horizon
//! - [`search`] - Minimax search with alpha-beta pruning
//! - [`agent`] - Agents, human input and participants
//! - [`console`] - Terminal coordinates and console input
//! - [`game`] - Match configuration and turn loop
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use mini_go::agent::Agent;
//! use mini_go::board::{Board, Color};
//! use mini_go::search::AlphaBetaAgent;
//!
//! // Black opens on the center point.
//! let mut board = Board::new(Color::Black);
//! board.put_stone_unchecked(board.center()).unwrap();
//!
//! // Let the engine answer for White.
//! let mut agent = AlphaBetaAgent::new(Color::White, 1);
//! let reply = agent.get_action(&board).unwrap();
//! board.put_stone(reply).unwrap();
//! assert_eq!(board.counter_move(), 2);
//! ```

pub mod agent;
pub mod board;
pub mod console;
pub mod constants;
pub mod error;
pub mod eval;
pub mod game;
pub mod group;
pub mod search;

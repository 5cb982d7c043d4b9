//! Move sources: programmed agents and interactive players.

use std::cell::RefCell;
use std::fmt;
use std::io;
use std::rc::Rc;
use std::str::FromStr;

use crate::board::{Board, Color, Point};
use crate::error::{AgentError, ConfigError, MatchError};
use crate::search::{AlphaBetaAgent, TieBreak};

/// A programmed participant.
pub trait Agent {
    fn name(&self) -> &'static str;

    fn color(&self) -> Color;

    /// Choose a point among `board.legal_actions()`. The board is not modified.
    fn get_action(&mut self, board: &Board) -> Result<Point, AgentError>;
}

impl fmt::Display for dyn Agent + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; color: {}", self.name(), self.color())
    }
}

/// A human player answering from some input device.
pub trait Interactive {
    /// Wait for a point. `Ok(None)` means the player quit.
    fn poll(&mut self, board: &Board) -> io::Result<Option<Point>>;
}

/// One input device shared by both colors, e.g. a single terminal.
impl<T: Interactive + ?Sized> Interactive for Rc<RefCell<T>> {
    fn poll(&mut self, board: &Board) -> io::Result<Option<Point>> {
        self.borrow_mut().poll(board)
    }
}

/// Plays a uniformly random legal point.
pub struct RandomAgent {
    color: Color,
    rng: fastrand::Rng,
}

impl RandomAgent {
    /// Without a seed the generator is seeded from the environment.
    pub fn new(color: Color, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self { color, rng }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &'static str {
        "RandomAgent"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn get_action(&mut self, board: &Board) -> Result<Point, AgentError> {
        let legal = board.legal_actions();
        if board.winner().is_some() || legal.is_empty() {
            return Err(AgentError::NoLegalActions(board.next()));
        }
        let i = self.rng.usize(..legal.len());
        legal
            .iter()
            .nth(i)
            .copied()
            .ok_or(AgentError::NoLegalActions(board.next()))
    }
}

/// Participant kind as named on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AgentKind {
    Human,
    Minimax,
    Random,
}

impl AgentKind {
    /// Build the agent for this kind, or `None` for a human player.
    pub fn build(self, color: Color, depth: u8, seed: Option<u64>) -> Option<Box<dyn Agent>> {
        match self {
            AgentKind::Human => None,
            AgentKind::Minimax => {
                let tie_break = seed.map_or(TieBreak::RowMajor, TieBreak::Seeded);
                Some(Box::new(
                    AlphaBetaAgent::new(color, depth).with_tie_break(tie_break),
                ))
            }
            AgentKind::Random => Some(Box::new(RandomAgent::new(color, seed))),
        }
    }
}

impl FromStr for AgentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "human" => Ok(AgentKind::Human),
            "minimax" => Ok(AgentKind::Minimax),
            "random" => Ok(AgentKind::Random),
            _ => Err(ConfigError::UnknownAgent(s.to_string())),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Human => write!(f, "none"),
            AgentKind::Minimax => write!(f, "minimax"),
            AgentKind::Random => write!(f, "random"),
        }
    }
}

/// Whoever plays one color: a human at some input device, or an agent.
pub enum Participant {
    Interactive(Box<dyn Interactive>),
    Programmed(Box<dyn Agent>),
}

impl Participant {
    /// Ask for the next point. `Ok(None)` when an interactive player quits.
    pub fn next_point(&mut self, board: &Board) -> Result<Option<Point>, MatchError> {
        match self {
            Participant::Interactive(input) => Ok(input.poll(board)?),
            Participant::Programmed(agent) => Ok(Some(agent.get_action(board)?)),
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Participant::Interactive(_))
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Interactive(_) => write!(f, "Human"),
            Participant::Programmed(agent) => write!(f, "{agent}"),
        }
    }
}

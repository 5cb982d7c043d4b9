//! Match driver: opening move, turn loop and final report.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::agent::{AgentKind, Interactive, Participant};
use crate::board::{Board, Color, Point};
use crate::console::format_point;
use crate::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_MAX_MOVES_PER_POINT, DEFAULT_SEARCH_DEPTH, MAX_BOARD_SIZE,
    MAX_SEARCH_DEPTH, MIN_BOARD_SIZE,
};
use crate::error::{ConfigError, MatchError};

/// Settings for one match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    pub size: usize,
    /// Search depth of minimax agents, in plies.
    pub depth: u8,
    pub black: AgentKind,
    pub white: AgentKind,
    /// Seed for random agents and the minimax tie-break.
    pub seed: Option<u64>,
    /// Stop the match after this many moves, opening included. Agent-only
    /// matches fall back to [`DEFAULT_MAX_MOVES_PER_POINT`] per board point.
    pub max_moves: Option<usize>,
    /// Print the board after every move.
    pub show_board: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            depth: DEFAULT_SEARCH_DEPTH,
            black: AgentKind::Human,
            white: AgentKind::Human,
            seed: None,
            max_moves: None,
            show_board: true,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.size) {
            return Err(ConfigError::InvalidBoardSize {
                size: self.size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        if self.depth == 0 || self.depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::InvalidDepth {
                depth: self.depth,
                max: MAX_SEARCH_DEPTH,
            });
        }
        Ok(())
    }
}

/// Result of a finished (or abandoned) match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Option<Color>,
    pub end_by_no_legal_actions: bool,
    /// Side to move when the match ended. On a natural end this is the color
    /// left without a legal move.
    pub next: Color,
    pub counter_move: usize,
    pub elapsed: Duration,
    /// The match stopped on a quit or the move limit.
    pub aborted: bool,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.end_by_no_legal_actions {
            writeln!(
                f,
                "Game ends early (no legal action is available for {})",
                self.next
            )?;
        }
        match self.winner {
            Some(color) => writeln!(f, "{color} wins!")?,
            None => writeln!(f, "No winner")?,
        }
        writeln!(f, "Match ends in {:.3} seconds", self.elapsed.as_secs_f64())?;
        write!(f, "Match ends in {} moves", self.counter_move)
    }
}

/// One game between two participants. Black moves first, from the center.
pub struct Match {
    board: Board,
    black: Participant,
    white: Participant,
    max_moves: Option<usize>,
    show_board: bool,
}

impl Match {
    pub fn new(board: Board, black: Participant, white: Participant) -> Self {
        Self {
            board,
            black,
            white,
            max_moves: None,
            show_board: false,
        }
    }

    /// Build a match from `config`, asking `human` for the input device of
    /// every human color.
    pub fn from_config<F>(config: &MatchConfig, mut human: F) -> Result<Self, ConfigError>
    where
        F: FnMut(Color) -> Box<dyn Interactive>,
    {
        config.validate()?;
        let board = Board::with_size(config.size, Color::Black)?;
        let mut participant = |kind: AgentKind, color: Color, salt: u64| {
            let seed = config.seed.map(|s| s.wrapping_add(salt));
            match kind.build(color, config.depth, seed) {
                Some(agent) => Participant::Programmed(agent),
                None => Participant::Interactive(human(color)),
            }
        };
        let black = participant(config.black, Color::Black, 0);
        let white = participant(config.white, Color::White, 1);

        Ok(Self {
            board,
            black,
            white,
            max_moves: config.max_moves,
            show_board: config.show_board,
        })
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = Some(max_moves);
        self
    }

    pub fn with_show_board(mut self, show_board: bool) -> Self {
        self.show_board = show_board;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn black(&self) -> &Participant {
        &self.black
    }

    pub fn white(&self) -> &Participant {
        &self.white
    }

    /// The explicit move limit, or a cap scaled to the board when no human
    /// takes part.
    pub fn move_limit(&self) -> Option<usize> {
        self.max_moves.or_else(|| {
            let agents_only = !self.black.is_interactive() && !self.white.is_interactive();
            let points = self.board.size() * self.board.size();
            agents_only.then_some(points * DEFAULT_MAX_MOVES_PER_POINT)
        })
    }

    /// Play the opening on the center point, then alternate turns until a
    /// side has no legal move, a player quits, or the move limit is reached.
    ///
    /// Points outside the legal actions are ignored and the same player is
    /// asked again.
    pub fn play(&mut self) -> Result<MatchOutcome, MatchError> {
        let start = Instant::now();
        info!(
            black = %self.black,
            white = %self.white,
            size = self.board.size(),
            "match starts"
        );

        if self.board.counter_move() == 0 {
            let opening = self.board.center();
            let color = self.board.next();
            self.board.put_stone_unchecked(opening)?;
            self.show_move(color, opening);
        }

        let limit = self.move_limit();
        let mut aborted = false;
        while self.board.winner().is_none() {
            if limit.is_some_and(|limit| self.board.counter_move() >= limit) {
                info!(moves = self.board.counter_move(), "move limit reached");
                aborted = true;
                break;
            }

            let color = self.board.next();
            let participant = match color {
                Color::Black => &mut self.black,
                Color::White => &mut self.white,
            };
            let Some(point) = participant.next_point(&self.board)? else {
                info!(%color, "player quit");
                aborted = true;
                break;
            };

            if !self.board.is_legal(point) {
                warn!(%color, %point, "ignoring illegal move");
                continue;
            }
            self.board.put_stone(point)?;
            for group in self.board.removed_groups() {
                debug!(
                    color = %group.color(),
                    stones = group.len(),
                    "group removed"
                );
            }
            self.show_move(color, point);
        }

        let outcome = MatchOutcome {
            winner: self.board.winner(),
            end_by_no_legal_actions: self.board.end_by_no_legal_actions(),
            next: self.board.next(),
            counter_move: self.board.counter_move(),
            elapsed: start.elapsed(),
            aborted,
        };
        info!(
            winner = ?outcome.winner,
            moves = outcome.counter_move,
            aborted,
            "match ends"
        );
        Ok(outcome)
    }

    fn show_move(&self, color: Color, point: Point) {
        debug!(
            move_number = self.board.counter_move(),
            %color,
            %point,
            "stone placed"
        );
        if !self.show_board {
            return;
        }
        println!(
            "Move {}: {color} plays {}",
            self.board.counter_move(),
            format_point(point, self.board.size())
        );
        if self.board.winner().is_some() {
            println!("{}", self.board);
        } else {
            println!("{}", self.board.render_with_legal());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;

    use super::*;

    struct Scripted(VecDeque<Point>);

    impl Interactive for Scripted {
        fn poll(&mut self, _board: &Board) -> io::Result<Option<Point>> {
            Ok(self.0.pop_front())
        }
    }

    fn scripted(points: &[(usize, usize)]) -> Box<dyn Interactive> {
        Box::new(Scripted(
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        ))
    }

    #[test]
    fn test_validate() {
        assert!(MatchConfig::default().validate().is_ok());
        let bad_size = MatchConfig {
            size: 30,
            ..MatchConfig::default()
        };
        assert!(matches!(
            bad_size.validate(),
            Err(ConfigError::InvalidBoardSize { size: 30, .. })
        ));
        let bad_depth = MatchConfig {
            depth: 0,
            ..MatchConfig::default()
        };
        assert!(matches!(
            bad_depth.validate(),
            Err(ConfigError::InvalidDepth { depth: 0, .. })
        ));
    }

    #[test]
    fn test_opening_then_quit() {
        let config = MatchConfig {
            show_board: false,
            ..MatchConfig::default()
        };
        let mut game = Match::from_config(&config, |_| scripted(&[])).unwrap();
        assert!(game.black().is_interactive());
        let outcome = game.play().unwrap();
        assert!(outcome.aborted);
        assert_eq!(outcome.counter_move, 1);
        assert_eq!(game.board().stone_at(Point::new(10, 10)), Some(Color::Black));
        assert_eq!(game.board().next(), Color::White);
    }

    #[test]
    fn test_illegal_input_is_retried() {
        let config = MatchConfig {
            show_board: false,
            ..MatchConfig::default()
        };
        // White first names the occupied center, then a legal point.
        let mut game = Match::from_config(&config, |color| match color {
            Color::White => scripted(&[(10, 10), (3, 3)]),
            Color::Black => scripted(&[]),
        })
        .unwrap();
        let outcome = game.play().unwrap();
        assert_eq!(outcome.counter_move, 2);
        assert_eq!(game.board().stone_at(Point::new(3, 3)), Some(Color::White));
    }

    #[test]
    fn test_agents_play_until_end_or_limit() {
        let config = MatchConfig {
            size: 3,
            black: AgentKind::Minimax,
            white: AgentKind::Random,
            seed: Some(11),
            max_moves: Some(40),
            show_board: false,
            ..MatchConfig::default()
        };
        let mut game = Match::from_config(&config, |_| scripted(&[])).unwrap();
        let outcome = game.play().unwrap();
        assert!(outcome.counter_move <= 40);
        match outcome.winner {
            Some(winner) => {
                assert!(!outcome.aborted);
                assert!(outcome.end_by_no_legal_actions);
                assert_eq!(winner, outcome.next.opponent());
            }
            None => assert!(outcome.aborted),
        }
    }

    #[test]
    fn test_minimax_self_play_terminates() {
        let config = MatchConfig {
            size: 5,
            black: AgentKind::Minimax,
            white: AgentKind::Minimax,
            show_board: false,
            ..MatchConfig::default()
        };
        let mut game = Match::from_config(&config, |_| scripted(&[])).unwrap();
        let cap = 5 * 5 * DEFAULT_MAX_MOVES_PER_POINT;
        assert_eq!(game.move_limit(), Some(cap));
        let outcome = game.play().unwrap();
        assert!(outcome.counter_move <= cap);
        if outcome.aborted {
            assert_eq!(outcome.winner, None);
            assert_eq!(outcome.counter_move, cap);
            assert!(outcome.to_string().contains("No winner"));
        } else {
            assert!(outcome.winner.is_some());
        }
    }

    #[test]
    fn test_human_matches_have_no_default_limit() {
        let game = Match::from_config(&MatchConfig::default(), |_| scripted(&[])).unwrap();
        assert_eq!(game.move_limit(), None);
        let limited = MatchConfig {
            max_moves: Some(7),
            ..MatchConfig::default()
        };
        let game = Match::from_config(&limited, |_| scripted(&[])).unwrap();
        assert_eq!(game.move_limit(), Some(7));
    }

    #[test]
    fn test_depth_ceiling() {
        let deepest = MatchConfig {
            depth: MAX_SEARCH_DEPTH,
            ..MatchConfig::default()
        };
        assert!(deepest.validate().is_ok());
        let too_deep = MatchConfig {
            depth: MAX_SEARCH_DEPTH + 1,
            ..MatchConfig::default()
        };
        assert!(matches!(
            too_deep.validate(),
            Err(ConfigError::InvalidDepth { depth: 5, max: 4 })
        ));
    }

    #[test]
    fn test_show_board_smoke() {
        // Runs both renderings: with legal marks mid-game, plain once decided.
        let board = Board::with_size(3, Color::Black).unwrap();
        let black = Participant::Programmed(AgentKind::Random.build(Color::Black, 1, Some(5)).unwrap());
        let white = Participant::Programmed(AgentKind::Minimax.build(Color::White, 1, None).unwrap());
        let mut game = Match::new(board, black, white)
            .with_max_moves(12)
            .with_show_board(true);
        let outcome = game.play().unwrap();
        assert!(outcome.counter_move >= 1 && outcome.counter_move <= 12);
        assert_eq!(outcome.aborted, outcome.winner.is_none());

        let mut decided = Board::with_size(2, Color::White).unwrap();
        for p in [Point::new(1, 1), Point::new(2, 1)] {
            decided.put_stone(p).unwrap();
        }
        let black = Participant::Programmed(AgentKind::Minimax.build(Color::Black, 1, None).unwrap());
        let white = Participant::Programmed(AgentKind::Minimax.build(Color::White, 1, None).unwrap());
        let mut game = Match::new(decided, black, white).with_show_board(true);
        let outcome = game.play().unwrap();
        assert_eq!(outcome.winner, Some(Color::White));
        assert!(!outcome.aborted);
    }

    #[test]
    fn test_outcome_display() {
        let outcome = MatchOutcome {
            winner: Some(Color::White),
            end_by_no_legal_actions: true,
            next: Color::Black,
            counter_move: 3,
            elapsed: Duration::from_millis(1500),
            aborted: false,
        };
        let text = outcome.to_string();
        assert!(text.starts_with("Game ends early (no legal action is available for BLACK)"));
        assert!(text.contains("WHITE wins!"));
        assert!(text.contains("1.500 seconds"));
        assert!(text.ends_with("Match ends in 3 moves"));
    }
}

//! The rule-enforcing Go board.
//!
//! Each occupied point records the [`GroupId`] of the group it belongs to, and
//! the board owns every [`Group`] in a map keyed by that id. Liberties are
//! recomputed from group members whenever adjacency changes. The set of legal
//! points for the side to move is rebuilt after every move.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::trace;

use crate::console::column_label;
use crate::constants::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{ConfigError, MoveError};
use crate::group::{Group, GroupId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Board glyph used by the text rendering.
    pub fn glyph(self) -> char {
        match self {
            Color::Black => 'X',
            Color::White => 'O',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "BLACK"),
            Color::White => write!(f, "WHITE"),
        }
    }
}

/// A 1-based `(x, y)` intersection. `y` grows downwards.
///
/// Points order row-major, so sets and maps of points iterate
/// top-left to bottom-right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal neighbours of an on-board point.
#[inline]
fn neighbors(p: Point, size: usize) -> impl Iterator<Item = Point> {
    [
        (p.x > 1).then(|| Point::new(p.x - 1, p.y)),
        (p.x < size).then(|| Point::new(p.x + 1, p.y)),
        (p.y > 1).then(|| Point::new(p.x, p.y - 1)),
        (p.y < size).then(|| Point::new(p.x, p.y + 1)),
    ]
    .into_iter()
    .flatten()
}

/// Go board state for one match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Owning group of each point, `None` for empty intersections.
    cells: Vec<Option<GroupId>>,
    groups: BTreeMap<GroupId, Group>,
    next_group_id: u32,
    next: Color,
    counter_move: usize,
    legal_actions: BTreeSet<Point>,
    removed_groups: Vec<Group>,
    winner: Option<Color>,
    end_by_no_legal_actions: bool,
}

impl Board {
    /// An empty 19x19 board with `first` to move.
    pub fn new(first: Color) -> Self {
        Self::build(DEFAULT_BOARD_SIZE, first)
    }

    pub fn with_size(size: usize, first: Color) -> Result<Self, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(ConfigError::InvalidBoardSize {
                size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(Self::build(size, first))
    }

    fn build(size: usize, first: Color) -> Self {
        let mut board = Self {
            size,
            cells: vec![None; size * size],
            groups: BTreeMap::new(),
            next_group_id: 0,
            next: first,
            counter_move: 0,
            legal_actions: BTreeSet::new(),
            removed_groups: Vec::new(),
            winner: None,
            end_by_no_legal_actions: false,
        };
        board.refresh_legal_actions();
        board
    }

    // -- Accessors --

    pub fn size(&self) -> usize {
        self.size
    }

    /// The fixed opening point, `(10, 10)` on a 19x19 board.
    pub fn center(&self) -> Point {
        let c = self.size.div_ceil(2);
        Point::new(c, c)
    }

    pub fn next(&self) -> Color {
        self.next
    }

    pub fn counter_move(&self) -> usize {
        self.counter_move
    }

    /// Points where [`Board::next`] may play, in row-major order.
    pub fn legal_actions(&self) -> &BTreeSet<Point> {
        &self.legal_actions
    }

    pub fn is_legal(&self, point: Point) -> bool {
        self.legal_actions.contains(&point)
    }

    /// Groups captured by the most recent move.
    pub fn removed_groups(&self) -> &[Group] {
        &self.removed_groups
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn end_by_no_legal_actions(&self) -> bool {
        self.end_by_no_legal_actions
    }

    pub fn on_board(&self, p: Point) -> bool {
        (1..=self.size).contains(&p.x) && (1..=self.size).contains(&p.y)
    }

    /// Every point of the board in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let size = self.size;
        (1..=size).flat_map(move |y| (1..=size).map(move |x| Point::new(x, y)))
    }

    pub fn exist_stone(&self, p: Point) -> bool {
        self.group_id_at(p).is_some()
    }

    pub fn stone_at(&self, p: Point) -> Option<Color> {
        self.group_at(p).map(Group::color)
    }

    pub fn group_at(&self, p: Point) -> Option<&Group> {
        self.group_id_at(p).and_then(|id| self.groups.get(&id))
    }

    /// Liberties of the group occupying `p`.
    pub fn liberties(&self, p: Point) -> Option<&BTreeSet<Point>> {
        self.group_at(p).map(Group::liberties)
    }

    /// Groups currently on the board, ordered by id.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn stone_count(&self, color: Color) -> usize {
        self.groups()
            .filter(|g| g.color() == color)
            .map(Group::len)
            .sum()
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        (p.y - 1) * self.size + (p.x - 1)
    }

    fn group_id_at(&self, p: Point) -> Option<GroupId> {
        if !self.on_board(p) {
            return None;
        }
        self.cells[self.idx(p)]
    }

    // -- Moves --

    /// Play a stone of color [`Board::next`] at `point`.
    ///
    /// # Errors
    /// Fails without touching the board if the point is off the board,
    /// occupied, not among the legal actions, or the game is over.
    pub fn put_stone(&mut self, point: Point) -> Result<(), MoveError> {
        self.check_placeable(point)?;
        if !self.legal_actions.contains(&point) {
            return Err(MoveError::Suicide(point));
        }
        self.apply(point);
        Ok(())
    }

    /// Play at `point` without consulting the legal actions.
    ///
    /// Reserved for trusted callers such as the fixed opening move. A suicidal
    /// stone is placed and then captured together with its group.
    pub fn put_stone_unchecked(&mut self, point: Point) -> Result<(), MoveError> {
        self.check_placeable(point)?;
        self.apply(point);
        Ok(())
    }

    fn check_placeable(&self, point: Point) -> Result<(), MoveError> {
        if !self.on_board(point) {
            return Err(MoveError::OffBoard(point));
        }
        if self.winner.is_some() {
            return Err(MoveError::GameOver(point));
        }
        if self.exist_stone(point) {
            return Err(MoveError::Occupied(point));
        }
        Ok(())
    }

    fn apply(&mut self, point: Point) {
        let color = self.next;
        let own = self.place(point, color);

        let mut removed = Vec::new();
        for id in self.adjacent_groups(point, color.opponent()) {
            self.refresh_liberties(id);
            if self.has_no_liberties(id) {
                removed.extend(self.capture(id));
            }
        }

        self.refresh_liberties(own);
        if self.has_no_liberties(own) {
            removed.extend(self.capture(own));
        }

        self.removed_groups = removed;
        self.counter_move += 1;
        self.next = color.opponent();
        self.refresh_legal_actions();

        if self.legal_actions.is_empty() {
            self.winner = Some(color);
            self.end_by_no_legal_actions = true;
        }
    }

    /// Put a stone on `point` and merge it with its same-color neighbours.
    /// The lowest neighbouring group id survives the merge.
    fn place(&mut self, point: Point, color: Color) -> GroupId {
        let friends = self.adjacent_groups(point, color);
        let id = match friends.split_first() {
            Some((&keep, rest)) => {
                for other in rest {
                    if let Some(group) = self.groups.remove(other) {
                        for &p in group.points() {
                            let i = self.idx(p);
                            self.cells[i] = Some(keep);
                        }
                        if let Some(target) = self.groups.get_mut(&keep) {
                            target.absorb(group);
                        }
                    }
                }
                if let Some(target) = self.groups.get_mut(&keep) {
                    target.add_point(point);
                }
                keep
            }
            None => {
                let id = GroupId(self.next_group_id);
                self.next_group_id += 1;
                self.groups.insert(id, Group::singleton(id, color, point));
                id
            }
        };
        let i = self.idx(point);
        self.cells[i] = Some(id);
        id
    }

    /// Distinct ids of `color` groups orthogonally adjacent to `point`.
    fn adjacent_groups(&self, point: Point, color: Color) -> Vec<GroupId> {
        let mut ids: Vec<GroupId> = neighbors(point, self.size)
            .filter_map(|n| self.cells[self.idx(n)])
            .filter(|id| self.groups.get(id).is_some_and(|g| g.color() == color))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    fn has_no_liberties(&self, id: GroupId) -> bool {
        self.groups
            .get(&id)
            .is_some_and(|g| g.liberties().is_empty())
    }

    fn refresh_liberties(&mut self, id: GroupId) {
        let Some(group) = self.groups.get(&id) else {
            return;
        };
        let liberties: BTreeSet<Point> = group
            .points()
            .iter()
            .flat_map(|&p| neighbors(p, self.size))
            .filter(|&n| self.cells[self.idx(n)].is_none())
            .collect();
        if let Some(group) = self.groups.get_mut(&id) {
            group.set_liberties(liberties);
        }
    }

    /// Remove a group and all its stones, then refresh the liberties of every
    /// group that touched it.
    fn capture(&mut self, id: GroupId) -> Option<Group> {
        let group = self.groups.remove(&id)?;
        for &p in group.points() {
            let i = self.idx(p);
            self.cells[i] = None;
        }
        let touched: BTreeSet<GroupId> = group
            .points()
            .iter()
            .flat_map(|&p| neighbors(p, self.size))
            .filter_map(|n| self.cells[self.idx(n)])
            .collect();
        for t in touched {
            self.refresh_liberties(t);
        }
        trace!(
            group = %group.id(),
            color = %group.color(),
            stones = group.len(),
            "captured group"
        );
        Some(group)
    }

    // -- Legality --

    fn refresh_legal_actions(&mut self) {
        let color = self.next;
        self.legal_actions = self
            .points()
            .filter(|&p| self.is_legal_for(p, color))
            .collect();
    }

    /// Whether `color` may play at `point`, once the captures that stone
    /// would make are resolved.
    ///
    /// The placed stone keeps a liberty if it has an empty neighbour, if it
    /// captures a neighbouring group (whose only liberty is `point`), or if it
    /// joins a friendly group that has a liberty besides `point`.
    fn is_legal_for(&self, point: Point, color: Color) -> bool {
        if self.exist_stone(point) {
            return false;
        }
        neighbors(point, self.size).any(|n| match self.group_at(n) {
            None => true,
            Some(g) if g.color() == color => g.liberties().iter().any(|&l| l != point),
            Some(g) => g.liberties().len() == 1,
        })
    }

    // -- Rendering --

    fn render(&self, f: &mut impl fmt::Write, highlight_legal: bool) -> fmt::Result {
        write!(f, "   ")?;
        for x in 1..=self.size {
            write!(f, "{} ", column_label(x))?;
        }
        writeln!(f)?;
        for y in 1..=self.size {
            write!(f, "{:>2} ", self.size + 1 - y)?;
            for x in 1..=self.size {
                let p = Point::new(x, y);
                let ch = match self.stone_at(p) {
                    Some(color) => color.glyph(),
                    None if highlight_legal && self.is_legal(p) => '+',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    /// Text rendering with the legal points of the side to move marked `+`.
    pub fn render_with_legal(&self) -> String {
        let mut s = String::new();
        // Writing into a String cannot fail.
        let _ = self.render(&mut s, true);
        s
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

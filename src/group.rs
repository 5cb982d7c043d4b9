//! Stone groups and their liberties.
//!
//! A [`Group`] keeps its identity for as long as it lives on the board, while
//! its members change as neighbouring groups are merged into it. The board
//! owns groups through a [`GroupId`]-keyed map and looks them up from each
//! occupied point, so there are no references between stones and groups.

use std::collections::BTreeSet;
use std::fmt;

use crate::board::{Color, Point};

/// Stable identifier of a group on one board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub(crate) u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A maximal set of orthogonally connected stones of one color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    color: Color,
    points: BTreeSet<Point>,
    liberties: BTreeSet<Point>,
}

impl Group {
    /// A one-stone group. Liberties are filled in by the board.
    pub(crate) fn singleton(id: GroupId, color: Color, point: Point) -> Self {
        Self {
            id,
            color,
            points: BTreeSet::from([point]),
            liberties: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Member stones in row-major order.
    pub fn points(&self) -> &BTreeSet<Point> {
        &self.points
    }

    pub fn liberties(&self) -> &BTreeSet<Point> {
        &self.liberties
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }

    /// Move all members of `other` into this group.
    pub(crate) fn absorb(&mut self, other: Group) {
        debug_assert_eq!(self.color, other.color);
        self.points.extend(other.points);
    }

    pub(crate) fn add_point(&mut self, point: Point) {
        self.points.insert(point);
    }

    pub(crate) fn set_liberties(&mut self, liberties: BTreeSet<Point>) {
        self.liberties = liberties;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_has_one_member() {
        let p = Point::new(3, 4);
        let g = Group::singleton(GroupId(7), Color::White, p);
        assert_eq!(g.len(), 1);
        assert!(g.contains(p));
        assert!(g.liberties().is_empty());
        assert_eq!(g.id().to_string(), "#7");
    }

    #[test]
    fn absorb_unions_members() {
        let mut a = Group::singleton(GroupId(1), Color::Black, Point::new(1, 1));
        let b = Group::singleton(GroupId(2), Color::Black, Point::new(2, 1));
        a.absorb(b);
        assert_eq!(a.id(), GroupId(1));
        assert_eq!(a.len(), 2);
        assert!(a.contains(Point::new(2, 1)));
    }
}

//! Procedural Level Grammar
//!
//! L-system style rewriting: every symbol of the current string is replaced
//! simultaneously, once per depth step. The resulting string can be cut into
//! a [`Grid`] or walked by a turtle cursor whose handlers carve a dungeon.
//!
//! ## Reproducibility
//!
//! All random choices draw from the caller's [`Rng`]. Weighted rules keep
//! their entries in table order and use a cumulative-weight draw, so a fixed
//! seed regenerates the same level.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use tracing::debug;

use crate::core::rng::Rng;
use crate::error::{KitError, KitResult};
use super::grid::{Cell, Grid, GridPos};

/// Rewrite rule for one symbol.
#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    /// Fixed replacement. An empty string deletes the symbol.
    Replace(String),
    /// One alternative picked uniformly.
    Choice(Vec<String>),
    /// One key picked with probability weight / total, in entry order.
    Weighted(Vec<(String, f64)>),
}

/// Rule table keyed by symbol. Symbols without a rule pass through.
pub type Rules = BTreeMap<char, Rule>;

impl Rule {
    fn rewrite(&self, symbol: char, rng: &mut Rng, out: &mut String) {
        match self {
            Rule::Replace(text) => out.push_str(text),
            Rule::Choice(options) => match rng.choose(options) {
                Some(pick) => out.push_str(pick),
                None => debug!(%symbol, "choice rule has no alternatives"),
            },
            Rule::Weighted(entries) => match pick_weighted(entries, rng) {
                Some(pick) => out.push_str(pick),
                None => debug!(%symbol, "weighted rule has no positive weight"),
            },
        }
    }
}

/// Negative, NaN and infinite weights never get picked.
#[inline]
fn effective_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 { weight } else { 0.0 }
}

/// Cumulative-weight draw: roll in [0, total), subtract each weight in
/// order, emit the entry that takes the roll to zero or below.
fn pick_weighted<'a>(entries: &'a [(String, f64)], rng: &mut Rng) -> Option<&'a str> {
    let total: f64 = entries.iter().map(|(_, w)| effective_weight(*w)).sum();
    if total <= 0.0 {
        return None;
    }

    let mut roll = rng.next() * total;
    let mut last = None;
    for (key, weight) in entries {
        let weight = effective_weight(*weight);
        if weight == 0.0 {
            continue;
        }
        last = Some(key.as_str());
        roll -= weight;
        if roll <= 0.0 {
            return last;
        }
    }
    // Float rounding can leave a sliver of roll; the last live entry owns it.
    last
}

/// Rewrite `axiom` `depth` times.
///
/// ```
/// use gamekit::core::rng::Rng;
/// use gamekit::world::grammar::{expand, Rule, Rules};
///
/// let mut rules = Rules::new();
/// rules.insert('A', Rule::Replace("AB".into()));
/// assert_eq!(expand(&rules, "A", 2, &mut Rng::new(1)), "ABB");
/// ```
pub fn expand(rules: &Rules, axiom: &str, depth: usize, rng: &mut Rng) -> String {
    let mut current = axiom.to_string();
    for _ in 0..depth {
        let mut next = String::with_capacity(current.len() * 2);
        for symbol in current.chars() {
            match rules.get(&symbol) {
                Some(rule) => rule.rewrite(symbol, rng, &mut next),
                None => next.push(symbol),
            }
        }
        current = next;
    }
    current
}

/// Parse a rule table from JSON.
///
/// Each key is a single symbol. A string value is a replacement, an array
/// of strings a uniform choice, and an object a weight map (document order
/// kept, non-numeric weights read as 0).
pub fn parse_rules(json: &str) -> KitResult<Rules> {
    serde_json::from_str(json).map_err(KitError::Grammar)
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RuleVisitor)
    }
}

struct RuleVisitor;

impl<'de> Visitor<'de> for RuleVisitor {
    type Value = Rule;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a replacement string, a list of alternatives, or a weight map")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Rule, E> {
        Ok(Rule::Replace(v.to_string()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Rule, A::Error> {
        let mut options = Vec::new();
        while let Some(option) = seq.next_element::<String>()? {
            options.push(option);
        }
        Ok(Rule::Choice(options))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Rule, A::Error> {
        let mut entries = Vec::new();
        while let Some((key, weight)) = map.next_entry::<String, serde_json::Value>()? {
            entries.push((key, weight.as_f64().unwrap_or(0.0)));
        }
        Ok(Rule::Weighted(entries))
    }
}

/// Cut `s` into rows of `width` symbols; `wall` becomes blocked, anything
/// else free. The last row keeps whatever is left and may be short.
pub fn to_grid(s: &str, width: usize, wall: char) -> Grid {
    if width == 0 {
        return Grid::default();
    }
    let cells: Vec<Cell> = s
        .chars()
        .map(|c| if c == wall { Cell::Blocked } else { Cell::Free })
        .collect();
    Grid::from_rows(cells.chunks(width).map(<[Cell]>::to_vec).collect())
}

// =============================================================================
// INTERPRETATION
// =============================================================================

/// Turtle state threaded through [`interpret`].
///
/// `dir` counts clockwise quarter turns from east (y grows downward).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
    /// Heading in quarter turns
    pub dir: i32,
    /// Saved (position, heading) frames
    pub stack: Vec<(GridPos, i32)>,
}

impl Cursor {
    /// Current position.
    pub fn pos(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    /// Unit step for the current heading.
    pub fn heading(&self) -> (i32, i32) {
        match self.dir.rem_euclid(4) {
            0 => (1, 0),
            1 => (0, 1),
            2 => (-1, 0),
            _ => (0, -1),
        }
    }

    /// Step one cell along the heading.
    pub fn forward(&mut self) {
        let (dx, dy) = self.heading();
        self.x += dx;
        self.y += dy;
    }

    /// Turn by `quarter_turns` (positive is clockwise).
    pub fn turn(&mut self, quarter_turns: i32) {
        self.dir = (self.dir + quarter_turns).rem_euclid(4);
    }

    /// Save position and heading.
    pub fn push(&mut self) {
        self.stack.push((self.pos(), self.dir));
    }

    /// Restore the last saved frame. False (and unchanged) if none.
    pub fn pop(&mut self) -> bool {
        match self.stack.pop() {
            Some((pos, dir)) => {
                self.x = pos.x;
                self.y = pos.y;
                self.dir = dir;
                true
            }
            None => false,
        }
    }
}

/// Boxed per-symbol handler.
pub type Handler<'a> = Box<dyn FnMut(&mut Cursor) + 'a>;

/// Handler table keyed by symbol.
pub type Handlers<'a> = BTreeMap<char, Handler<'a>>;

/// Walk `s` left to right, running the handler registered for each symbol.
/// Symbols without a handler are skipped. Returns the final cursor.
pub fn interpret(s: &str, handlers: &mut Handlers<'_>) -> Cursor {
    interpret_with(s, |symbol, cursor| {
        if let Some(handler) = handlers.get_mut(&symbol) {
            handler(cursor);
        }
    })
}

/// Walk `s` with a single dispatch function.
pub fn interpret_with<F>(s: &str, mut dispatch: F) -> Cursor
where
    F: FnMut(char, &mut Cursor),
{
    let mut cursor = Cursor::default();
    for symbol in s.chars() {
        dispatch(symbol, &mut cursor);
    }
    cursor
}

/// Turtle that carves corridors out of solid rock.
///
/// `F` steps forward and frees the cell it lands on, `+`/`-` turn
/// clockwise/counter-clockwise, `[`/`]` save and restore the cursor. Steps
/// that leave the grid move the cursor but carve nothing.
#[derive(Clone, Debug)]
pub struct Carver {
    grid: Grid,
}

impl Carver {
    /// Start from a fully blocked `width` x `height` grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: Grid::filled(width, height, Cell::Blocked),
        }
    }

    /// Run `program` with the cursor starting at `origin`, facing east.
    ///
    /// The returned cursor, saved frames included, is in grid coordinates.
    pub fn carve(&mut self, program: &str, origin: GridPos) -> Cursor {
        let grid = &mut self.grid;
        grid.set(origin, Cell::Free);
        let mut end = interpret_with(program, |symbol, cursor| match symbol {
            'F' => {
                cursor.forward();
                grid.set(origin.offset(cursor.x, cursor.y), Cell::Free);
            }
            '+' => cursor.turn(1),
            '-' => cursor.turn(-1),
            '[' => cursor.push(),
            ']' => {
                cursor.pop();
            }
            _ => {}
        });
        let pos = origin.offset(end.x, end.y);
        (end.x, end.y) = (pos.x, pos.y);
        for (saved, _) in &mut end.stack {
            *saved = origin.offset(saved.x, saved.y);
        }
        end
    }

    /// Carved grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Take the carved grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

// =============================================================================
// TESTS
// =============================================================================

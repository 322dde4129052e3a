//! Tokens, board state and the spread rule

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{Direction, Hex};
use crate::error::BoardError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Power at which a token overloads and is removed
pub const MAX_POWER: u8 = 7;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Token color. Red is the solver's own color, Blue the opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "r")]
    Red,
    #[serde(rename = "b")]
    Blue,
}

impl Color {
    /// Single-letter board symbol
    pub fn symbol(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Blue => 'b',
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "r" | "R" => Some(Color::Red),
            "b" | "B" => Some(Color::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Blue => write!(f, "blue"),
        }
    }
}

/// A token on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    color: Color,
    power: u8,
}

impl Token {
    /// Create a token, rejecting powers outside `1..MAX_POWER`
    pub fn new(color: Color, power: u8) -> Result<Self, BoardError> {
        if power == 0 || power >= MAX_POWER {
            return Err(BoardError::InvalidPower(power));
        }
        Ok(Self { color, power })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn power(&self) -> u8 {
        self.power
    }
}

/// A spread action: absolute source cell plus relative direction
///
/// Serializes as the 4-tuple `(r, q, dr, dq)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "(i8, i8, i8, i8)", try_from = "(i8, i8, i8, i8)")]
pub struct Action {
    pub source: Hex,
    pub direction: Direction,
}

impl Action {
    pub fn new(source: Hex, direction: Direction) -> Self {
        Self { source, direction }
    }

    pub fn to_tuple(self) -> (i8, i8, i8, i8) {
        (
            self.source.r(),
            self.source.q(),
            self.direction.dr(),
            self.direction.dq(),
        )
    }
}

impl From<Action> for (i8, i8, i8, i8) {
    fn from(action: Action) -> Self {
        action.to_tuple()
    }
}

impl TryFrom<(i8, i8, i8, i8)> for Action {
    type Error = BoardError;

    fn try_from((r, q, dr, dq): (i8, i8, i8, i8)) -> Result<Self, Self::Error> {
        let (r, q) = (r as i32, q as i32);
        if !Hex::in_range(r, q) {
            return Err(BoardError::OutOfRange { r, q });
        }
        let (dr, dq) = (dr as i32, dq as i32);
        let direction =
            Direction::from_delta(dr, dq).ok_or(BoardError::InvalidDirection { dr, dq })?;
        Ok(Self::new(Hex::new(r, q), direction))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, q, dr, dq) = self.to_tuple();
        write!(f, "SPREAD({}, {}, {}, {})", r, q, dr, dq)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Board: hex -> token (sparse representation, mutated in place)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    cells: FxHashMap<Hex, Token>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from placements, rejecting repeated cells
    pub fn from_tokens<I>(tokens: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (Hex, Token)>,
    {
        let mut board = Self::new();
        for (hex, token) in tokens {
            if board.cells.insert(hex, token).is_some() {
                return Err(BoardError::DuplicateCell(hex));
            }
        }
        Ok(board)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Get token at hex
    pub fn get(&self, hex: Hex) -> Option<&Token> {
        self.cells.get(&hex)
    }

    /// Place a token, returning whatever was there
    pub fn insert(&mut self, hex: Hex, token: Token) -> Option<Token> {
        self.cells.insert(hex, token)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate tokens on board (unordered)
    pub fn tokens(&self) -> impl Iterator<Item = (Hex, Token)> + '_ {
        self.cells.iter().map(|(&hex, &token)| (hex, token))
    }

    /// Cells holding `color`, sorted by `r` then `q`
    pub fn cells_of(&self, color: Color) -> Vec<Hex> {
        let mut cells: Vec<Hex> = self
            .tokens()
            .filter(|(_, token)| token.color == color)
            .map(|(hex, _)| hex)
            .collect();
        cells.sort_unstable();
        cells
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells.values().filter(|t| t.color == color).count()
    }

    /// Sum of token powers for a color
    pub fn total_power(&self, color: Color) -> u32 {
        self.cells
            .values()
            .filter(|t| t.color == color)
            .map(|t| t.power as u32)
            .sum()
    }

    // ========================================================================
    // RULES
    // ========================================================================

    /// True once no Blue tokens remain
    ///
    /// An empty board counts as won: there is nothing left to eliminate.
    pub fn is_won(&self) -> bool {
        self.count(Color::Blue) == 0
    }

    /// Spread the token at `source` along `direction`
    ///
    /// The token steps `power` times, infecting each cell it lands on, and
    /// is then removed from `source`.
    pub fn apply_spread(&mut self, source: Hex, direction: Direction) -> Result<(), BoardError> {
        let token = *self
            .cells
            .get(&source)
            .ok_or(BoardError::MissingToken(source))?;

        let mut current = source;
        for _ in 0..token.power {
            current = current.step(direction);
            self.infect(current, token.color);
        }

        self.cells.remove(&source);
        Ok(())
    }

    /// Apply a recorded action
    pub fn apply(&mut self, action: Action) -> Result<(), BoardError> {
        self.apply_spread(action.source, action.direction)
    }

    /// Land one unit of `color` on a cell
    fn infect(&mut self, hex: Hex, color: Color) {
        let power = self.cells.get(&hex).map_or(1, |t| t.power + 1);
        if power >= MAX_POWER {
            self.cells.remove(&hex);
        } else {
            // Landing overwrites the owner, friend or foe
            self.cells.insert(hex, Token { color, power });
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

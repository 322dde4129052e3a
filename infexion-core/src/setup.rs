//! Board setup - file formats and random generation

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Hex, GRID_SIZE};
use crate::error::BoardError;
use crate::game::{Board, Color, Token, MAX_POWER};

/// One occupied cell as stored in board files
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub r: i32,
    pub q: i32,
    pub color: Color,
    pub power: u8,
}

impl CellRecord {
    fn into_placement(self) -> Result<(Hex, Token), BoardError> {
        if !Hex::in_range(self.r, self.q) {
            return Err(BoardError::OutOfRange { r: self.r, q: self.q });
        }
        Ok((Hex::new(self.r, self.q), Token::new(self.color, self.power)?))
    }
}

impl Board {
    /// Build from file records, validating range, power and uniqueness
    pub fn from_records<I>(records: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = CellRecord>,
    {
        let placements = records
            .into_iter()
            .map(CellRecord::into_placement)
            .collect::<Result<Vec<_>, _>>()?;
        Board::from_tokens(placements)
    }

    /// Records sorted by cell
    pub fn to_records(&self) -> Vec<CellRecord> {
        let mut tokens: Vec<(Hex, Token)> = self.tokens().collect();
        tokens.sort_unstable_by_key(|(hex, _)| *hex);
        tokens
            .into_iter()
            .map(|(hex, token)| CellRecord {
                r: hex.r() as i32,
                q: hex.q() as i32,
                color: token.color(),
                power: token.power(),
            })
            .collect()
    }

    /// Parse `r,q,color,power` lines
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_csv(text: &str) -> Result<Self, BoardError> {
        let mut records = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            records.push(parse_csv_line(line, index + 1)?);
        }

        Board::from_records(records)
    }

    pub fn to_csv(&self) -> String {
        self.to_records()
            .iter()
            .map(|c| format!("{},{},{},{}\n", c.r, c.q, c.color.symbol(), c.power))
            .collect()
    }

    /// Parse a JSON list of cell records
    pub fn from_json(text: &str) -> Result<Self, BoardError> {
        let records: Vec<CellRecord> = serde_json::from_str(text)?;
        Board::from_records(records)
    }

    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string_pretty(&self.to_records())?)
    }

    /// Load from file: `.json` as JSON, anything else as CSV
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let content = std::fs::read_to_string(path)?;
        if is_json(path) {
            Board::from_json(&content)
        } else {
            Board::from_csv(&content)
        }
    }

    /// Save to file in the format implied by its extension
    pub fn save(&self, path: &Path) -> Result<(), BoardError> {
        let content = if is_json(path) {
            self.to_json()?
        } else {
            self.to_csv()
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Random board with between 2 and `max_tokens` tokens
    ///
    /// Always holds at least one token of each color.
    pub fn random<R: Rng>(rng: &mut R, max_tokens: usize) -> Result<Self, BoardError> {
        let max_tokens = max_tokens.clamp(2, (GRID_SIZE as usize).pow(2));
        let count = rng.gen_range(2..=max_tokens);

        let mut cells: Vec<Hex> = Hex::all().collect();
        cells.shuffle(rng);

        let mut records = Vec::with_capacity(count);
        for (i, hex) in cells.into_iter().take(count).enumerate() {
            let color = match i {
                0 => Color::Red,
                1 => Color::Blue,
                _ if rng.gen_bool(0.5) => Color::Red,
                _ => Color::Blue,
            };
            records.push(CellRecord {
                r: hex.r() as i32,
                q: hex.q() as i32,
                color,
                power: rng.gen_range(1..MAX_POWER),
            });
        }
        Board::from_records(records)
    }

    /// The five-token sample board from the Infexion single-player brief
    pub fn sample() -> Result<Self, BoardError> {
        Board::from_records(
            [
                (5, 6, Color::Red, 2),
                (1, 0, Color::Blue, 2),
                (1, 1, Color::Blue, 1),
                (3, 2, Color::Blue, 1),
                (1, 3, Color::Blue, 3),
            ]
            .map(|(r, q, color, power)| CellRecord { r, q, color, power }),
        )
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse_csv_line(line: &str, line_no: usize) -> Result<CellRecord, BoardError> {
    let parse_error = |message: String| BoardError::Parse {
        line: line_no,
        message,
    };

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [r, q, color, power] = fields.as_slice() else {
        return Err(parse_error(format!("expected 4 fields, found {}", fields.len())));
    };

    let r = r
        .parse::<i32>()
        .map_err(|e| parse_error(format!("bad r {:?}: {}", r, e)))?;
    let q = q
        .parse::<i32>()
        .map_err(|e| parse_error(format!("bad q {:?}: {}", q, e)))?;
    let color = Color::from_symbol(color)
        .ok_or_else(|| parse_error(format!("unknown color {:?}", color)))?;
    let power = power
        .parse::<u8>()
        .map_err(|e| parse_error(format!("bad power {:?}: {}", power, e)))?;

    Ok(CellRecord { r, q, color, power })
}

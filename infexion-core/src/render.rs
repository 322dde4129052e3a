//! ASCII hexagon rendering for debugging output

use colored::{ColoredString, Colorize};

use crate::board::{Hex, GRID_SIZE};
use crate::game::{Board, Color};

/// Style text for the terminal: optional bold, red or blue foreground
///
/// Follows `colored`'s terminal detection unless the caller forces it
/// with `colored::control::set_override`.
pub fn apply_ansi(text: &str, bold: bool, color: Option<Color>) -> String {
    let mut styled: ColoredString = text.normal();
    if bold {
        styled = styled.bold();
    }
    styled = match color {
        Some(Color::Red) => styled.red(),
        Some(Color::Blue) => styled.blue(),
        None => styled,
    };
    styled.to_string()
}

/// Render the board as a hexagon of 13 rows
///
/// Row `row`, column `col` shows cell
/// `r = max(6 - row, 0) + col`, `q = max(row - 6, 0) + col`, so the top
/// point is (6, 0) and the bottom point is (0, 6).
pub fn render_board(board: &Board, ansi: bool) -> String {
    let dim = GRID_SIZE as i32;
    let mut output = String::new();

    for row in 0..(dim * 2 - 1) {
        output.push_str(&"    ".repeat((dim - 1 - row).unsigned_abs() as usize));

        for col in 0..(dim - (row - (dim - 1)).abs()) {
            let r = (dim - 1 - row).max(0) + col;
            let q = (row - (dim - 1)).max(0) + col;

            match board.get(Hex::new(r, q)) {
                Some(token) => {
                    let text = format!(" {}{} ", token.color().symbol(), token.power());
                    if ansi {
                        output.push_str(&apply_ansi(&text, false, Some(token.color())));
                    } else {
                        output.push_str(&text);
                    }
                }
                None => output.push_str(" .. "),
            }
            output.push_str("    ");
        }
        output.push('\n');
    }

    output
}

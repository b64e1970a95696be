use serde::{Deserialize, Serialize};

/// A single source position: 1-indexed line and column.
///
/// Columns count *display cells*, not bytes or code points — see
/// [`crate::width`]. `\t` is treated as advancing 4 columns and `\n`
/// resets the column to 1 and increments the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Advance past one consumed character, per the tab/newline rules above.
    pub fn advance(self, c: char) -> Self {
        match c {
            '\n' => Self { line: self.line + 1, column: 1 },
            '\t' => Self { line: self.line, column: self.column + 4 },
            _ => Self { line: self.line, column: self.column + 1 },
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_resets_column_and_bumps_line() {
        let p = Pos::start().advance('\n');
        assert_eq!(p, Pos { line: 2, column: 1 });
    }

    #[test]
    fn tab_advances_four_columns() {
        let p = Pos::start().advance('\t');
        assert_eq!(p, Pos { line: 1, column: 5 });
    }

    #[test]
    fn ordinary_char_advances_one_column() {
        let p = Pos::start().advance('x');
        assert_eq!(p, Pos { line: 1, column: 2 });
    }

    #[test]
    fn ordering_is_line_then_column() {
        let a = Pos { line: 1, column: 9 };
        let b = Pos { line: 2, column: 1 };
        assert!(a < b);
    }
}

use std::io::{self, BufRead, Write};

use super::MoveProvider;
use crate::error::ProviderError;
use crate::game::Board;

/// Prompts a person for the opponent's move.
///
/// Shows the board with a column header (gravity) or a cell-number legend,
/// then asks until it reads a number in range. A blank line or end of input
/// gives up with [`ProviderError::Aborted`].
pub struct HumanProvider<R, W> {
    input: R,
    output: W,
}

impl HumanProvider<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        HumanProvider::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        HumanProvider { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn show_board(&mut self, board: &Board) -> io::Result<()> {
        let geometry = *board.geometry();
        if geometry.gravity {
            let header: Vec<String> = (0..geometry.width).map(|c| c.to_string()).collect();
            writeln!(self.output, "{}", header.join(" "))?;
            writeln!(self.output, "{board}")?;
        } else {
            // Board rows on the left, cell numbers on the right
            let rendered = board.to_string();
            for (row, line) in rendered.lines().enumerate() {
                let legend: Vec<String> = (0..geometry.width)
                    .map(|col| geometry.index(row, col).to_string())
                    .collect();
                writeln!(self.output, "{line}   {}", legend.join(" "))?;
            }
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> MoveProvider for HumanProvider<R, W> {
    fn propose(&mut self, board: &Board) -> Result<usize, ProviderError> {
        let geometry = *board.geometry();
        let limit = geometry.action_count();
        let what = if geometry.gravity { "column" } else { "cell" };

        self.show_board(board)?;
        loop {
            write!(self.output, "Which {what} (0-{})? ", limit - 1)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(ProviderError::Aborted);
            }
            let line = line.trim();
            if line.is_empty() {
                return Err(ProviderError::Aborted);
            }
            match line.parse::<usize>() {
                Ok(action) if action < limit => return Ok(action),
                _ => writeln!(self.output, "'{line}' is not a {what} number")?,
            }
        }
    }

    fn name(&self) -> &str {
        "Human"
    }
}

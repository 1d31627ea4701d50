use std::io::{self, Write};

use anyhow::Result;
use crossterm::style::{
    Attribute, Color, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, execute, queue, terminal};
use sweeper_core::{column_label, Cell, Round, MINE};

/// Width of the row-number gutter, sized for the 100-row maximum.
const NUM_WIDTH: usize = 3;

/// 256-color palette for revealed counts 0-8: `(background, foreground)`.
const VALUE_COLORS: [(u8, Option<u8>); 9] = [
    (240, None),
    (88, Some(202)),
    (130, Some(214)),
    (136, Some(220)),
    (64, Some(148)),
    (22, Some(40)),
    (24, Some(75)),
    (18, Some(63)),
    (53, Some(165)),
];

pub struct Screen {
    out: io::Stdout,
}

impl Screen {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Clears the screen and draws the whole board, column labels above
    /// and below, 1-based row numbers on both sides.
    pub fn draw(&mut self, round: &Round) -> Result<()> {
        self.clear()?;
        let (rows, cols) = round.size();

        writeln!(self.out)?;
        self.column_header(cols)?;
        for row in 0..rows {
            write!(self.out, "{:>NUM_WIDTH$} ", row + 1)?;
            for col in 0..cols {
                self.cell(round.cell((row, col)))?;
            }
            writeln!(self.out, "{:>NUM_WIDTH$}", row + 1)?;
        }
        self.column_header(cols)?;
        self.out.flush()?;
        Ok(())
    }

    fn column_header(&mut self, cols: u8) -> Result<()> {
        write!(self.out, "{:NUM_WIDTH$} ", "")?;
        for col in 0..cols {
            let label = column_label(u32::from(col) + 1);
            write!(self.out, "{label:^NUM_WIDTH$}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn cell(&mut self, cell: Cell) -> Result<()> {
        match cell {
            Cell::Hidden => self.paint("   ", Color::AnsiValue(235), None),
            Cell::Flagged => self.paint(" F ", Color::AnsiValue(250), Some(Color::AnsiValue(236))),
            Cell::Revealed(MINE) => {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
                self.paint(" M ", Color::AnsiValue(215), Some(Color::DarkRed))
            }
            Cell::Revealed(count) => {
                let (bg, fg) = VALUE_COLORS[count as usize];
                let text = format!(" {count} ");
                self.paint(&text, Color::AnsiValue(bg), fg.map(Color::AnsiValue))
            }
        }
    }

    fn paint(&mut self, text: &str, bg: Color, fg: Option<Color>) -> Result<()> {
        queue!(self.out, SetBackgroundColor(bg))?;
        if let Some(fg) = fg {
            queue!(self.out, SetForegroundColor(fg))?;
        }
        write!(self.out, "{text}")?;
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

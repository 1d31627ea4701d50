use alloc::string::String;

use crate::*;

/// Builds the spreadsheet-style label for a 1-based column number:
/// 1 -> "A", 26 -> "Z", 27 -> "AA". Base 26 with no zero digit, so `n`
/// must be at least 1.
pub fn column_label(n: u32) -> String {
    debug_assert!(n >= 1, "column numbers start at 1");
    let mut n = n;
    let mut label = String::new();
    while n > 0 {
        let digit = ((n - 1) % 26) as u8;
        label.insert(0, (b'A' + digit) as char);
        n = (n - 1) / 26;
    }
    label
}

/// Decodes a column label back to its 0-based index: "A" -> 0,
/// "Z" -> 25, "AA" -> 26. Case-insensitive. `None` when `label` is
/// empty, holds anything but ASCII letters, or overflows.
pub fn parse_column(label: &str) -> Option<u32> {
    if label.is_empty() {
        return None;
    }
    let mut value: u32 = 0;
    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(c.to_ascii_uppercase() as u8 - b'A' + 1);
        value = value.checked_mul(26)?.checked_add(digit)?;
    }
    Some(value - 1)
}

/// One line of player input, decoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Restart,
    Help,
    Move { pos: Coord2, flag: bool },
}

/// Parses one line of the move prompt against a `(rows, columns)` board
/// size. Grammar: single-letter `q`/`r`/`h` control commands or
/// `<letters><digits>[f]`, all case-insensitive. The trailing `f` turns
/// the move into a flag toggle.
pub fn parse_command(text: &str, size: Coord2) -> core::result::Result<Command, ParseError> {
    let text = text.trim();
    match text {
        "q" | "Q" => return Ok(Command::Quit),
        "r" | "R" => return Ok(Command::Restart),
        "h" | "H" => return Ok(Command::Help),
        _ => {}
    }

    let digits_start = text
        .find(|c: char| !c.is_ascii_alphabetic())
        .ok_or(ParseError::Invalid)?;
    if digits_start == 0 {
        return Err(ParseError::Invalid);
    }
    let (letters, rest) = text.split_at(digits_start);

    let digits_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_len == 0 {
        return Err(ParseError::Invalid);
    }
    let (digits, suffix) = rest.split_at(digits_len);

    let flag = match suffix {
        "" => false,
        "f" | "F" => true,
        _ => return Err(ParseError::Invalid),
    };

    // letters are known to be alphabetic here, so the only failure left
    // in either conversion is a value too large for the board
    let col = parse_column(letters).ok_or(ParseError::OutOfRange)?;
    let row = digits
        .parse::<u32>()
        .map_err(|_| ParseError::OutOfRange)?
        .checked_sub(1)
        .ok_or(ParseError::OutOfRange)?;

    if row >= u32::from(size.0) || col >= u32::from(size.1) {
        return Err(ParseError::OutOfRange);
    }

    Ok(Command::Move {
        pos: (row as Coord, col as Coord),
        flag,
    })
}

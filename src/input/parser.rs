//! Validation of textual input lines
//!
//! Each parser checks its line in a fixed order and stops at the first
//! failure: token count, symbol, integer syntax, then sign.

use crate::components::{Emitter, EmitterSymbol, Mirror, MirrorSymbol, Receiver, ReceiverSymbol};
use crate::core::error::ParseError;
use crate::core::types::{BoardSize, Direction, Position};

/// A validated pulse-sequence line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseDirective {
    pub symbol: EmitterSymbol,
    pub frequency: u32,
    pub direction: Direction,
}

fn tokens<'a, const N: usize>(line: &'a str, usage: &'static str) -> Result<[&'a str; N], ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    parts.try_into().map_err(|_| ParseError::Usage(usage))
}

fn integer(token: &str, name: &'static str) -> Result<i64, ParseError> {
    token.parse::<i64>().map_err(|_| ParseError::NotInteger(name))
}

/// Integer that must be strictly positive and fit the board's coordinate type
pub(crate) fn positive(value: i64, name: &'static str) -> Result<u32, ParseError> {
    if value <= 0 {
        return Err(ParseError::NotPositive(name));
    }
    u32::try_from(value).map_err(|_| ParseError::NotInteger(name))
}

pub(crate) fn non_negative(value: i64, name: &'static str) -> Result<u32, ParseError> {
    if value < 0 {
        return Err(ParseError::Negative(name));
    }
    u32::try_from(value).map_err(|_| ParseError::NotInteger(name))
}

/// Shared tail of the component parsers: `x` and `y` tokens
fn coordinates(x: &str, y: &str) -> Result<Position, ParseError> {
    let x = integer(x, "x")?;
    let y = integer(y, "y")?;
    let x = non_negative(x, "x")?;
    let y = non_negative(y, "y")?;
    Ok(Position::new(x, y))
}

/// `<width> <height>`
pub fn parse_size(line: &str) -> Result<BoardSize, ParseError> {
    let [width, height] = tokens(line, "<width> <height>")?;
    let width = integer(width, "width")?;
    let height = integer(height, "height")?;
    let width = positive(width, "width")?;
    let height = positive(height, "height")?;
    BoardSize::new(width, height).ok_or(ParseError::NotPositive("width"))
}

/// `<symbol> <x> <y>` with symbol `A`-`J`
pub fn parse_emitter(line: &str) -> Result<Emitter, ParseError> {
    let [symbol, x, y] = tokens(line, "<symbol> <x> <y>")?;
    let symbol = EmitterSymbol::parse(symbol).ok_or(ParseError::EmitterSymbol)?;
    Ok(Emitter::new(symbol, coordinates(x, y)?))
}

/// `<symbol> <x> <y>` with symbol `R0`-`R9`
pub fn parse_receiver(line: &str) -> Result<Receiver, ParseError> {
    let [symbol, x, y] = tokens(line, "<symbol> <x> <y>")?;
    let symbol = ReceiverSymbol::parse(symbol).ok_or(ParseError::ReceiverSymbol)?;
    Ok(Receiver::new(symbol, coordinates(x, y)?))
}

/// `<symbol> <x> <y>` with symbol one of `/ \ > < ^ v`
pub fn parse_mirror(line: &str) -> Result<Mirror, ParseError> {
    let [symbol, x, y] = tokens(line, "<symbol> <x> <y>")?;
    let symbol = MirrorSymbol::parse(symbol).ok_or(ParseError::MirrorSymbol)?;
    Ok(Mirror::new(symbol, coordinates(x, y)?))
}

/// `<symbol> <frequency> <direction>`
pub fn parse_pulse_sequence(line: &str) -> Result<PulseDirective, ParseError> {
    let [symbol, frequency, direction] = tokens(line, "<symbol> <frequency> <direction>")?;
    let symbol = EmitterSymbol::parse(symbol).ok_or(ParseError::EmitterSymbol)?;
    let frequency = positive(integer(frequency, "frequency")?, "frequency")?;
    let direction = Direction::from_letter(direction).ok_or(ParseError::Direction)?;
    Ok(PulseDirective { symbol, frequency, direction })
}

use serde::Serialize;

use crate::alphabet::{self, SEPARATOR};
use crate::diagnostics::Fault;
use crate::output::OutputSink;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Vec2 {
    pub x: i64,
    pub y: i64,
}

impl Vec2 {
    pub const EAST: Vec2 = Vec2::new(1, 0);
    pub const WEST: Vec2 = Vec2::new(-1, 0);
    pub const SOUTH: Vec2 = Vec2::new(0, 1);
    pub const NORTH: Vec2 = Vec2::new(0, -1);
    pub const ZERO: Vec2 = Vec2::new(0, 0);

    pub const fn new(x: i64, y: i64) -> Self {
        Vec2 { x, y }
    }
}

/// Direction changes a pointer can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Swaps the velocity components. Same transform as `Minus90`.
    Plus90,
    /// Swaps the velocity components. Same transform as `Plus90`.
    Minus90,
    Half,
    /// Quarter turn clockwise on screen (y grows downwards).
    RotateRight,
}

/// Initial `(velocity, wrap_bias)` for a start glyph.
pub fn start_heading(symbol: char) -> Option<(Vec2, Vec2)> {
    match symbol {
        'ᛌ' => Some((Vec2::EAST, Vec2::ZERO)),
        'ᛍ' => Some((Vec2::SOUTH, Vec2::ZERO)),
        'ᛊ' => Some((Vec2::EAST, Vec2::new(0, 1))),
        'ᛋ' => Some((Vec2::SOUTH, Vec2::new(1, 0))),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pointer {
    pub id: usize,
    pub x: i64,
    pub y: i64,
    origin: (i64, i64),
    pub symbol: char,
    pub velocity: Vec2,
    pub wrap_bias: Vec2,
    pub value: Option<i64>,
}

impl Pointer {
    /// Returns `None` when `symbol` is not a start glyph.
    pub fn spawn(id: usize, x: i64, y: i64, symbol: char) -> Option<Self> {
        let (velocity, wrap_bias) = start_heading(symbol)?;
        Some(Pointer {
            id,
            x,
            y,
            origin: (x, y),
            symbol,
            velocity,
            wrap_bias,
            value: Some(0),
        })
    }

    pub fn origin(&self) -> (i64, i64) {
        self.origin
    }

    pub fn pos(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    /// Moves by the velocity without wrapping and returns the raw position.
    pub fn advance(&mut self) -> (i64, i64) {
        self.x += self.velocity.x;
        self.y += self.velocity.y;
        self.pos()
    }

    pub fn turn(&mut self, turn: Turn) {
        let Vec2 { x, y } = self.velocity;
        self.velocity = match turn {
            Turn::Plus90 | Turn::Minus90 => Vec2::new(y, x),
            Turn::Half => Vec2::new(-x, -y),
            Turn::RotateRight => Vec2::new(-y, x),
        };
    }

    pub fn face(&mut self, heading: Vec2) {
        self.velocity = heading;
    }

    pub fn is_truthy(&self) -> bool {
        matches!(self.value, Some(v) if v != 0)
    }

    pub fn register(&self) -> Result<i64, Fault> {
        self.value.ok_or(Fault::UninitializedRegister)
    }

    pub fn output_glyph(&self) -> Result<char, Fault> {
        match self.value {
            None => Ok(SEPARATOR),
            Some(v) => alphabet::numeral(v).ok_or(Fault::OutputIndex(v)),
        }
    }

    pub fn output(&self, sink: &mut dyn OutputSink) -> Result<(), Fault> {
        let glyph = self.output_glyph()?;
        sink.emit(glyph)?;
        Ok(())
    }
}

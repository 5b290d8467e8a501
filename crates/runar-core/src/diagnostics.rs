use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Phase {
    Load,
    Run,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ErrorCode {
    EmptySource,
    UnknownDiacritic,
    StackUnderflow,
    UninitializedRegisterUse,
    OutputIndexOutOfRange,
    DivideByZero,
    ArithmeticOverflow,
    OutputWrite,
    TickBudgetExhausted,
    GridIndexOutOfBounds,
}

impl ErrorCode {
    pub fn code_str(self) -> &'static str {
        match self {
            ErrorCode::EmptySource => "RNR0001",
            ErrorCode::UnknownDiacritic => "RNR0002",
            ErrorCode::StackUnderflow => "RNR0101",
            ErrorCode::UninitializedRegisterUse => "RNR0102",
            ErrorCode::OutputIndexOutOfRange => "RNR0103",
            ErrorCode::DivideByZero => "RNR0104",
            ErrorCode::ArithmeticOverflow => "RNR0105",
            ErrorCode::OutputWrite => "RNR0106",
            ErrorCode::TickBudgetExhausted => "RNR0107",
            ErrorCode::GridIndexOutOfBounds => "RNR0901",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            ErrorCode::EmptySource => "source contains no rows",
            ErrorCode::UnknownDiacritic => "unknown pentimal diacritic",
            ErrorCode::StackUnderflow => "pop from empty stack",
            ErrorCode::UninitializedRegisterUse => "register is unset",
            ErrorCode::OutputIndexOutOfRange => "register value has no output glyph",
            ErrorCode::DivideByZero => "division by zero",
            ErrorCode::ArithmeticOverflow => "arithmetic overflow",
            ErrorCode::OutputWrite => "failed to write program output",
            ErrorCode::TickBudgetExhausted => "tick budget exhausted before halt",
            ErrorCode::GridIndexOutOfBounds => "pointer left the grid",
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            ErrorCode::EmptySource | ErrorCode::UnknownDiacritic => Phase::Load,
            ErrorCode::GridIndexOutOfBounds => Phase::Internal,
            _ => Phase::Run,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code_str())
    }
}

/// A runtime failure before it is pinned to the pointer that caused it.
#[derive(Debug)]
pub enum Fault {
    StackUnderflow,
    UninitializedRegister,
    OutputIndex(i64),
    DivideByZero,
    Overflow,
    OutputWrite(std::io::Error),
}

impl Fault {
    pub fn code(&self) -> ErrorCode {
        match self {
            Fault::StackUnderflow => ErrorCode::StackUnderflow,
            Fault::UninitializedRegister => ErrorCode::UninitializedRegisterUse,
            Fault::OutputIndex(_) => ErrorCode::OutputIndexOutOfRange,
            Fault::DivideByZero => ErrorCode::DivideByZero,
            Fault::Overflow => ErrorCode::ArithmeticOverflow,
            Fault::OutputWrite(_) => ErrorCode::OutputWrite,
        }
    }

    fn message(&self) -> String {
        match self {
            Fault::OutputIndex(v) => format!("{} ({v})", self.code().default_message()),
            Fault::OutputWrite(err) => format!("{}: {err}", self.code().default_message()),
            _ => self.code().default_message().to_string(),
        }
    }
}

impl From<std::io::Error> for Fault {
    fn from(err: std::io::Error) -> Self {
        Fault::OutputWrite(err)
    }
}

/// Where a runtime error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Site {
    pub pointer: usize,
    pub x: i64,
    pub y: i64,
    pub glyph: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub code: ErrorCode,
    /// 1-based source line; 0 when the error concerns the whole source.
    pub line: usize,
    /// 1-based glyph column (grapheme clusters, not bytes).
    pub column: usize,
    pub found: Option<char>,
}

impl LoadError {
    pub fn empty_source() -> Self {
        LoadError {
            code: ErrorCode::EmptySource,
            line: 0,
            column: 0,
            found: None,
        }
    }

    pub fn unknown_diacritic(line: usize, column: usize, found: char) -> Self {
        LoadError {
            code: ErrorCode::UnknownDiacritic,
            line,
            column,
            found: Some(found),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.code.default_message())?;
        if let Some(c) = self.found {
            write!(f, " U+{:04X}", c as u32)?;
        }
        if self.line > 0 {
            write!(f, " at line {} column {}", self.line, self.column)?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    pub code: ErrorCode,
    pub message: String,
    pub site: Option<Site>,
    /// 1-based tick in which the error happened.
    pub tick: u64,
}

impl RunError {
    pub fn from_fault(fault: Fault, site: Site, tick: u64) -> Self {
        RunError {
            code: fault.code(),
            message: fault.message(),
            site: Some(site),
            tick,
        }
    }

    pub fn off_grid(site: Site, tick: u64) -> Self {
        RunError {
            code: ErrorCode::GridIndexOutOfBounds,
            message: ErrorCode::GridIndexOutOfBounds.default_message().to_string(),
            site: Some(site),
            tick,
        }
    }

    pub fn budget_exhausted(ticks: u64) -> Self {
        RunError {
            code: ErrorCode::TickBudgetExhausted,
            message: format!(
                "{} ({ticks} ticks)",
                ErrorCode::TickBudgetExhausted.default_message()
            ),
            site: None,
            tick: ticks,
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.message)?;
        if let Some(site) = &self.site {
            write!(f, ": pointer {} at ({}, {})", site.pointer, site.x, site.y)?;
            if let Some(glyph) = site.glyph {
                write!(f, " on {glyph:?}")?;
            }
        }
        write!(f, ", tick {}", self.tick)
    }
}

impl std::error::Error for RunError {}

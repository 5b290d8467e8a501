use crate::alphabet;
use crate::diagnostics::Fault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Digit(i64),
    Clear,
    End,
    Output,
    Push,
    Reverse,
    TurnA,
    TurnB,
    RotateRight,
    FaceEast,
    FaceWest,
    Subtract,
    Add,
    Divide,
    Multiply,
    ConditionalReverse,
    Nop,
}

impl Instruction {
    pub fn decode(glyph: char) -> Self {
        if let Some(d) = alphabet::hex_digit(glyph) {
            return Instruction::Digit(d);
        }
        match glyph {
            'ᚹ' => Instruction::Clear,
            'ᛧ' => Instruction::End,
            'ᚭ' => Instruction::Output,
            'ᛙ' => Instruction::Push,
            'ᛁ' => Instruction::Reverse,
            'ᛚ' => Instruction::TurnA,
            'ᛐ' => Instruction::TurnB,
            'ᚿ' => Instruction::RotateRight,
            'ᚱ' => Instruction::FaceEast,
            'ᚢ' => Instruction::FaceWest,
            'ᚷ' => Instruction::Subtract,
            'ᛟ' => Instruction::Add,
            'ᚴ' => Instruction::Divide,
            'ᚠ' => Instruction::Multiply,
            'ᚦ' => Instruction::ConditionalReverse,
            _ => Instruction::Nop,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Instruction::Digit(_) => "digit",
            Instruction::Clear => "clear",
            Instruction::End => "end",
            Instruction::Output => "output",
            Instruction::Push => "push",
            Instruction::Reverse => "reverse",
            Instruction::TurnA => "turn+90",
            Instruction::TurnB => "turn-90",
            Instruction::RotateRight => "rotate-right",
            Instruction::FaceEast => "face-east",
            Instruction::FaceWest => "face-west",
            Instruction::Subtract => "sub",
            Instruction::Add => "add",
            Instruction::Divide => "div",
            Instruction::Multiply => "mul",
            Instruction::ConditionalReverse => "reverse-if",
            Instruction::Nop => "nop",
        }
    }
}

fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

/// `((value + 1) / (divisor + 1)) - 1` with floor division.
pub fn biased_divide(value: i64, divisor: i64) -> Result<i64, Fault> {
    let num = value.checked_add(1).ok_or(Fault::Overflow)?;
    let den = divisor.checked_add(1).ok_or(Fault::Overflow)?;
    if den == 0 {
        return Err(Fault::DivideByZero);
    }
    floor_div(num, den)
        .and_then(|q| q.checked_sub(1))
        .ok_or(Fault::Overflow)
}

/// `(value + 1) * (factor + 1) - 1`
pub fn biased_multiply(value: i64, factor: i64) -> Result<i64, Fault> {
    value
        .checked_add(1)
        .zip(factor.checked_add(1))
        .and_then(|(a, b)| a.checked_mul(b))
        .and_then(|p| p.checked_sub(1))
        .ok_or(Fault::Overflow)
}

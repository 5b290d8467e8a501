//! Round-robin execution of every pointer over a shared stack.
//!
//! One tick runs each pointer's current cell once, in creation order. An `end`
//! cell stops the run only after the rest of that tick has executed.

use tracing::{debug, enabled, info, Level};

use crate::alphabet;
use crate::diagnostics::{Fault, RunError, Site};
use crate::grid::{Grid, Program};
use crate::instruction::{self, Instruction};
use crate::output::OutputSink;
use crate::pointer::{Pointer, Turn, Vec2};
use crate::stack::SharedStack;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Fail with `TickBudgetExhausted` after this many ticks. `None` runs until `end`.
    pub max_ticks: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub ticks: u64,
    pub halted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Halt,
}

pub struct Scheduler<S: OutputSink> {
    grid: Grid,
    pointers: Vec<Pointer>,
    stack: SharedStack,
    sink: S,
    config: RunConfig,
    ticks: u64,
    halted: bool,
}

impl<S: OutputSink> Scheduler<S> {
    pub fn new(program: Program, sink: S, config: RunConfig) -> Self {
        Scheduler {
            grid: program.grid,
            pointers: program.pointers,
            stack: SharedStack::default(),
            sink,
            config,
            ticks: 0,
            halted: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    pub fn stack(&self) -> &SharedStack {
        &self.stack
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Runs ticks until a pointer executes `end`.
    pub fn run(&mut self) -> Result<RunOutcome, RunError> {
        info!(pointers = self.pointers.len(), "run start");
        while !self.halted {
            if let Some(limit) = self.config.max_ticks {
                if self.ticks >= limit {
                    return Err(RunError::budget_exhausted(self.ticks));
                }
            }
            self.tick()?;
        }
        info!(ticks = self.ticks, "halted");
        Ok(RunOutcome {
            ticks: self.ticks,
            halted: true,
        })
    }

    /// Executes one pass over all pointers. Returns whether the run has halted.
    pub fn tick(&mut self) -> Result<bool, RunError> {
        let tick = self.ticks + 1;
        for p in self.pointers.iter_mut() {
            let glyph = self.grid.cell(p.x, p.y);
            let site = Site {
                pointer: p.id,
                x: p.x,
                y: p.y,
                glyph,
            };
            let Some(glyph) = glyph else {
                return Err(RunError::off_grid(site, tick));
            };

            let op = Instruction::decode(glyph);
            debug!(
                pointer = p.id,
                x = p.x,
                y = p.y,
                %glyph,
                op = op.mnemonic(),
                "command"
            );
            let flow = execute(op, p, &mut self.stack, &mut self.sink)
                .map_err(|fault| RunError::from_fault(fault, site, tick))?;
            if flow == Flow::Halt {
                self.halted = true;
            }

            let (x, y) = p.advance();
            let Some((x, y)) = self.grid.wrap(x, y, p.wrap_bias) else {
                return Err(RunError::off_grid(
                    Site {
                        pointer: p.id,
                        x,
                        y,
                        glyph: None,
                    },
                    tick,
                ));
            };
            p.x = x;
            p.y = y;
        }
        self.ticks = tick;

        if enabled!(Level::DEBUG) {
            let registers: String = self
                .pointers
                .iter()
                .map(|p| alphabet::register_glyph(p.value))
                .collect();
            debug!(tick, %registers, stack_top = ?self.stack.peek(), "pointer vars");
        }
        Ok(self.halted)
    }
}

/// Applies one instruction to `p`.
pub(crate) fn execute(
    op: Instruction,
    p: &mut Pointer,
    stack: &mut SharedStack,
    sink: &mut dyn OutputSink,
) -> Result<Flow, Fault> {
    match op {
        Instruction::Digit(d) => p.value = Some(d),
        Instruction::Clear => p.value = None,
        Instruction::End => return Ok(Flow::Halt),
        Instruction::Output => p.output(sink)?,
        Instruction::Push => stack.push(Some(p.register()?)),
        Instruction::Reverse => p.turn(Turn::Half),
        Instruction::TurnA => p.turn(Turn::Plus90),
        Instruction::TurnB => p.turn(Turn::Minus90),
        Instruction::RotateRight => p.turn(Turn::RotateRight),
        Instruction::FaceEast => p.face(Vec2::EAST),
        Instruction::FaceWest => p.face(Vec2::WEST),
        Instruction::Subtract => {
            let v = p.register()?;
            let rhs = stack.pop_operand()?;
            p.value = Some(v.checked_sub(rhs).ok_or(Fault::Overflow)?);
        }
        Instruction::Add => {
            let v = p.register()?;
            let rhs = stack.pop_operand()?;
            p.value = Some(v.checked_add(rhs).ok_or(Fault::Overflow)?);
        }
        Instruction::Divide => {
            let v = p.register()?;
            let rhs = stack.pop_operand()?;
            p.value = Some(instruction::biased_divide(v, rhs)?);
        }
        Instruction::Multiply => {
            let v = p.register()?;
            let rhs = stack.pop_operand()?;
            p.value = Some(instruction::biased_multiply(v, rhs)?);
        }
        Instruction::ConditionalReverse => {
            if p.is_truthy() {
                p.turn(Turn::Half);
            }
        }
        Instruction::Nop => {}
    }
    Ok(Flow::Continue)
}

//! Execution engine for ᚱᚢᚾᛅᛦ, a two-dimensional language written in runes.
//!
//! Source lines are decoded into a [`grid::Grid`] of single-character cells
//! (pentimal numerals collapse to hex digits). Every start glyph in the grid
//! seeds a [`pointer::Pointer`]; the [`scheduler::Scheduler`] then walks all
//! pointers in lockstep over one shared stack until one of them reaches an
//! `end` cell.
//!
//! ```
//! use runar_core::{grid, output::Transcript, scheduler::{RunConfig, Scheduler}};
//!
//! let program = grid::load("ᛌ1ᚭᛧ").unwrap();
//! let mut sched = Scheduler::new(program, Transcript::default(), RunConfig::default());
//! sched.run().unwrap();
//! assert_eq!(sched.sink().as_str(), "ᚢ");
//! ```

pub mod alphabet;
pub mod diagnostics;
pub mod grid;
pub mod instruction;
pub mod output;
pub mod pentimal;
pub mod pointer;
pub mod report;
pub mod scheduler;
pub mod stack;

pub use diagnostics::{ErrorCode, LoadError, RunError};
pub use grid::{load, Grid, Program};
pub use scheduler::{RunConfig, RunOutcome, Scheduler};

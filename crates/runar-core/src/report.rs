use serde::Serialize;

use runar_contracts::RUNAR_RUN_REPORT_SCHEMA_VERSION;

use crate::diagnostics::{LoadError, Phase, RunError, Site};
use crate::output::OutputSink;
use crate::pointer::Pointer;
use crate::scheduler::{RunOutcome, Scheduler};

#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub phase: Phase,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick: Option<u64>,
}

impl From<&RunError> for ErrorReport {
    fn from(err: &RunError) -> Self {
        ErrorReport {
            code: err.code.code_str(),
            phase: err.code.phase(),
            message: err.message.clone(),
            site: err.site,
            line: None,
            column: None,
            tick: Some(err.tick),
        }
    }
}

impl From<&LoadError> for ErrorReport {
    fn from(err: &LoadError) -> Self {
        ErrorReport {
            code: err.code.code_str(),
            phase: err.code.phase(),
            message: err.to_string(),
            site: None,
            line: (err.line > 0).then_some(err.line),
            column: (err.line > 0).then_some(err.column),
            tick: None,
        }
    }
}

/// Machine-readable summary of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub schema_version: &'static str,
    pub ok: bool,
    pub halted: bool,
    pub ticks: u64,
    pub output: String,
    pub grid: Vec<String>,
    pub pointers: Vec<Pointer>,
    /// Bottom to top.
    pub stack: Vec<Option<i64>>,
    pub error: Option<ErrorReport>,
}

impl RunReport {
    pub fn from_run<S: OutputSink>(
        sched: &Scheduler<S>,
        result: &Result<RunOutcome, RunError>,
    ) -> Self {
        RunReport {
            schema_version: RUNAR_RUN_REPORT_SCHEMA_VERSION,
            ok: result.is_ok(),
            halted: sched.is_halted(),
            ticks: sched.ticks(),
            output: sched.sink().transcript().to_string(),
            grid: sched.grid().render(),
            pointers: sched.pointers().to_vec(),
            stack: sched.stack().as_slice().to_vec(),
            error: result.as_ref().err().map(ErrorReport::from),
        }
    }

    pub fn load_failed(err: &LoadError) -> Self {
        RunReport {
            schema_version: RUNAR_RUN_REPORT_SCHEMA_VERSION,
            ok: false,
            halted: false,
            ticks: 0,
            output: String::new(),
            grid: Vec::new(),
            pointers: Vec::new(),
            stack: Vec::new(),
            error: Some(ErrorReport::from(err)),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = serde_json::to_vec_pretty(self)?;
        out.push(b'\n');
        Ok(out)
    }
}

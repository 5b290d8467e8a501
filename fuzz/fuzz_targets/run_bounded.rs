#![no_main]

use libfuzzer_sys::fuzz_target;
use runar_core::output::Transcript;
use runar_core::{ErrorCode, RunConfig, Scheduler};

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 4 * 1024 {
        &data[..4 * 1024]
    } else {
        data
    };

    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(program) = runar_core::load(src) else {
        return;
    };

    let config = RunConfig {
        max_ticks: Some(10_000),
    };
    let mut sched = Scheduler::new(program, Transcript::default(), config);
    if let Err(err) = sched.run() {
        // Empty rows can strand a pointer; anything else off-grid is a wrap bug.
        if err.code == ErrorCode::GridIndexOutOfBounds {
            let grid = sched.grid();
            assert!((0..grid.row_count()).any(|y| grid.row_len(y) == 0));
        }
    }
});

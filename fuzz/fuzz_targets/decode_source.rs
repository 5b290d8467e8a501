#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 64 * 1024 {
        &data[..64 * 1024]
    } else {
        data
    };

    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(grid) = runar_core::Grid::parse(src) {
        let rows = grid.render();
        assert_eq!(rows.len(), grid.row_count());
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), grid.row_len(y));
        }
    }
});

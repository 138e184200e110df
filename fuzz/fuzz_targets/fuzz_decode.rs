#![no_main]

use libfuzzer_sys::fuzz_target;
use tinyvt::{Extent, Terminal};

fuzz_target!(|data: &[u8]| {
    let Ok(mut term) = Terminal::new(Extent::new(132, 80)) else {
        return;
    };

    // Feed in two halves so resumption is exercised as well
    let (head, tail) = data.split_at(data.len() / 2);
    term.process_bytes(head);
    term.process_bytes(tail);

    let size = term.size();
    assert!(size.contains(term.cursor().pos));
    assert!((0..size.height).contains(&term.screen().changed_scroll()));
    for row in 0..size.height as usize {
        assert_eq!(
            term.screen().get_line(row).map(<[_]>::len),
            Some(size.width as usize)
        );
    }
});

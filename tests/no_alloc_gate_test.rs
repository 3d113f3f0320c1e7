use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use quadfall::core::{GameSession, GameSnapshot};
use quadfall::types::Direction;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

fn play(session: &mut GameSession, steps: u32) {
    for i in 0..steps {
        if i % 4 == 0 {
            session.request_rotate();
        }
        if i % 9 == 0 {
            session.request_direction(Direction::from_index(i / 9));
            session.end_input_interval();
        }
        session.tick_with(|_| {});
        if session.is_game_over() {
            session.reset(i);
        }
    }
}

#[test]
fn session_hot_paths_do_not_allocate() {
    // Setup and warm-up outside counting so one-time costs don't trip the gate.
    let mut session = GameSession::new(1);
    let mut snap = GameSnapshot::default();
    play(&mut session, 2_000);

    let allocs = with_alloc_counting(|| {
        play(&mut session, 2_000);
        session.snapshot_into(&mut snap);
        let _ = session.snapshot_board();
        let _ = session.take_last_event();
    });

    assert_eq!(allocs, 0);
}

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_stacker::core::{CellCanvas, EngineConfig, EngineSnapshot, HeadlessEngine, ManualScheduler};
use tui_stacker::term::{FrameBuffer, GameView, HudView, Viewport};
use tui_stacker::types::Command;

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

// Both gates live in one test so the global counter is never shared between threads.
#[test]
fn engine_tick_and_view_render_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let config = EngineConfig {
        seed: Some(1),
        ..EngineConfig::default()
    };
    let mut engine =
        HeadlessEngine::new(config, ManualScheduler::new()).with_renderer(CellCanvas::new());
    engine.start();

    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = EngineSnapshot::default();

    let mut now = 0u64;
    let mut frame = |engine: &mut HeadlessEngine, now: u64| {
        if let Some(handle) = engine.scheduler_mut().take_pending() {
            engine.on_tick(handle, now);
        }
        engine.snapshot_into(&mut snap);
        if let Some(canvas) = engine.renderer() {
            view.render_into(canvas, &HudView::from(&snap), viewport, &mut fb);
        }
    };

    // Warm-up: first paint sizes the canvas.
    frame(&mut engine, now);

    let allocs = with_alloc_counting(|| {
        for i in 0..200 {
            now += 16;
            match i % 7 {
                0 => {
                    engine.apply(Command::MoveLeft);
                }
                2 => {
                    engine.apply(Command::MoveRight);
                }
                3 => {
                    engine.apply(Command::Rotate);
                }
                5 => {
                    engine.apply(Command::FastDrop);
                }
                _ => {}
            }
            frame(&mut engine, now);
        }
    });

    assert!(engine.is_running());
    assert!(engine.pieces_locked() > 0);
    assert_eq!(allocs, 0);
}

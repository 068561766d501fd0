//! Integration tests for the engine loop, driven tick by tick through a ManualScheduler

use std::sync::{Arc, Mutex};

use tui_stacker::core::{
    can_place, ActivePiece, Board, CellCanvas, EngineConfig, HeadlessEngine, ManualScheduler,
};
use tui_stacker::types::{Command, EnginePhase, ShapeName, BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH};

fn engine(seed: u64) -> HeadlessEngine {
    let config = EngineConfig {
        seed: Some(seed),
        ..EngineConfig::default()
    };
    HeadlessEngine::new(config, ManualScheduler::new()).with_renderer(CellCanvas::new())
}

fn fire(e: &mut HeadlessEngine, now: u64) -> bool {
    match e.scheduler_mut().take_pending() {
        Some(handle) => e.on_tick(handle, now),
        None => false,
    }
}

#[test]
fn test_game_lifecycle() {
    let mut e = engine(12345);
    assert_eq!(e.phase(), EnginePhase::Idle);

    assert!(e.apply(Command::Start));
    assert!(e.is_running());
    assert!(e.active().is_some());
    assert_eq!(e.score(), 0);

    e.stop();
    assert_eq!(e.phase(), EnginePhase::Idle);
    assert!(e.scheduler().pending().is_none());
}

#[test]
fn test_scenario_vertical_i_completes_bottom_row() {
    let mut e = engine(7);
    let scores = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&scores);
    e.on_score_change(move |score| seen.lock().unwrap().push(score));

    e.start();
    e.replace_board(Board::from_rows(&["#####.####"]));
    assert!(e.place_active(ActivePiece::new(ShapeName::I, 1, 5, 0)));
    assert!(e.apply(Command::FastDrop));

    let mut now = 0;
    while e.pieces_locked() == 0 {
        assert!(fire(&mut e, now));
        now += 16;
        assert!(now < 16 * 100, "piece never locked");
    }

    assert_eq!(e.score(), 10);
    assert_eq!(e.rows_cleared(), 1);
    assert_eq!(*scores.lock().unwrap(), vec![10]);
    assert_eq!(e.board().cells().len(), BOARD_CELLS);
    assert_eq!(e.board().width(), BOARD_WIDTH);
    assert_eq!(e.board().height(), BOARD_HEIGHT);

    // The three I cells above the cleared row shift down by one.
    assert_eq!(e.board().filled_count(), 3);
    for y in 17..20 {
        assert!(e.board().is_occupied(5, y));
    }
    assert_eq!(e.active().unwrap().y, 0);
}

#[test]
fn test_scenario_s_rotation_cycles() {
    let mut e = engine(1);
    e.start();
    e.replace_board(Board::new());
    assert!(e.place_active(ActivePiece::new(ShapeName::S, 0, 3, 5)));

    let mut seen = Vec::new();
    for _ in 0..4 {
        assert!(e.apply(Command::Rotate));
        seen.push(e.active().unwrap().rotation);
    }
    assert_eq!(seen, vec![1, 0, 1, 0]);
}

#[test]
fn test_scenario_move_down_stops_at_floor_then_gravity_locks() {
    let mut e = engine(3);
    e.start();
    assert!(e.place_active(ActivePiece::new(ShapeName::O, 0, 4, 0)));

    let mut moves = 0;
    for _ in 0..40 {
        if e.move_down() {
            moves += 1;
        }
    }
    assert_eq!(moves, 18);
    let resting = e.active().unwrap();
    assert_eq!(resting.y, (BOARD_HEIGHT - 2) as i8);
    assert!(e.board().is_empty());

    // First tick only records the baseline, the next due one locks.
    fire(&mut e, 0);
    assert_eq!(e.pieces_locked(), 0);
    fire(&mut e, 1000);
    assert_eq!(e.pieces_locked(), 1);
    for (x, y) in resting.cells() {
        assert!(e.board().is_occupied(x, y));
    }
    assert_eq!(e.active().unwrap().y, 0);
}

#[test]
fn test_left_wall_is_idempotent() {
    let mut e = engine(9);
    e.start();
    while e.move_left() {}
    let at_wall = e.active().unwrap();
    assert_eq!(at_wall.x, 0);

    for _ in 0..5 {
        assert!(!e.apply(Command::MoveLeft));
        assert_eq!(e.active().unwrap(), at_wall);
    }
}

#[test]
fn test_right_wall_stops_at_box_edge() {
    let mut e = engine(9);
    e.start();
    while e.move_right() {}
    let piece = e.active().unwrap();
    assert_eq!(piece.x as u8 + piece.width(), BOARD_WIDTH);
}

#[test]
fn test_spawns_are_valid_for_many_seeds() {
    for seed in 0..200 {
        let mut e = engine(seed);
        e.start();
        let piece = e.active().unwrap();
        assert_eq!(piece.y, 0);
        assert!(piece.x >= 0);
        assert!(piece.x as u8 + piece.width() <= BOARD_WIDTH);
        assert!(can_place(e.board(), &piece, 0, 0), "seed {}", seed);
    }
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed| {
        let mut e = engine(seed);
        e.start();
        let mut now = 0;
        let mut pieces = Vec::new();
        while pieces.len() < 10 && e.is_running() {
            let before = e.pieces_locked();
            e.request_fast_drop();
            fire(&mut e, now);
            now += 16;
            if e.pieces_locked() != before {
                pieces.push(e.active());
            }
        }
        (pieces, e.snapshot().board_hash)
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn test_score_is_monotonic_until_game_over() {
    let mut e = engine(2024);
    let overs = Arc::new(Mutex::new(0));
    let o = Arc::clone(&overs);
    e.on_game_over(move || *o.lock().unwrap() += 1);
    e.start();

    let mut now = 0;
    let mut last_score = 0;
    let mut ticks = 0;
    while e.is_running() {
        e.request_fast_drop();
        fire(&mut e, now);
        now += 16;
        ticks += 1;

        assert!(e.score() >= last_score);
        assert_eq!(e.score() % 10, 0);
        assert_eq!(e.score(), e.rows_cleared() * 10);
        last_score = e.score();
        assert!(ticks < 100_000, "game never ended");
    }

    assert_eq!(e.phase(), EnginePhase::GameOver);
    assert_eq!(*overs.lock().unwrap(), 1);
    assert!(e.tick_handle().is_none());
    assert!(e.scheduler().pending().is_none());

    // Further commands and ticks do nothing.
    let snap = e.snapshot();
    assert!(!e.apply(Command::MoveLeft));
    assert!(!e.apply(Command::FastDrop));
    assert!(!fire(&mut e, now));
    assert_eq!(e.snapshot(), snap);
}

#[test]
fn test_restart_after_game_over() {
    let mut e = engine(5);
    e.start();
    e.replace_board(Board::from_rows(&["##########"; 20]));
    fire(&mut e, 0);
    assert_eq!(e.phase(), EnginePhase::GameOver);

    let starts = Arc::new(Mutex::new(0));
    let s = Arc::clone(&starts);
    e.on_start(move || *s.lock().unwrap() += 1);

    assert!(e.apply(Command::Start));
    assert!(e.is_running());
    assert!(e.board().is_empty());
    assert_eq!(e.score(), 0);
    assert_eq!(*starts.lock().unwrap(), 1);
    assert!(e.scheduler().pending().is_some());
}

#[test]
fn test_canvas_tracks_every_step() {
    let mut e = engine(11);
    e.start();
    fire(&mut e, 0);
    let canvas = e.renderer().unwrap();
    assert_eq!(canvas.frames(), 1);
    assert_eq!(canvas.solid_count(), 4);

    fire(&mut e, 16);
    assert_eq!(e.renderer().unwrap().frames(), 2);
}

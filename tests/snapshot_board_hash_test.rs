use tui_stacker::core::{
    board_hash, ActivePiece, CellCanvas, EngineConfig, EngineSnapshot, HeadlessEngine,
    ManualScheduler,
};
use tui_stacker::types::{Command, EnginePhase, ShapeName};

fn fnv1a64_bytes(bytes: impl Iterator<Item = u8>) -> u64 {
    // FNV-1a 64-bit.
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

fn fnv1a64_board(board: &[[u8; 10]; 20]) -> u64 {
    fnv1a64_bytes(board.iter().flat_map(|row| row.iter().copied()))
}

fn engine() -> HeadlessEngine {
    let config = EngineConfig {
        seed: Some(1),
        ..EngineConfig::default()
    };
    HeadlessEngine::new(config, ManualScheduler::new()).with_renderer(CellCanvas::new())
}

#[test]
fn snapshot_into_sets_board_hash() {
    let mut e = engine();
    e.start();

    let mut snap = EngineSnapshot::default();
    e.snapshot_into(&mut snap);
    assert_eq!(snap.board_hash, fnv1a64_board(&snap.board));
    assert_eq!(board_hash(&snap.board), snap.board_hash);

    e.apply(Command::FastDrop);
    let mut now = 0;
    while e.pieces_locked() == 0 {
        let handle = e.scheduler_mut().take_pending().unwrap();
        e.on_tick(handle, now);
        now += 16;
    }

    e.snapshot_into(&mut snap);
    assert_eq!(snap.board_hash, fnv1a64_board(&snap.board));
    assert_eq!(snap.pieces_locked, 1);
}

#[test]
fn snapshot_board_includes_active_piece() {
    let mut e = engine();
    e.start();
    assert!(e.place_active(ActivePiece::new(ShapeName::O, 0, 2, 3)));

    let snap = e.snapshot();
    assert_eq!(snap.phase, EnginePhase::Running);
    assert!(snap.playable());
    assert_eq!(snap.board[3][2], 1);
    assert_eq!(snap.board[4][3], 1);
    assert_eq!(snap.board.iter().flatten().filter(|&&c| c != 0).count(), 4);
    assert!(e.board().is_empty());
}

#[test]
fn board_hash_changes_when_piece_moves() {
    let mut e = engine();
    e.start();
    assert!(e.place_active(ActivePiece::new(ShapeName::T, 0, 3, 0)));

    let before = e.snapshot().board_hash;
    assert!(e.apply(Command::MoveRight));
    let after = e.snapshot().board_hash;
    assert_ne!(before, after);

    assert!(e.apply(Command::MoveLeft));
    assert_eq!(e.snapshot().board_hash, before);
}

#[test]
fn default_snapshot_is_idle_and_empty() {
    let snap = EngineSnapshot::default();
    assert_eq!(snap.phase, EnginePhase::Idle);
    assert!(!snap.playable());
    assert_eq!(snap.board_hash, fnv1a64_board(&[[0; 10]; 20]));
}

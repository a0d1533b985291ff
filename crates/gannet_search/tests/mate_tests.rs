//! End-to-end search scenarios: mates, stalemates, window discipline and
//! principal-variation sanity.

use gannet_core::{Board, Engine, SearchLimits, legal_moves};
use gannet_search::{AlphaBetaEngine, INFINITY, MATE, Pv, SearchStats, search, search_root};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";

#[test]
fn test_mated_position_scores_minus_mate() {
    // White king on e1, black queen e2 defended by the king on e3: mate.
    for depth in 1..=4 {
        let mut b = Board::from_fen("8/8/8/8/8/4k3/4q3/4K3 w - - 0 1").unwrap();
        let mut pv = Pv::new();
        let mut stats = SearchStats::default();
        let score = search_root(&mut b, depth, &mut pv, &mut stats);
        assert_eq!(score, -MATE);
        assert_eq!(pv.count, 0);
    }
}

#[test]
fn test_stalemate_scores_zero() {
    let mut b = Board::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(legal_moves(&b).is_empty());
    assert!(!b.in_check());

    let mut pv = Pv::new();
    let mut stats = SearchStats::default();
    assert_eq!(search_root(&mut b, 3, &mut pv, &mut stats), 0);
}

#[test]
fn test_fools_mate() {
    // After 1.f3 e5 2.g4, black mates with Qh4.
    let mut b =
        Board::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2").unwrap();
    let mut pv = Pv::new();
    let mut stats = SearchStats::default();

    let score = search_root(&mut b, 2, &mut pv, &mut stats);
    assert_eq!(score, MATE - 1);
    assert_eq!(pv.moves[0].from, 59); // d8
    assert_eq!(pv.moves[0].dest, 31); // h4
}

#[test]
fn test_fail_hard_window() {
    let mut b = Board::startpos();
    let mut pv = Pv::new();
    let mut stats = SearchStats::default();
    let score = search(&mut b, 3, -10, 10, 0, &mut pv, &mut stats);
    assert!((-10..=10).contains(&score));

    // A window the true score cannot reach clamps to its edge.
    let mut stats = SearchStats::default();
    let low = search(&mut b, 2, -INFINITY, -5000, 0, &mut pv, &mut stats);
    assert_eq!(low, -5000);
}

#[test]
fn test_negamax_symmetry() {
    // The mirrored position with the other side to move must score the same.
    let mut white =
        Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    let mut black =
        Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();

    let mut pv = Pv::new();
    let mut stats = SearchStats::default();
    let w = search_root(&mut white, 3, &mut pv, &mut stats);
    let b = search_root(&mut black, 3, &mut pv, &mut stats);
    assert_eq!(w, b);
}

#[test]
fn test_pv_is_legal() {
    let mut b = Board::from_fen(KIWIPETE).unwrap();
    let mut pv = Pv::new();
    let mut stats = SearchStats::default();
    search_root(&mut b, 4, &mut pv, &mut stats);
    assert!(pv.count > 0);

    // Each PV move must be legal in the position its prefix produces.
    let mut replay = Board::from_fen(KIWIPETE).unwrap();
    for mv in pv.line() {
        assert!(
            legal_moves(&replay)
                .iter()
                .any(|m| m.from == mv.from && m.dest == mv.dest && m.kind == mv.kind),
            "PV move {mv:?} is not legal in {}",
            replay.to_fen()
        );
        replay.make_move(*mv);
    }
}

#[test]
fn test_bare_kings_scores_by_evaluation() {
    // Insufficient material is not adjudicated: the score comes from the
    // evaluation of the searched leaves (king activity), not a forced 0.
    let mut b = Board::from_fen("7k/8/8/8/8/8/8/7K w - - 0 1").unwrap();
    let mut pv = Pv::new();
    let mut stats = SearchStats::default();
    let score = search_root(&mut b, 3, &mut pv, &mut stats);
    assert!(score.abs() < 1000, "expected an eval-band score, got {score}");
    assert!(pv.count > 0);
    assert!(stats.nodes > 0);
}

#[test]
fn test_engine_trait_round_trip() {
    let mut engine = AlphaBetaEngine::new();
    let result = engine.search(&Board::startpos(), SearchLimits::depth(3));
    assert!(result.best_move.is_some());
    assert!(result.nodes > 0);
    assert!(!result.stopped);
    assert_eq!(result.pv.first().copied(), result.best_move);
    assert_eq!(engine.name(), "Gannet");
}

//! Properties of the solved value table and agreement with the online engine

mod common;

use common::{random_walk, solution, space};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tactictoe::{
    Player,
    adapters::SolvedOracle,
    playout::play_out,
    ports::{MoveOracle, NullObserver},
    solver::{NegamaxEngine, RetrogradeSolver, SearchConfig, SolverConfig, toward_zero},
    tictactoe::{BoardState, D4Transform, decode},
};

fn extreme(player: Player, values: impl Iterator<Item = i32>) -> i32 {
    match player {
        Player::X => values.max().unwrap(),
        Player::O => values.min().unwrap(),
    }
}

#[test]
fn fixed_point_is_stable() {
    let solver = RetrogradeSolver::new(space(), SolverConfig::default());
    let (values, history) = solver.fixed_point(&mut NullObserver).unwrap();
    assert_eq!(history.last(), Some(&0));

    let (again, changes) = solver.relax(&values).unwrap();
    assert_eq!(changes, 0);
    assert_eq!(again, values);
}

#[test]
fn every_state_is_solved_with_moves() {
    let solved = &solution().solved;
    assert_eq!(solved.len(), space().len());

    for (key, entry) in solved.iter() {
        if entry.terminal {
            assert!(entry.best_moves.is_empty());
            assert_eq!(entry.score.abs(), solved.win_score());
        } else {
            assert!(!entry.best_moves.is_empty(), "state {key}");
            assert!(entry.best_moves.windows(2).all(|w| w[0] < w[1]));
            assert!(entry.score.abs() < solved.win_score());
        }
    }
}

#[test]
fn values_agree_with_children() {
    let solved = &solution().solved;

    for (key, entry) in solved.iter().filter(|(_, e)| !e.terminal) {
        let mover = decode(*key).unwrap().to_move;
        let child_score = |child| solved.score(child).unwrap() as i32;
        let best = extreme(mover, entry.children.iter().map(|(_, c)| child_score(c)));
        assert_eq!(entry.score as i32, toward_zero(best), "state {key}");

        for (mv, child) in &entry.children {
            assert_eq!(
                entry.best_moves.contains(mv),
                child_score(child) == best,
                "state {key} move {mv}"
            );
        }
    }
}

#[test]
fn initial_position_is_consistent() {
    let solved = &solution().solved;
    let root = solved.root();
    assert_eq!(root, BoardState::new().canonical_key());

    let eval = solved.lookup(&BoardState::new()).unwrap();
    assert_eq!(eval.score, solved.score(&root).unwrap() as i32);
    assert!(!eval.best_moves.is_empty());
}

#[test]
fn distance_parity_matches_the_winner() {
    let solved = &solution().solved;
    for (key, entry) in solved.iter().filter(|(_, e)| e.score != 0) {
        let mover = decode(*key).unwrap().to_move;
        let distance = solved.distance_to_outcome(entry.score).unwrap();
        let mover_wins = (entry.score > 0) == (mover == Player::X);
        if entry.terminal {
            // the side that just moved won
            assert_eq!(distance, 0);
            assert!(!mover_wins);
        } else {
            assert_eq!(mover_wins, distance % 2 == 1, "state {key}");
        }
    }
}

#[test]
fn lookup_is_invariant_under_symmetry() {
    let solved = &solution().solved;
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let plies = rng.random_range(0..20);
        let state = random_walk(&mut rng, plies);
        let base = solved.lookup(&state).unwrap();

        for t in D4Transform::ALL {
            let eval = solved.lookup(&state.transform(&t)).unwrap();
            assert_eq!(eval.score, base.score);
            let mut mapped: Vec<_> = base
                .best_moves
                .iter()
                .map(|&mv| t.transform_position(mv))
                .collect();
            mapped.sort_unstable();
            assert_eq!(eval.best_moves, mapped);
        }
    }
}

#[test]
fn negamax_agrees_on_shallow_decided_positions() {
    let solved = &solution().solved;
    let mut checked = 0;

    for (key, entry) in solved.iter().filter(|(_, e)| !e.terminal) {
        let Some(distance) = solved.distance_to_outcome(entry.score) else {
            continue;
        };
        if distance > 3 {
            continue;
        }

        let state = decode(*key).unwrap();
        let mut engine = NegamaxEngine::new(SearchConfig::default());
        let result = engine.search(&state, distance).unwrap();
        let mover_wins = distance % 2 == 1;

        assert_eq!(result.score > 0, mover_wins, "state {key}");
        assert_eq!(result.score < 0, !mover_wins, "state {key}");
        let mv = result.best_move.unwrap();
        if mover_wins {
            assert!(entry.best_moves.contains(&mv), "state {key} move {mv}");
        }
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn shared_engine_keeps_fastest_wins_across_depths() {
    let solved = &solution().solved;
    let mut engine = NegamaxEngine::new(SearchConfig::default());
    let mut checked = 0;

    let shallow = solved
        .iter()
        .filter(|(_, e)| !e.terminal)
        .filter_map(|(key, e)| Some((key, e, solved.distance_to_outcome(e.score)?)))
        .filter(|&(_, _, distance)| distance <= 3);

    for (key, entry, distance) in shallow.step_by(5) {
        let state = decode(*key).unwrap();
        let mover_wins = distance % 2 == 1;

        // Deep first, so the shallow search runs against deeper table entries
        for depth in [distance + 4, distance] {
            let result = engine.search(&state, depth).unwrap();
            let expected = (depth + 1 - distance) as i32;
            let expected = if mover_wins { expected } else { -expected };
            assert_eq!(result.score, expected, "state {key} depth {depth}");

            let mv = result.best_move.unwrap();
            if mover_wins {
                assert!(entry.best_moves.contains(&mv), "state {key} depth {depth} move {mv}");
            }
        }
        checked += 1;
    }
    assert!(checked > 0);
    assert!(engine.table().hits() > 0);
}

#[test]
fn seeded_playouts_follow_the_solved_values() {
    let solved = &solution().solved;
    let mut oracle = SolvedOracle::new(solved.clone());
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let plies = rng.random_range(0..12);
        let start = random_walk(&mut rng, plies);
        if start.is_terminal() {
            continue;
        }
        let score = oracle.evaluate(&start).unwrap().unwrap().score;
        let game = play_out(&mut oracle, start, 60, &mut rng).unwrap();

        match solved.distance_to_outcome(score as i8) {
            Some(distance) => {
                assert_eq!(game.plies(), distance as usize, "from {}", start.label());
                let expected = if score > 0 { Player::X } else { Player::O };
                assert_eq!(game.winner, Some(expected));
            }
            None => {
                assert_eq!(game.winner, None, "from {}", start.label());
                assert_eq!(game.plies(), 60);
            }
        }
    }
}

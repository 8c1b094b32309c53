use squares_ai::combinatorics::choose;
use squares_ai::probability::{ProbabilityEngine, UtilityGrid};
use squares_ai::rewards::RewardVector;
use squares_engine::cards::{all_ranks, all_suits, Card};
use squares_engine::game::Game;
use squares_engine::grid::{Cell, Line};
use squares_engine::hand::HandCategory;

fn card(s: &str) -> Card {
    s.parse().unwrap()
}

fn cell(r: usize, c: usize) -> Cell {
    Cell::new(r, c).unwrap()
}

#[test]
fn test_choose_contract() {
    assert_eq!(choose(5, 2), 10.0);
    assert_eq!(choose(4, 4), 1.0);
    assert_eq!(choose(3, 5), 0.0);
    assert_eq!(choose(51, 4), 249_900.0);
}

#[test]
fn test_pool_totals_track_commits() {
    let mut engine = ProbabilityEngine::new(RewardVector::trained());
    let mut game = Game::new(2024);
    for drawn in 1..=25 {
        let c = game.deal().unwrap();
        let target = game.grid().empty_cells()[0];
        engine.commit_placement(c, target).unwrap();
        game.place(target).unwrap();

        let pool = engine.pool();
        let by_rank: usize = all_ranks().iter().map(|&r| pool.rank(r)).sum();
        let by_suit: usize = all_suits().iter().map(|&s| pool.suit(s)).sum();
        assert_eq!(by_rank, 52 - drawn);
        assert_eq!(by_suit, 52 - drawn);
        assert_eq!(engine.turn(), drawn);
    }
}

#[test]
fn test_full_hand_vector_is_its_reward() {
    let rewards = RewardVector::trained();
    let mut engine = ProbabilityEngine::new(rewards);
    // row 0: 4C 5D 6H 7S 8C is a straight
    for (col, s) in ["4C", "5D", "6H", "7S", "8C"].iter().enumerate() {
        engine.commit_placement(card(s), cell(0, col)).unwrap();
    }
    let v = engine.hand_probabilities(Line::Row(0).hand_index()).unwrap();
    for category in HandCategory::ALL_SCORING {
        let i = category.reward_index().unwrap();
        let expected = if category == HandCategory::Straight {
            rewards.weight(category)
        } else {
            0.0
        };
        assert_eq!(v[i], expected, "{}", category.name());
    }

    // previews leave the full row alone
    engine.refresh_probabilities(card("9D")).unwrap();
    assert_eq!(engine.preview_probabilities(0), engine.hand_probabilities(0));
}

#[test]
fn test_filled_cells_carry_sentinel() {
    let mut engine = ProbabilityEngine::new(RewardVector::trained());
    let placed = [("AS", 0, 0), ("KD", 2, 3), ("5C", 4, 4)];
    for (s, r, c) in placed {
        engine.commit_placement(card(s), cell(r, c)).unwrap();
    }
    let grid = engine.refresh_probabilities(card("QH")).unwrap();
    for (_, r, c) in placed {
        assert_eq!(grid.get(cell(r, c)), UtilityGrid::INELIGIBLE);
    }
    assert_eq!(grid.eligible().count(), 22);
    assert!(grid.eligible().all(|c| grid.get(c).is_finite()));
}

#[test]
fn test_repeated_refresh_does_not_drift() {
    let mut engine = ProbabilityEngine::new(RewardVector::baseline());
    for (s, r, c) in [("TD", 0, 0), ("TS", 0, 1), ("3H", 1, 0)] {
        engine.commit_placement(card(s), cell(r, c)).unwrap();
    }
    let before: Vec<_> = (0..10).map(|h| *engine.hand_probabilities(h).unwrap()).collect();
    let a = engine.refresh_probabilities(card("TH")).unwrap();
    let b = engine.refresh_probabilities(card("TH")).unwrap();
    let c = engine.refresh_probabilities(card("TH")).unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
    let after: Vec<_> = (0..10).map(|h| *engine.hand_probabilities(h).unwrap()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_probabilities_stay_in_range() {
    let rewards = RewardVector::new([1.0; 9]).unwrap();
    let mut engine = ProbabilityEngine::new(rewards);
    let mut game = Game::new(99);
    while !game.is_complete() {
        let c = game.deal().unwrap();
        engine.refresh_probabilities(c).unwrap();
        for h in 0..10 {
            for &p in engine.preview_probabilities(h).unwrap() {
                assert!((0.0..=1.0).contains(&p), "hand {} p={}", h, p);
            }
        }
        let target = game.grid().empty_cells()[0];
        engine.commit_placement(c, target).unwrap();
        game.place(target).unwrap();
    }
}

#[test]
fn test_reachability_follows_commits() {
    let mut engine = ProbabilityEngine::new(RewardVector::trained());
    engine.commit_placement(card("3C"), cell(0, 0)).unwrap();
    let row = engine.reachability(0).unwrap();
    assert!(row.get(HandCategory::Straight));
    assert!(row.get(HandCategory::Flush));

    engine.commit_placement(card("3D"), cell(0, 1)).unwrap();
    let row = engine.reachability(0).unwrap();
    assert!(!row.get(HandCategory::Straight));
    assert!(!row.get(HandCategory::Flush));
    assert!(row.get(HandCategory::FourOfAKind));
    // the columns each hold a single card
    assert!(engine.reachability(5).unwrap().get(HandCategory::Flush));
    assert_eq!(engine.pool().drawn(), 2);
}

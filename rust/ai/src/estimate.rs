//! Per-hand completion probabilities.
//!
//! For a hand with `m` open slots, every `m`-card subset of the unseen pool
//! is an equally likely completion. Counts below are exact: a rank-pattern
//! DP for pairs through quads, and per-window products for straights.

use squares_engine::cards::{all_ranks, all_suits, Card, Rank, Suit, NUM_RANKS, NUM_SUITS};
use squares_engine::hand::{classify, straight_windows, HandCategory, HAND_SIZE, ROYAL_WINDOW};

use crate::combinatorics::choose;
use crate::pool::UnseenPool;
use crate::rewards::NUM_CATEGORIES;

/// Probability of finishing in each scoring category, pair first.
pub type CategoryVector = [f64; NUM_CATEGORIES];

/// Rank/suit profile of the cards already in a hand.
#[derive(Debug, Clone, Copy)]
struct Shape {
    len: usize,
    ranks: [u8; NUM_RANKS],
    suits: [u8; NUM_SUITS],
    rank_mask: u16,
}

impl Shape {
    fn of(slots: &[Option<Card>]) -> Self {
        let mut s = Shape {
            len: 0,
            ranks: [0; NUM_RANKS],
            suits: [0; NUM_SUITS],
            rank_mask: 0,
        };
        for c in slots.iter().flatten() {
            s.len += 1;
            s.ranks[c.rank.index()] += 1;
            s.suits[c.suit.index()] += 1;
            s.rank_mask |= 1 << c.rank.index();
        }
        s
    }

    fn open(&self) -> usize {
        HAND_SIZE.saturating_sub(self.len)
    }

    fn distinct(&self) -> bool {
        self.rank_mask.count_ones() as usize == self.len
    }

    /// Suits a flush could still be made in: every suit for an empty hand,
    /// the one suit present otherwise, none if suits are mixed.
    fn flush_suits(&self) -> Vec<Suit> {
        let present: Vec<Suit> = all_suits()
            .into_iter()
            .filter(|s| self.suits[s.index()] > 0)
            .collect();
        match present.len() {
            0 => all_suits().to_vec(),
            1 => present,
            _ => Vec::new(),
        }
    }

    fn fits_window(&self, window: u16) -> bool {
        self.distinct() && self.rank_mask & !window == 0
    }

    /// Whether the current rank multiset can grow into `parts` (group
    /// sizes, largest first).
    fn embeds(&self, parts: &[u8]) -> bool {
        let mut groups: Vec<u8> = self.ranks.iter().copied().filter(|&n| n > 0).collect();
        groups.sort_unstable_by(|a, b| b.cmp(a));
        groups.len() <= parts.len() && groups.iter().zip(parts).all(|(g, p)| g <= p)
    }
}

/// Which scoring categories a hand can still finish in, from its placed
/// cards alone. Used to skip work; never changes a computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reachability([bool; NUM_CATEGORIES]);

impl Reachability {
    pub fn of(slots: &[Option<Card>]) -> Self {
        let shape = Shape::of(slots);
        let current = classify(slots);
        let windows = straight_windows();
        let flushable = !shape.flush_suits().is_empty();
        let any_window = windows.iter().any(|&w| shape.fits_window(w));
        let royal_window = shape.fits_window(windows[ROYAL_WINDOW]);

        let mut flags = [false; NUM_CATEGORIES];
        for category in HandCategory::ALL_SCORING {
            let reachable = match category {
                HandCategory::OnePair => shape.embeds(&[2, 1, 1, 1]),
                HandCategory::TwoPair => shape.embeds(&[2, 2, 1]),
                HandCategory::ThreeOfAKind => shape.embeds(&[3, 1, 1]),
                HandCategory::FullHouse => shape.embeds(&[3, 2]),
                HandCategory::FourOfAKind => shape.embeds(&[4, 1]),
                HandCategory::Straight => any_window,
                HandCategory::Flush => flushable && shape.distinct(),
                HandCategory::StraightFlush => any_window && flushable,
                HandCategory::RoyalFlush => royal_window && flushable,
                HandCategory::HighCard => false,
            };
            if let Some(i) = category.reward_index() {
                flags[i] = reachable && category >= current;
            }
        }
        Self(flags)
    }

    /// Every category flagged; disables all pruning.
    pub fn all() -> Self {
        Self([true; NUM_CATEGORIES])
    }

    pub fn get(&self, category: HandCategory) -> bool {
        category.reward_index().is_some_and(|i| self.0[i])
    }

    fn any_of(&self, categories: &[HandCategory]) -> bool {
        categories.iter().any(|&c| self.get(c))
    }
}

/// Completion probabilities for one hand.
///
/// A full hand is classified: 1 at its category, 0 elsewhere. A partial
/// hand that already holds a category reports 1 for it and 0 for every
/// weaker one. Categories not flagged in `reach` are left at 0.
pub fn estimate(slots: &[Option<Card>], pool: &UnseenPool, reach: &Reachability) -> CategoryVector {
    let shape = Shape::of(slots);
    let current = classify(slots);
    let mut out = [0.0; NUM_CATEGORIES];
    let m = shape.open();

    if m > 0 {
        let total = choose(pool.remaining(), m);
        if total > 0.0 {
            let mut counts = [0.0; NUM_CATEGORIES];
            if reach.any_of(&[
                HandCategory::OnePair,
                HandCategory::TwoPair,
                HandCategory::ThreeOfAKind,
                HandCategory::FullHouse,
                HandCategory::FourOfAKind,
            ]) {
                rank_patterns(&shape, pool, m, &mut counts);
            }
            if reach.any_of(&[
                HandCategory::Straight,
                HandCategory::Flush,
                HandCategory::StraightFlush,
                HandCategory::RoyalFlush,
            ]) {
                straights_and_flushes(&shape, pool, m, &mut counts);
            }
            for category in HandCategory::ALL_SCORING {
                if let Some(i) = category.reward_index() {
                    if reach.get(category) {
                        out[i] = (counts[i] / total).clamp(0.0, 1.0);
                    }
                }
            }
        }
    }

    force_current(&mut out, current);
    out
}

// The hand already holds `current`: it is certain and anything weaker is
// superseded.
fn force_current(out: &mut CategoryVector, current: HandCategory) {
    if let Some(ci) = current.reward_index() {
        for v in out.iter_mut().take(ci) {
            *v = 0.0;
        }
        out[ci] = 1.0;
    }
}

fn idx(category: HandCategory) -> usize {
    category.id() - 1
}

// dp[used][pairs][trips][quads] over the 13 ranks.
type PatternTable = [[[[f64; 2]; 2]; 3]; HAND_SIZE + 1];

fn rank_patterns(shape: &Shape, pool: &UnseenPool, m: usize, counts: &mut CategoryVector) {
    let mut dp: PatternTable = Default::default();
    dp[0][0][0][0] = 1.0;

    for rank in all_ranks() {
        let have = shape.ranks[rank.index()] as usize;
        let avail = pool.rank(rank);
        let mut next: PatternTable = Default::default();
        for used in 0..=m {
            for pairs in 0..3 {
                for trips in 0..2 {
                    for quads in 0..2 {
                        let v = dp[used][pairs][trips][quads];
                        if v == 0.0 {
                            continue;
                        }
                        for take in 0..=avail.min(m - used) {
                            let (mut p, mut t, mut q) = (pairs, trips, quads);
                            match have + take {
                                0 | 1 => {}
                                2 => p += 1,
                                3 => t += 1,
                                4 => q += 1,
                                _ => continue,
                            }
                            if p > 2 || t > 1 || q > 1 {
                                continue;
                            }
                            next[used + take][p][t][q] += v * choose(avail, take);
                        }
                    }
                }
            }
        }
        dp = next;
    }

    let done = &dp[m];
    for (pairs, by_trips) in done.iter().enumerate() {
        for (trips, by_quads) in by_trips.iter().enumerate() {
            for (quads, &ways) in by_quads.iter().enumerate() {
                let category = match (pairs, trips, quads) {
                    (_, _, 1) => HandCategory::FourOfAKind,
                    (1.., 1, _) => HandCategory::FullHouse,
                    (0, 1, _) => HandCategory::ThreeOfAKind,
                    (2, _, _) => HandCategory::TwoPair,
                    (1, _, _) => HandCategory::OnePair,
                    _ => continue,
                };
                counts[idx(category)] += ways;
            }
        }
    }
}

fn straights_and_flushes(shape: &Shape, pool: &UnseenPool, m: usize, counts: &mut CategoryVector) {
    if !shape.distinct() {
        return;
    }
    let suits = shape.flush_suits();
    let mut straights = 0.0;
    let mut straight_flushes = 0.0;
    let mut royals = 0.0;

    for (w, &window) in straight_windows().iter().enumerate() {
        if !shape.fits_window(window) {
            continue;
        }
        let missing: Vec<Rank> = all_ranks()
            .into_iter()
            .filter(|r| window & (1 << r.index()) != 0 && shape.rank_mask & (1 << r.index()) == 0)
            .collect();
        straights += missing.iter().map(|&r| pool.rank(r) as f64).product::<f64>();
        let suited = suits
            .iter()
            .filter(|&&s| missing.iter().all(|&r| pool.contains(Card::new(r, s))))
            .count() as f64;
        if w == ROYAL_WINDOW {
            royals += suited;
        } else {
            straight_flushes += suited;
        }
    }

    // a flush completion is m more cards of the hand's suit
    let flushes: f64 = suits.iter().map(|&s| choose(pool.suit(s), m)).sum();
    let suited_straights = straight_flushes + royals;

    counts[idx(HandCategory::Straight)] += (straights - suited_straights).max(0.0);
    counts[idx(HandCategory::Flush)] += (flushes - suited_straights).max(0.0);
    counts[idx(HandCategory::StraightFlush)] += straight_flushes;
    counts[idx(HandCategory::RoyalFlush)] += royals;
}

/// Reward-weighted expectation of a category vector.
pub fn weighted(probs: &CategoryVector, weights: &[f64; NUM_CATEGORIES]) -> CategoryVector {
    std::array::from_fn(|i| probs[i] * weights[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(cards: &[&str]) -> [Option<Card>; HAND_SIZE] {
        let mut out = [None; HAND_SIZE];
        for (slot, s) in out.iter_mut().zip(cards) {
            *slot = Some(s.parse().unwrap());
        }
        out
    }

    fn pool_without(cards: &[&str]) -> UnseenPool {
        let mut pool = UnseenPool::new();
        for s in cards {
            pool.remove(s.parse().unwrap()).unwrap();
        }
        pool
    }

    fn p(v: &CategoryVector, c: HandCategory) -> f64 {
        v[idx(c)]
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn empty_hand_matches_five_card_frequencies() {
        let hand = slots(&[]);
        let v = estimate(&hand, &UnseenPool::new(), &Reachability::of(&hand));
        let total = 2_598_960.0;
        assert!(close(p(&v, HandCategory::OnePair), 1_098_240.0 / total));
        assert!(close(p(&v, HandCategory::TwoPair), 123_552.0 / total));
        assert!(close(p(&v, HandCategory::ThreeOfAKind), 54_912.0 / total));
        assert!(close(p(&v, HandCategory::Straight), 10_200.0 / total));
        assert!(close(p(&v, HandCategory::Flush), 5_108.0 / total));
        assert!(close(p(&v, HandCategory::FullHouse), 3_744.0 / total));
        assert!(close(p(&v, HandCategory::FourOfAKind), 624.0 / total));
        assert!(close(p(&v, HandCategory::StraightFlush), 36.0 / total));
        assert!(close(p(&v, HandCategory::RoyalFlush), 4.0 / total));
    }

    #[test]
    fn single_card_pair_odds() {
        // TD placed, 51 unseen, 4 to come
        let hand = slots(&["TD"]);
        let pool = pool_without(&["TD"]);
        let v = estimate(&hand, &pool, &Reachability::of(&hand));
        let total = choose(51, 4);
        assert!(p(&v, HandCategory::OnePair) > 0.0);
        assert!(p(&v, HandCategory::OnePair) < 1.0);
        // the other three tens plus any of 48 kickers, or four of another rank
        assert!(close(p(&v, HandCategory::FourOfAKind), (48.0 + 12.0) / total));
        // royal in diamonds needs exactly JD QD KD AD
        assert!(close(p(&v, HandCategory::RoyalFlush), 1.0 / total));
    }

    #[test]
    fn full_hand_is_classified() {
        let hand = slots(&["2C", "2D", "2H", "9S", "9C"]);
        let v = estimate(&hand, &UnseenPool::new(), &Reachability::of(&hand));
        for category in HandCategory::ALL_SCORING {
            let expected = if category == HandCategory::FullHouse { 1.0 } else { 0.0 };
            assert_eq!(p(&v, category), expected, "{}", category.name());
        }
    }

    #[test]
    fn held_category_is_forced() {
        let hand = slots(&["7C", "7D", "KH"]);
        let pool = pool_without(&["7C", "7D", "KH"]);
        let v = estimate(&hand, &pool, &Reachability::of(&hand));
        assert_eq!(p(&v, HandCategory::OnePair), 1.0);
        assert_eq!(p(&v, HandCategory::Straight), 0.0);
        assert_eq!(p(&v, HandCategory::Flush), 0.0);
        assert!(p(&v, HandCategory::TwoPair) > 0.0);
        assert!(p(&v, HandCategory::FullHouse) > 0.0);
    }

    #[test]
    fn exhausted_rank_blocks_straight() {
        // 9 T J Q with every king and eight already seen
        let hand = slots(&["9C", "TD", "JH", "QS"]);
        let seen = ["9C", "TD", "JH", "QS", "KC", "KD", "KH", "KS", "8C", "8D", "8H", "8S"];
        let pool = pool_without(&seen);
        let v = estimate(&hand, &pool, &Reachability::of(&hand));
        assert_eq!(p(&v, HandCategory::Straight), 0.0);
    }

    #[test]
    fn suited_draw_counts_straight_flush() {
        let hand = slots(&["5H", "6H", "7H", "8H"]);
        let pool = pool_without(&["5H", "6H", "7H", "8H"]);
        let v = estimate(&hand, &pool, &Reachability::of(&hand));
        let total = 48.0;
        assert!(close(p(&v, HandCategory::StraightFlush), 2.0 / total));
        assert!(close(p(&v, HandCategory::Straight), 6.0 / total));
        assert!(close(p(&v, HandCategory::Flush), 7.0 / total));
        assert_eq!(p(&v, HandCategory::RoyalFlush), 0.0);
    }

    #[test]
    fn pruning_never_changes_values() {
        let hands: [&[&str]; 6] = [
            &[],
            &["AS"],
            &["AS", "KS", "QS"],
            &["3C", "3D", "9H", "9S"],
            &["2C", "5D", "8H"],
            &["JC", "JD", "JH"],
        ];
        for cards in hands {
            let hand = slots(cards);
            let pool = pool_without(cards);
            let pruned = estimate(&hand, &pool, &Reachability::of(&hand));
            let full = estimate(&hand, &pool, &Reachability::all());
            assert_eq!(pruned, full, "{:?}", cards);
        }
    }

    #[test]
    fn reachability_flags() {
        let hand = slots(&["3C", "3D", "9H"]);
        let r = Reachability::of(&hand);
        assert!(r.get(HandCategory::OnePair));
        assert!(r.get(HandCategory::FullHouse));
        assert!(r.get(HandCategory::FourOfAKind));
        assert!(!r.get(HandCategory::Straight));
        assert!(!r.get(HandCategory::Flush));
        assert!(!r.get(HandCategory::RoyalFlush));

        let suited = slots(&["TS", "AS"]);
        let r = Reachability::of(&suited);
        assert!(r.get(HandCategory::RoyalFlush));
        assert!(r.get(HandCategory::Straight));
        assert!(!Reachability::of(&slots(&["2S", "AS"])).get(HandCategory::RoyalFlush));
    }
}

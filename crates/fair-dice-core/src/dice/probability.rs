//! Pairwise win probabilities by exhaustive face comparison.

use serde::Serialize;

use super::{DiceSet, Die, FACES};

const PAIRS: u32 = (FACES * FACES) as u32;

/// Face pairs where `a` rolls strictly higher than `b`
pub fn wins(a: &Die, b: &Die) -> u32 {
    count_pairs(a, b, |x, y| x > y)
}

/// Face pairs where `a` and `b` roll the same
pub fn ties(a: &Die, b: &Die) -> u32 {
    count_pairs(a, b, |x, y| x == y)
}

/// Probability that `a` beats `b`, rounded to two decimals
pub fn win_probability(a: &Die, b: &Die) -> f64 {
    let p = f64::from(wins(a, b)) / f64::from(PAIRS);
    (p * 100.0).round() / 100.0
}

/// Probability that `a` and `b` tie, unrounded
pub fn tie_fraction(a: &Die, b: &Die) -> f64 {
    f64::from(ties(a, b)) / f64::from(PAIRS)
}

fn count_pairs(a: &Die, b: &Die, pred: impl Fn(i64, i64) -> bool) -> u32 {
    a.faces()
        .iter()
        .flat_map(|x| b.faces().iter().map(move |y| (*x, *y)))
        .filter(|(x, y)| pred(*x, *y))
        .count() as u32
}

/// Win probability of every die (rows) against every die (columns)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProbabilityTable {
    pub dice: Vec<Die>,
    pub cells: Vec<Vec<f64>>,
}

impl ProbabilityTable {
    pub fn build(dice: &DiceSet) -> Self {
        let cells = dice
            .iter()
            .map(|row| dice.iter().map(|col| win_probability(row, col)).collect())
            .collect();
        Self {
            dice: dice.iter().cloned().collect(),
            cells,
        }
    }

    /// Probability that die `row` beats die `col`
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row)?.get(col).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn die(s: &str) -> Die {
        s.parse().unwrap()
    }

    fn non_transitive() -> DiceSet {
        DiceSet::parse(["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap()
    }

    #[test]
    fn test_hand_computed_probability() {
        let a = die("2,2,4,4,9,9");
        let b = die("1,1,6,6,8,8");
        assert_eq!(wins(&a, &b), 20);
        assert_eq!(win_probability(&a, &b), 0.56);
        assert_eq!(win_probability(&b, &a), 0.44);
    }

    #[test]
    fn test_non_transitive_cycle() {
        let dice = non_transitive();
        let (a, b, c) = (
            dice.get(0).unwrap(),
            dice.get(1).unwrap(),
            dice.get(2).unwrap(),
        );
        // A beats B, B beats C, C beats A
        assert!(win_probability(a, b) > 0.5);
        assert!(win_probability(b, c) > 0.5);
        assert!(win_probability(c, a) > 0.5);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let dice = [
            die("2,2,4,4,9,9"),
            die("1,1,6,6,8,8"),
            die("3,3,5,5,7,7"),
            die("1,2,3,4,5,6"),
            die("1,1,1,1,1,1"),
            die("-3,0,2,2,2,10"),
        ];
        for a in &dice {
            for b in &dice {
                assert_eq!(wins(a, b) + wins(b, a) + ties(a, b), 36);
                let sum = win_probability(a, b) + win_probability(b, a) + tie_fraction(a, b);
                assert!((sum - 1.0).abs() <= 0.01, "{} vs {}: {}", a, b, sum);
            }
        }
    }

    #[test]
    fn test_self_matchup() {
        let standard = die("1,2,3,4,5,6");
        assert_eq!(ties(&standard, &standard), 6);
        assert_eq!(win_probability(&standard, &standard), 0.42);
    }

    #[test]
    fn test_table_build() {
        let table = ProbabilityTable::build(&non_transitive());
        assert_eq!(table.cells.len(), 3);
        assert_eq!(table.get(0, 1), Some(0.56));
        assert_eq!(table.get(1, 0), Some(0.44));
        assert_eq!(table.get(3, 0), None);
    }
}

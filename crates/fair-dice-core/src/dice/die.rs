//! Die and the catalogue of dice available in a session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Faces on every die
pub const FACES: usize = 6;

/// Smallest catalogue a game can be played with
pub const MIN_DICE: usize = 3;

/// Errors building a single die
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DieError {
    #[error("A die needs exactly 6 faces, got {0}")]
    InvalidFaceCount(usize),

    #[error("Face {0:?} is not an integer")]
    InvalidFace(String),
}

/// Errors in the startup dice configuration
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("At least 3 dice are required, got {0}")]
    TooFewDice(usize),

    #[error("Die #{position} ({spec:?}): {source}")]
    InvalidDie {
        position: usize,
        spec: String,
        #[source]
        source: DieError,
    },
}

/// Six-sided die with arbitrary integer faces
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct Die([i64; FACES]);

impl Die {
    /// Create a die from its faces
    pub fn new(faces: Vec<i64>) -> Result<Self, DieError> {
        let count = faces.len();
        faces
            .try_into()
            .map(Self)
            .map_err(|_| DieError::InvalidFaceCount(count))
    }

    /// Face at position `index`
    ///
    /// # Panics
    /// If `index >= FACES`.
    pub fn face(&self, index: usize) -> i64 {
        self.0[index]
    }

    /// All faces in order
    pub fn faces(&self) -> &[i64; FACES] {
        &self.0
    }
}

impl TryFrom<Vec<i64>> for Die {
    type Error = DieError;

    fn try_from(faces: Vec<i64>) -> Result<Self, Self::Error> {
        Self::new(faces)
    }
}

impl From<Die> for Vec<i64> {
    fn from(die: Die) -> Self {
        die.0.to_vec()
    }
}

impl FromStr for Die {
    type Err = DieError;

    /// Parse `"2,2,4,4,9,9"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let faces = s
            .split(',')
            .map(|item| {
                let item = item.trim();
                item.parse::<i64>()
                    .map_err(|_| DieError::InvalidFace(item.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(faces)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, face) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", face)?;
        }
        Ok(())
    }
}

/// The dice a session is played with, indexed from 0
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiceSet(Vec<Die>);

impl DiceSet {
    /// Create a catalogue; at least [`MIN_DICE`] dice are required
    pub fn new(dice: Vec<Die>) -> Result<Self, ConfigError> {
        if dice.len() < MIN_DICE {
            return Err(ConfigError::TooFewDice(dice.len()));
        }
        Ok(Self(dice))
    }

    /// Parse one die per spec string, reporting the first malformed one
    pub fn parse<I, S>(specs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dice = specs
            .into_iter()
            .enumerate()
            .map(|(position, spec)| {
                let spec = spec.as_ref();
                spec.parse::<Die>().map_err(|source| ConfigError::InvalidDie {
                    position,
                    spec: spec.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(dice)
    }

    /// Die at `index`
    pub fn get(&self, index: usize) -> Option<&Die> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.0.iter()
    }

    /// Indices still free once `taken` is claimed
    pub fn available(&self, taken: Option<usize>) -> Vec<usize> {
        (0..self.0.len()).filter(|i| Some(*i) != taken).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_die_requires_six_faces() {
        assert_eq!(
            Die::new(vec![1, 2, 3]).unwrap_err(),
            DieError::InvalidFaceCount(3)
        );
        assert_eq!(
            Die::new(vec![1; 7]).unwrap_err(),
            DieError::InvalidFaceCount(7)
        );
        assert!(Die::new(vec![1, 2, 3, 4, 5, 6]).is_ok());
    }

    #[test]
    fn test_die_parse() {
        let die: Die = "2, 2,4,4 ,9,9".parse().unwrap();
        assert_eq!(die.faces(), &[2, 2, 4, 4, 9, 9]);
        assert_eq!(die.face(4), 9);
        assert_eq!(die.to_string(), "2,2,4,4,9,9");
    }

    #[test]
    fn test_die_parse_negative_faces() {
        let die: Die = "-1,0,1,2,3,4".parse().unwrap();
        assert_eq!(die.face(0), -1);
    }

    #[test]
    fn test_die_parse_rejects_non_integer() {
        assert_eq!(
            "1,2,x,4,5,6".parse::<Die>().unwrap_err(),
            DieError::InvalidFace("x".to_string())
        );
        assert_eq!(
            "1,2,3.5,4,5,6".parse::<Die>().unwrap_err(),
            DieError::InvalidFace("3.5".to_string())
        );
        assert_eq!(
            "1,2,,4,5,6".parse::<Die>().unwrap_err(),
            DieError::InvalidFace(String::new())
        );
    }

    #[test]
    fn test_die_parse_rejects_wrong_length() {
        assert_eq!(
            "1,2,3,4,5".parse::<Die>().unwrap_err(),
            DieError::InvalidFaceCount(5)
        );
    }

    #[test]
    fn test_dice_set_requires_three() {
        let err = DiceSet::parse(["1,2,3,4,5,6", "1,2,3,4,5,6"]).unwrap_err();
        assert_eq!(err, ConfigError::TooFewDice(2));
    }

    #[test]
    fn test_dice_set_reports_bad_spec() {
        let err = DiceSet::parse(["1,2,3,4,5,6", "1,2,3", "1,2,3,4,5,6"]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDie {
                position: 1,
                spec: "1,2,3".to_string(),
                source: DieError::InvalidFaceCount(3),
            }
        );
    }

    #[test]
    fn test_dice_set_available() {
        let dice = DiceSet::parse(["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap();
        assert_eq!(dice.len(), 3);
        assert_eq!(dice.available(None), vec![0, 1, 2]);
        assert_eq!(dice.available(Some(1)), vec![0, 2]);
        assert!(dice.get(3).is_none());
    }

    #[test]
    fn test_die_serde_as_list() {
        let die: Die = "1,2,3,4,5,6".parse().unwrap();
        let json = serde_json::to_string(&die).unwrap();
        assert_eq!(json, "[1,2,3,4,5,6]");
        assert!(serde_json::from_str::<Die>("[1,2]").is_err());
    }
}

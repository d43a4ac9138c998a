//! Card attributes: colour, direction, face and usage.
//!
//! A card may carry one or two colours; single-colour cards matter to
//! several skills, so colour sets are kept inline in a `SmallVec`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Card colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    Black,
    Red,
    Blue,
}

impl std::fmt::Display for CardColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardColor::Black => "black",
            CardColor::Red => "red",
            CardColor::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Colours printed on a card. At most two.
pub type ColorSet = SmallVec<[CardColor; 2]>;

/// Direction a message travels when sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardDirection {
    /// Passed directly to a chosen player.
    #[default]
    Up,
    /// Passed counter-clockwise.
    Left,
    /// Passed clockwise.
    Right,
}

impl std::fmt::Display for CardDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CardDirection::Up => "直达",
            CardDirection::Left => "左",
            CardDirection::Right => "右",
        })
    }
}

/// Which face of the card is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    #[default]
    FaceUp,
    FaceDown,
}

impl CardStatus {
    /// The opposite face.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            CardStatus::FaceUp => CardStatus::FaceDown,
            CardStatus::FaceDown => CardStatus::FaceUp,
        }
    }
}

/// What role the card is currently playing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardUsage {
    #[default]
    Unknown,
    /// Played for its effect.
    FunctionCard,
    /// Sent as a message.
    MessageCard,
    /// Sitting in a hand.
    HandCard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_status_flip() {
        assert_eq!(CardStatus::FaceUp.flipped(), CardStatus::FaceDown);
        assert_eq!(CardStatus::FaceDown.flipped(), CardStatus::FaceUp);
    }

    #[test]
    fn test_color_set_inline() {
        let colors: ColorSet = smallvec![CardColor::Red, CardColor::Black];
        assert!(!colors.spilled());
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].to_string(), "red");
    }
}

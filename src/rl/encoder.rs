use crate::game::Position;
use std::fmt;

/// Lookup key for a game situation as the agent sees it: the food
/// coordinates followed by every snake segment head first, all joined
/// with commas.
///
/// The starting layout on a 10x10 grid encodes to `"8,5,3,5,2,5,1,5"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(String);

impl StateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode a situation into its table key. Two situations share a key
/// exactly when the food and the full body match.
pub fn encode_state(food: Position, body: &[Position]) -> StateKey {
    let mut parts = Vec::with_capacity(2 + body.len() * 2);
    parts.push(food.x.to_string());
    parts.push(food.y.to_string());
    for segment in body {
        parts.push(segment.x.to_string());
        parts.push(segment.y.to_string());
    }
    StateKey(parts.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout_key() {
        let body = vec![
            Position::new(3, 5),
            Position::new(2, 5),
            Position::new(1, 5),
        ];
        let key = encode_state(Position::new(8, 5), &body);

        assert_eq!(key.as_str(), "8,5,3,5,2,5,1,5");
    }

    #[test]
    fn test_key_covers_every_segment() {
        let body = vec![
            Position::new(4, 4),
            Position::new(4, 5),
            Position::new(4, 6),
            Position::new(5, 6),
        ];
        let key = encode_state(Position::new(7, 2), &body);

        assert_eq!(key.as_str(), "7,2,4,4,4,5,4,6,5,6");
    }

    #[test]
    fn test_food_position_distinguishes_keys() {
        let body = vec![Position::new(3, 5)];

        let a = encode_state(Position::new(8, 5), &body);
        let b = encode_state(Position::new(5, 8), &body);

        assert_ne!(a, b);
    }

    #[test]
    fn test_display_matches_inner_text() {
        let key = encode_state(Position::new(1, 2), &[Position::new(3, 4)]);

        assert_eq!(key.to_string(), key.as_str());
    }
}

use crate::abstraction::Encoder;
use crate::gameplay::State;

/// Names an information set: the public betting so far and the bucket
/// of what the seat to move can see.
///
/// Different deals that share a history and a bucket share a key; that
/// is the whole point of the abstraction.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct InfosetKey(String);

impl InfosetKey {
    pub fn new(state: &State, encoder: &dyn Encoder) -> Self {
        let bucket = encoder.bucket(state.actor().hole(), state.board());
        Self(format!("{}|{}", state.history(), bucket))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for InfosetKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for InfosetKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl std::fmt::Display for InfosetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstraction::Lossless;
    use crate::cards::Card;
    use crate::cards::Hand;
    use crate::gameplay::Node;
    use crate::gameplay::Rules;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::sync::Arc;

    /// buckets by board size alone
    struct Constant;
    impl Encoder for Constant {
        fn bucket(&self, _: Hand, board: &[Card]) -> usize {
            board.len()
        }
    }

    #[test]
    fn keys_join_history_and_bucket() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let root = Node::root(Arc::new(Rules::default()));
        let play = root.children(rng).remove(0);
        let key = InfosetKey::new(play.state(), &Constant);
        assert_eq!(key.as_str(), "|0");
        let raised = play.children(rng).remove(0);
        let key = InfosetKey::new(raised.state(), &Constant);
        assert!(key.as_str().starts_with('r'));
        assert!(key.as_str().ends_with("|0"));
    }

    #[test]
    fn different_deals_can_share_a_key() {
        let encoder = Lossless::default();
        let rules = Arc::new(Rules::default());
        let keys = (0..200)
            .map(|seed| SmallRng::seed_from_u64(seed))
            .map(|ref mut rng| Node::root(rules.clone()).children(rng).remove(0))
            .map(|play| InfosetKey::new(play.state(), &encoder))
            .collect::<std::collections::HashSet<_>>();
        assert!(keys.len() <= 169);
        assert!(keys.len() > 1);
    }
}

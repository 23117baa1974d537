use crate::Chips;

/// A betting decision. Amounts are the chips the acting seat adds
/// to its bet with this action, not the size it bets to.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Action {
    Fold,
    Call(Chips),
    Raise(Chips),
    AllIn(Chips),
}

impl Action {
    pub fn chips(&self) -> Chips {
        match self {
            Self::Fold => 0,
            Self::Call(x) | Self::Raise(x) | Self::AllIn(x) => *x,
        }
    }
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Self::Raise(_) | Self::AllIn(_))
    }
    /// compact token used to serialize betting histories
    pub fn token(&self) -> String {
        match self {
            Self::Fold => "f".to_string(),
            Self::Call(0) => "k".to_string(),
            Self::Call(_) => "c".to_string(),
            Self::Raise(x) => format!("r{}", x),
            Self::AllIn(_) => "a".to_string(),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fold => write!(f, "FOLD"),
            Self::Call(0) => write!(f, "CHECK"),
            Self::Call(x) => write!(f, "CALL  {}", x),
            Self::Raise(x) => write!(f, "RAISE {}", x),
            Self::AllIn(x) => write!(f, "SHOVE {}", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_distinct() {
        let actions = [
            Action::Fold,
            Action::Call(0),
            Action::Call(100),
            Action::Raise(300),
            Action::Raise(600),
            Action::AllIn(9_900),
        ];
        let tokens = actions.iter().map(Action::token).collect::<std::collections::HashSet<_>>();
        assert_eq!(tokens.len(), actions.len());
    }

    #[test]
    fn check_is_a_free_call() {
        assert_eq!(Action::Call(0).to_string(), "CHECK");
        assert_eq!(Action::Call(0).chips(), 0);
        assert!(!Action::Call(50).is_aggressive());
        assert!(Action::AllIn(50).is_aggressive());
    }
}

/// What happens to the odd chips when a pot does not split evenly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Remainder {
    /// integer division only; odd chips leave the table
    Discard,
    /// odd chips go one each to the winners nearest the dealer's left
    #[default]
    Leftmost,
}

impl std::fmt::Display for Remainder {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Discard => write!(f, "discard"),
            Self::Leftmost => write!(f, "leftmost"),
        }
    }
}

impl TryFrom<&str> for Remainder {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "discard" => Ok(Self::Discard),
            "leftmost" => Ok(Self::Leftmost),
            _ => Err(format!("invalid remainder policy: {}", s)),
        }
    }
}

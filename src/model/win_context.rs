use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredYaku {
    pub name: String,
    pub fan: usize, // han, or yakuman multiplier for yakuman entries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub payer: Tnum, // seat wind of the paying player
    pub amount: Point,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinResult {
    pub yakus: Vec<ScoredYaku>, // yaku list (dora included)
    pub fu: usize,
    pub fan: usize,            // han (dora included), 0 for yakuman
    pub yakuman: usize,        // yakuman multiplier (0: normal, 1: yakuman, 2: double, ...)
    pub base_point: Point,     // capped base points
    pub payments: Vec<Payment>, // honba included
    pub score: Point,          // value of the hand without honba and riichi sticks
    pub total: Point,          // everything the winner collects
    pub title: String,         // Mangan, Haneman, ...
    pub is_limit: bool,        // mangan or above
    pub decomposition: Decomposition,
    pub wait: Wait,
}

// Outcome of a completion test. Not winning is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    NoDecomposition { shanten: i32 },
    NoQualifyingYaku,
    Win(WinResult),
}

impl Verdict {
    pub fn win(&self) -> Option<&WinResult> {
        match self {
            Verdict::Win(w) => Some(w),
            _ => None,
        }
    }
}

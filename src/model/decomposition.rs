use super::*;

use SetPairType::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetPairType {
    Pair,
    Shuntsu, // concealed sequence
    Koutsu,  // concealed triplet
    Chii,
    Pon,
    Minkan, // open quad (daiminkan + kakan)
    Ankan,
}

// Tile is the lowest tile for Shuntsu and Chii
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPair(pub SetPairType, pub Tile);

impl SetPair {
    #[inline]
    pub fn is_sequence(&self) -> bool {
        matches!(self.0, Shuntsu | Chii)
    }

    #[inline]
    pub fn is_triplet(&self) -> bool {
        matches!(self.0, Koutsu | Pon | Minkan | Ankan)
    }

    #[inline]
    pub fn is_concealed(&self) -> bool {
        matches!(self.0, Pair | Shuntsu | Koutsu)
    }

    // the set contains a tile of the same kind
    pub fn contains(&self, t: Tile) -> bool {
        let t = t.to_normal();
        if self.1 .0 != t.0 {
            return false;
        }
        if self.is_sequence() {
            self.1 .1 <= t.1 && t.1 < self.1 .1 + 3
        } else {
            self.1 .1 == t.1
        }
    }

    // any tile of the set is a terminal or an honor
    pub fn has_end(&self) -> bool {
        if self.is_sequence() {
            self.1 .1 == 1 || self.1 .1 == 7
        } else {
            self.1.is_end()
        }
    }
}

pub type ParsedHand = Vec<SetPair>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Normal,       // 4 sets + pair
    Chiitoitsu,   // seven pairs
    Kokushimusou, // thirteen orphans
}

// One way to read a complete hand.
// Normal: concealed sets first, declared melds are appended by the evaluator.
// Chiitoitsu: 7 pairs. Kokushimusou: the duplicated tile as a single pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    pub shape: Shape,
    pub sets: ParsedHand,
}

impl Decomposition {
    pub fn pair_tile(&self) -> Option<Tile> {
        self.sets.iter().find(|sp| sp.0 == Pair).map(|sp| sp.1)
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self
            .sets
            .iter()
            .map(|SetPair(tp, t)| format!("{:?}({})", tp, t))
            .collect();
        write!(f, "{:?}[{}]", self.shape, s.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wait {
    Ryanmen, // two-sided
    Kanchan, // closed
    Penchan, // edge
    Shanpon, // dual pon
    Tanki,   // single
    Kokushi, // thirteen orphans (single or 13-sided)
}

impl Wait {
    // wait of a concealed set completed by `wt`
    pub fn of(sp: &SetPair, wt: Tile) -> Self {
        let wt = wt.to_normal();
        match sp.0 {
            Pair => Wait::Tanki,
            Shuntsu => {
                let n = sp.1 .1;
                if wt.1 == n + 1 {
                    Wait::Kanchan
                } else if (wt.1 == n + 2 && n == 1) || (wt.1 == n && n == 7) {
                    Wait::Penchan
                } else {
                    Wait::Ryanmen
                }
            }
            _ => Wait::Shanpon,
        }
    }
}

#[test]
fn test_wait_of() {
    let sp = SetPair(Shuntsu, Tile(TM, 1));
    assert_eq!(Wait::of(&sp, Tile(TM, 3)), Wait::Penchan);
    assert_eq!(Wait::of(&sp, Tile(TM, 1)), Wait::Ryanmen);
    assert_eq!(Wait::of(&sp, Tile(TM, 2)), Wait::Kanchan);
    let sp = SetPair(Shuntsu, Tile(TP, 7));
    assert_eq!(Wait::of(&sp, Tile(TP, 7)), Wait::Penchan);
    assert_eq!(Wait::of(&sp, Tile(TP, 9)), Wait::Ryanmen);
    let sp = SetPair(Shuntsu, Tile(TS, 3));
    assert_eq!(Wait::of(&sp, Tile(TS, 0)), Wait::Ryanmen);
    assert_eq!(Wait::of(&SetPair(Koutsu, Tile(TZ, DW)), Tile(TZ, DW)), Wait::Shanpon);
    assert!(SetPair(Shuntsu, Tile(TS, 3)).contains(Tile(TS, 0)));
    assert!(!SetPair(Chii, Tile(TS, 3)).contains(Tile(TP, 4)));
}

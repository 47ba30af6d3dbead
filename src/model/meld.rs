use super::*;
use crate::error::{EvalError, EvalResult};
use crate::util::misc::vec_to_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi,
    Pon,
    Minkan,
    Kakan,
    Ankan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<Tile>,
}

impl Meld {
    // checks that the tiles actually form the declared group
    pub fn new(meld_type: MeldType, mut tiles: Vec<Tile>) -> EvalResult<Self> {
        tiles.sort();
        let invalid = |reason: &str| EvalError::MalformedHand {
            reason: format!("{} {:?}: {}", reason, meld_type, vec_to_string(&tiles)),
        };

        if tiles.iter().any(|t| !t.is_valid()) {
            return Err(invalid("invalid tile in meld"));
        }
        let ns: Vec<Tnum> = tiles.iter().map(|t| t.to_normal().1).collect();
        let same_type = tiles.iter().all(|t| t.0 == tiles[0].0);
        match meld_type {
            MeldType::Chi => {
                if ns.len() != 3 || !same_type || tiles[0].is_hornor() {
                    return Err(invalid("not a sequence"));
                }
                let mut ns = ns;
                ns.sort();
                if ns[1] != ns[0] + 1 || ns[2] != ns[1] + 1 {
                    return Err(invalid("not a sequence"));
                }
            }
            MeldType::Pon => {
                if ns.len() != 3 || !same_type || ns.iter().any(|&n| n != ns[0]) {
                    return Err(invalid("not a triplet"));
                }
            }
            MeldType::Minkan | MeldType::Kakan | MeldType::Ankan => {
                if ns.len() != 4 || !same_type || ns.iter().any(|&n| n != ns[0]) {
                    return Err(invalid("not a quad"));
                }
            }
        }

        Ok(Self { meld_type, tiles })
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.meld_type != MeldType::Ankan
    }

    #[inline]
    pub fn is_kan(&self) -> bool {
        matches!(
            self.meld_type,
            MeldType::Minkan | MeldType::Kakan | MeldType::Ankan
        )
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self.tiles.iter().map(|t| t.to_string()).collect();
        write!(f, "{:?}({})", self.meld_type, s.join("|"))
    }
}

// "m123" (chi), "p555" (pon), "z7777" (open quad), "s5555+" (closed quad)
// a '+' suffix on a quad marks it concealed
pub fn meld_from_string(exp: &str) -> EvalResult<Meld> {
    let (exp_tiles, closed) = match exp.strip_suffix('+') {
        Some(e) => (e, true),
        None => (exp, false),
    };
    let tiles = tiles_from_string(exp_tiles)?;
    let mut ns: Vec<Tnum> = tiles.iter().map(|t| t.to_normal().1).collect();
    ns.sort();
    ns.dedup();

    let meld_type = match (tiles.len(), ns.len()) {
        (3, 3) => MeldType::Chi,
        (3, 1) => MeldType::Pon,
        (4, 1) => {
            if closed {
                MeldType::Ankan
            } else {
                MeldType::Minkan
            }
        }
        _ => return Err(EvalError::parse(exp, "invalid meld")),
    };
    if closed && meld_type != MeldType::Ankan {
        return Err(EvalError::parse(exp, "'+' suffix is only allowed on quads"));
    }

    Meld::new(meld_type, tiles)
}

#[test]
fn test_meld_from_string() {
    let m = meld_from_string("m342").unwrap();
    assert_eq!(m.meld_type, MeldType::Chi);
    assert_eq!(m.tiles, vec![Tile(TM, 2), Tile(TM, 3), Tile(TM, 4)]);
    assert!(m.is_open());

    let m = meld_from_string("p0555+").unwrap();
    assert_eq!(m.meld_type, MeldType::Ankan);
    assert!(!m.is_open());
    assert!(m.is_kan());

    assert!(meld_from_string("m124").is_err());
    assert!(meld_from_string("z123").is_err()); // honors never form sequences
    assert!(meld_from_string("m111+").is_err());
    assert!(Meld::new(MeldType::Pon, vec![Tile(TM, 1), Tile(TM, 1), Tile(TP, 1)]).is_err());
}

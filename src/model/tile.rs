use serde::{de, ser};

use super::*;
use crate::error::{EvalError, EvalResult};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)
pub const Z8: Tile = Tile(TZ, UK); // unknown tile

impl Tile {
    pub fn from_symbol(s: &str) -> EvalResult<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(EvalError::parse(s, "tile symbol must be 2 chars"));
        }
        let ti = tile_type_from_char(chars[0]).map_err(|m| EvalError::parse(s, &m))?;
        let ni = chars[1]
            .to_digit(10)
            .ok_or_else(|| EvalError::parse(s, "tile number is not a digit"))?
            as Tnum;
        let t = Self(ti, ni);
        if !t.is_valid() {
            return Err(EvalError::parse(s, "no such tile"));
        }
        Ok(t)
    }

    // red 5 is returned as a normal 5, other tiles as is
    #[inline]
    pub fn to_normal(self) -> Self {
        if self.1 == 0 {
            Self(self.0, 5)
        } else {
            self
        }
    }

    pub fn is_valid(&self) -> bool {
        match self.0 {
            TM | TP | TS => self.1 < TNUM,
            TZ => (WE..=DR).contains(&self.1),
            _ => false,
        }
    }

    // suit tile
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // honor tile
    #[inline]
    pub fn is_hornor(&self) -> bool {
        self.0 == TZ
    }

    // 1 or 9
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.0 != TZ && (self.1 == 1 || self.1 == 9)
    }

    // terminal or honor
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 2~8
    #[inline]
    pub fn is_simple(&self) -> bool {
        !self.is_end()
    }

    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && self.1 <= WN
    }

    #[inline]
    pub fn is_doragon(&self) -> bool {
        self.0 == TZ && DW <= self.1 && self.1 <= DR
    }

    // tile pointed to by this tile as a dora indicator
    pub fn indicated_dora(&self) -> Self {
        let ni = if self.is_hornor() {
            match self.1 {
                WN => WE,
                DR => DW,
                i => i + 1,
            }
        } else {
            match self.1 {
                9 => 1,
                0 => 6,
                n => n + 1,
            }
        };
        Self(self.0, ni)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ['m', 'p', 's', 'z'][self.0], self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 != other.0 {
            return self.0.cmp(&other.0);
        }

        // red 5 sorts right before the normal 5
        let a = if self.1 == 0 { (5, 0) } else { (self.1, 1) };
        let b = if other.1 == 0 { (5, 0) } else { (other.1, 1) };
        a.cmp(&b)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

pub fn tile_type_from_char(c: char) -> Result<Type, String> {
    Ok(match c {
        'm' => TM,
        'p' => TP,
        's' => TS,
        'z' => TZ,
        _ => return Err(format!("invalid tile type: '{}'", c)),
    })
}

// [TileTable]
// column 0 counts red fives only, column 5 counts every five (red included)
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

pub fn inc_tile(tt: &mut TileTable, tile: Tile) {
    let t = tile;
    tt[t.0][t.1] += 1;
    if t.1 == 0 {
        tt[t.0][5] += 1;
    }
}

pub fn dec_tile(tt: &mut TileTable, tile: Tile) {
    let t = tile;
    tt[t.0][t.1] -= 1;
    if t.1 == 0 {
        tt[t.0][5] -= 1;
    }
}

pub fn count_tiles(tt: &TileTable) -> usize {
    tt.iter().map(|tr| tr[1..].iter().sum::<usize>()).sum()
}

pub fn tiles_from_tile_table(tt: &TileTable) -> Vec<Tile> {
    let mut hand = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            for c in 0..tt[ti][ni] {
                if ti != TZ && ni == 5 && c < tt[ti][0] {
                    hand.push(Tile(ti, 0));
                } else {
                    hand.push(Tile(ti, ni));
                }
            }
        }
    }
    hand
}

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for &t in tiles {
        inc_tile(&mut tt, t);
    }
    tt
}

// "m123p0s55z11" style expression
pub fn tiles_from_string(exp: &str) -> EvalResult<Vec<Tile>> {
    let mut tiles = vec![];
    let mut ti = None;
    for c in exp.chars() {
        match c {
            'm' | 'p' | 's' | 'z' => {
                ti = Some(tile_type_from_char(c).map_err(|m| EvalError::parse(exp, &m))?)
            }
            '0'..='9' => {
                let ti = ti.ok_or_else(|| EvalError::parse(exp, "tile number before tile type"))?;
                let t = Tile(ti, c as usize - '0' as usize);
                if !t.is_valid() {
                    return Err(EvalError::parse(exp, &format!("no such tile: {}", t)));
                }
                tiles.push(t);
            }
            _ => return Err(EvalError::parse(exp, &format!("invalid char: '{}'", c))),
        }
    }
    Ok(tiles)
}

pub fn wind_from_char(c: char) -> Result<Tnum, String> {
    Ok(match c {
        'E' => WE,
        'S' => WS,
        'W' => WW,
        'N' => WN,
        _ => return Err(format!("invalid wind symbol: {}", c)),
    })
}

#[test]
fn test_tiletable() {
    let hand = tiles_from_string("m34777p1230567z66").unwrap();
    let tt = tiles_to_tile_table(&hand);
    assert_eq!(tt[TP][0], 1);
    assert_eq!(tt[TP][5], 2);
    assert_eq!(count_tiles(&tt), 14);
    let mut hand2 = tiles_from_tile_table(&tt);
    let mut hand = hand;
    hand.sort();
    hand2.sort();
    assert_eq!(hand, hand2);
}

#[test]
fn test_tile_symbol() {
    assert_eq!(Tile::from_symbol("p0").unwrap(), Tile(TP, 0));
    assert_eq!(Tile::from_symbol("z7").unwrap(), Tile(TZ, DR));
    assert!(Tile::from_symbol("z8").is_err());
    assert!(Tile::from_symbol("x1").is_err());
    assert!(tiles_from_string("12m").is_err());

    let json = serde_json::to_string(&Tile(TS, 0)).unwrap();
    assert_eq!(json, "\"s0\"");
    let t: Tile = serde_json::from_str("\"m9\"").unwrap();
    assert_eq!(t, Tile(TM, 9));
}

#[test]
fn test_indicated_dora() {
    assert_eq!(Tile(TM, 9).indicated_dora(), Tile(TM, 1));
    assert_eq!(Tile(TP, 0).indicated_dora(), Tile(TP, 6));
    assert_eq!(Tile(TZ, WN).indicated_dora(), Tile(TZ, WE));
    assert_eq!(Tile(TZ, DR).indicated_dora(), Tile(TZ, DW));
    assert_eq!(Tile(TZ, DW).indicated_dora(), Tile(TZ, DG));
}

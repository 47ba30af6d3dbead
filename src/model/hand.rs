use super::*;
use crate::error::{EvalError, EvalResult};

// Hand snapshot handed over by the session: concealed tiles and declared melds.
// The tile under evaluation is passed separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub tiles: TileTable,
    pub melds: Vec<Meld>,
}

impl Hand {
    pub fn new(tiles: &[Tile], melds: Vec<Meld>) -> Self {
        Self {
            tiles: tiles_to_tile_table(tiles),
            melds,
        }
    }

    // "m123p456s789z11m2,p555" : concealed tiles followed by melds
    pub fn from_string(exp: &str) -> EvalResult<Self> {
        let mut it = exp.split(',');
        let tiles = tiles_from_string(it.next().unwrap_or(""))?;
        let melds = it.map(meld_from_string).collect::<EvalResult<Vec<_>>>()?;
        Ok(Self::new(&tiles, melds))
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.melds.iter().any(|m| m.is_open())
    }

    #[inline]
    pub fn count_kan(&self) -> usize {
        self.melds.iter().filter(|m| m.is_kan()).count()
    }

    // every tile the player holds: concealed + melds (+ extra tile)
    pub fn table_with(&self, extra: Option<Tile>) -> TileTable {
        let mut tt = self.tiles;
        for m in &self.melds {
            for &t in &m.tiles {
                inc_tile(&mut tt, t);
            }
        }
        if let Some(t) = extra {
            inc_tile(&mut tt, t);
        }
        tt
    }

    // Rejects hands that cannot exist at the table.
    // `extra` is the tile under evaluation, if any.
    pub fn validate(&self, extra: Option<Tile>) -> EvalResult<()> {
        let malformed = |reason: String| Err(EvalError::MalformedHand { reason });

        let n = count_tiles(&self.tiles) + 3 * self.melds.len();
        let valid_count = match extra {
            Some(_) => n == 13,
            None => n == 13 || n == 14,
        };
        if !valid_count {
            return malformed(format!(
                "{} concealed tiles with {} melds",
                count_tiles(&self.tiles),
                self.melds.len()
            ));
        }
        if self.melds.len() > 4 {
            return malformed(format!("{} melds declared", self.melds.len()));
        }
        if let Some(t) = extra {
            if !t.is_valid() {
                return malformed(format!("invalid tested tile: {}", t));
            }
        }

        let tt = self.table_with(extra);
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if tt[ti][ni] > TILE {
                    return malformed(format!("{} copies of {}", tt[ti][ni], Tile(ti, ni)));
                }
            }
            if ti == TZ {
                if tt[ti][0] + tt[ti][UK] + tt[ti][9] != 0 {
                    return malformed("invalid honor tile".to_string());
                }
            } else if tt[ti][0] > RED5_PER_SUIT || tt[ti][0] > tt[ti][5] {
                return malformed(format!("{} red fives in {}", tt[ti][0], ['m', 'p', 's'][ti]));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in tiles_from_tile_table(&self.tiles) {
            write!(f, "{}", t)?;
        }
        for m in &self.melds {
            write!(f, " {}", m)?;
        }
        Ok(())
    }
}

#[test]
fn test_hand_validate() {
    let h = Hand::from_string("m123456789p11199").unwrap();
    assert!(h.validate(None).is_ok()); // 14 tiles, no tested tile
    assert!(h.validate(Some(Tile(TP, 9))).is_err());

    let h = Hand::from_string("m123456789p1199").unwrap();
    assert!(h.validate(Some(Tile(TP, 9))).is_ok());
    assert!(h.validate(None).is_ok());

    let h = Hand::from_string("m1111234p111999").unwrap();
    assert!(h.validate(None).is_ok());
    assert!(matches!(
        h.validate(Some(Tile(TM, 1))),
        Err(EvalError::MalformedHand { .. })
    ));

    // supply counts melds too
    let h = Hand::from_string("m1234p1199s11,m111").unwrap();
    assert!(h.validate(Some(Tile(TS, 1))).is_ok());
    let h = Hand::from_string("m1234p1199s11,m1111").unwrap();
    assert!(h.validate(Some(Tile(TM, 1))).is_err());

    // two red fives of one suit
    let h = Hand::from_string("m00123p111999s11").unwrap();
    assert!(h.validate(None).is_err());

    let h = Hand::from_string("m123p456").unwrap();
    assert!(h.validate(None).is_err());
}

use serde::{Deserialize, Serialize};

use crate::model::*;

// Number of tile exchanges needed to reach tenpai.
// -1: complete, 0: tenpai, n: n exchanges away from tenpai.
// chiitoitsu and kokushimusou are only defined for hands without melds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shanten {
    pub normal: i32,
    pub chiitoitsu: Option<i32>,
    pub kokushimusou: Option<i32>,
}

impl Shanten {
    pub fn min(&self) -> i32 {
        [self.chiitoitsu, self.kokushimusou]
            .iter()
            .flatten()
            .fold(self.normal, |a, &b| a.min(b))
    }
}

// `hand` holds the concealed tiles only (13 or 14 minus 3 per meld).
pub fn calc_shanten(hand: &TileTable, n_melds: usize) -> Shanten {
    let (chiitoitsu, kokushimusou) = if n_melds == 0 {
        (
            Some(calc_chiitoitsu_shanten(hand)),
            Some(calc_kokushimusou_shanten(hand)),
        )
    } else {
        (None, None)
    };

    Shanten {
        normal: calc_normal_shanten(hand, n_melds),
        chiitoitsu,
        kokushimusou,
    }
}

pub fn calc_normal_shanten(hand: &TileTable, n_melds: usize) -> i32 {
    let mut tt = *hand;
    for tr in tt.iter_mut() {
        tr[0] = 0; // red fives are already counted in column 5
    }

    let mut best = 8;
    let mut blocks = Blocks {
        sets: n_melds,
        partials: 0,
        pair: false,
    };
    search(&mut tt, 0, 1, &mut blocks, &mut best);
    best
}

pub fn calc_chiitoitsu_shanten(hand: &TileTable) -> i32 {
    let (mut kinds, mut pairs): (i32, i32) = (0, 0);
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match hand[ti][ni] {
                0 => {}
                1 => kinds += 1,
                _ => {
                    kinds += 1;
                    pairs += 1;
                }
            }
        }
    }

    // seven distinct kinds are required
    6 - pairs + (7 - kinds).max(0)
}

pub fn calc_kokushimusou_shanten(hand: &TileTable) -> i32 {
    let (mut kinds, mut has_pair) = (0, false);
    let mut check = |n: usize| {
        if n > 0 {
            kinds += 1;
        }
        if n > 1 {
            has_pair = true;
        }
    };
    for ti in 0..TZ {
        check(hand[ti][1]);
        check(hand[ti][9]);
    }
    for ni in WE..=DR {
        check(hand[TZ][ni]);
    }

    13 - kinds - has_pair as i32
}

// sets include declared melds, partials are incomplete sets (taatsu)
struct Blocks {
    sets: usize,
    partials: usize,
    pair: bool,
}

impl Blocks {
    fn shanten(&self) -> i32 {
        let partials = self.partials.min(4usize.saturating_sub(self.sets));
        8 - 2 * self.sets as i32 - partials as i32 - self.pair as i32
    }

    #[inline]
    fn has_room(&self) -> bool {
        self.sets + self.partials < 4
    }
}

fn next_kind(tt: &TileTable, mut ti: Type, mut ni: Tnum) -> Option<(Type, Tnum)> {
    while ti < TYPE {
        if ni >= TNUM {
            ti += 1;
            ni = 1;
            continue;
        }
        if tt[ti][ni] > 0 {
            return Some((ti, ni));
        }
        ni += 1;
    }
    None
}

// Depth-first search over the kinds in order. At each kind, every way to
// take a group starting there is tried before leaving the rest isolated.
fn search(tt: &mut TileTable, ti: Type, ni: Tnum, b: &mut Blocks, best: &mut i32) {
    if *best == -1 {
        return;
    }
    let (ti, ni) = match next_kind(tt, ti, ni) {
        Some(k) => k,
        None => {
            *best = (*best).min(b.shanten());
            return;
        }
    };

    let tr = tt[ti];
    let is_suit = ti != TZ;

    // complete sets
    if tr[ni] >= 3 {
        tt[ti][ni] -= 3;
        b.sets += 1;
        search(tt, ti, ni, b, best);
        b.sets -= 1;
        tt[ti][ni] += 3;
    }
    if is_suit && ni <= 7 && tr[ni + 1] > 0 && tr[ni + 2] > 0 {
        take(tt, ti, &[ni, ni + 1, ni + 2]);
        b.sets += 1;
        search(tt, ti, ni, b, best);
        b.sets -= 1;
        give(tt, ti, &[ni, ni + 1, ni + 2]);
    }

    // pair
    if tr[ni] >= 2 && !b.pair {
        tt[ti][ni] -= 2;
        b.pair = true;
        search(tt, ti, ni, b, best);
        b.pair = false;
        tt[ti][ni] += 2;
    }

    // partial sets
    if b.has_room() {
        let mut partials = vec![];
        if tr[ni] >= 2 {
            partials.push([ni, ni]);
        }
        if is_suit && ni <= 8 && tr[ni + 1] > 0 {
            partials.push([ni, ni + 1]);
        }
        if is_suit && ni <= 7 && tr[ni + 2] > 0 {
            partials.push([ni, ni + 2]);
        }
        for p in &partials {
            take(tt, ti, p);
            b.partials += 1;
            search(tt, ti, ni, b, best);
            b.partials -= 1;
            give(tt, ti, p);
        }
    }

    // the remaining copies of this kind stay isolated
    let n = tt[ti][ni];
    tt[ti][ni] = 0;
    search(tt, ti, ni + 1, b, best);
    tt[ti][ni] = n;
}

#[inline]
fn take(tt: &mut TileTable, ti: Type, nis: &[Tnum]) {
    for &ni in nis {
        tt[ti][ni] -= 1;
    }
}

#[inline]
fn give(tt: &mut TileTable, ti: Type, nis: &[Tnum]) {
    for &ni in nis {
        tt[ti][ni] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::super::win::{calc_tiles_to_normal_win, is_normal_win};
    use super::*;
    use rand::prelude::*;

    fn table(exp: &str) -> TileTable {
        tiles_to_tile_table(&tiles_from_string(exp).unwrap())
    }

    #[test]
    fn test_normal_shanten() {
        assert_eq!(calc_normal_shanten(&table("m123456789p12399"), 0), -1);
        assert_eq!(calc_normal_shanten(&table("m123456789p2399"), 0), 0);
        assert_eq!(calc_normal_shanten(&table("m123456789p13s1z1"), 0), 1);
        // red five groups as a five
        assert_eq!(calc_normal_shanten(&table("m123406789p2399"), 0), 0);
        // one declared meld
        assert_eq!(calc_normal_shanten(&table("m123p456s78z11"), 1), 0);
        assert_eq!(calc_normal_shanten(&table("m123p456s789z11"), 1), -1);
    }

    #[test]
    fn test_special_shanten() {
        let sh = calc_shanten(&table("m1199p2288s3377z1"), 0);
        assert_eq!(sh.chiitoitsu, Some(0));
        assert_eq!(sh.min(), 0);

        // four of a kind is a single pair
        assert_eq!(calc_chiitoitsu_shanten(&table("m1111p2288s3377z1")), 2);

        let sh = calc_shanten(&table("m19p19s19z1234567"), 0);
        assert_eq!(sh.kokushimusou, Some(0));
        assert_eq!(calc_kokushimusou_shanten(&table("m119p19s19z1234567")), -1);
        assert_eq!(calc_kokushimusou_shanten(&table("m159p159s159z12345")), 2);

        let sh = calc_shanten(&table("m123p456s78z11"), 1);
        assert_eq!(sh.chiitoitsu, None);
        assert_eq!(sh.kokushimusou, None);
        assert_eq!(sh.min(), sh.normal);
    }

    // complete hands built from random sets are -1, and every 13-tile
    // subset of them is tenpai with at least one winning tile
    #[test]
    fn test_random_complete_hands() {
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(56);
        for _ in 0..300 {
            let mut tt = TileTable::default();
            let mut n_set = 0;
            while n_set < 5 {
                let ti = rng.gen_range(0..TYPE);
                let ni = if ti == TZ {
                    rng.gen_range(WE..=DR)
                } else {
                    rng.gen_range(1..=7)
                };
                let mut tt2 = tt;
                if n_set == 4 {
                    tt2[ti][ni] += 2;
                } else if ti != TZ && rng.gen_bool(0.6) {
                    (0..3).for_each(|i| tt2[ti][ni + i] += 1);
                } else {
                    tt2[ti][ni] += 3;
                }
                if tt2.iter().all(|tr| tr.iter().all(|&n| n <= TILE)) {
                    tt = tt2;
                    n_set += 1;
                }
            }
            assert!(is_normal_win(&tt));
            assert_eq!(calc_normal_shanten(&tt, 0), -1);

            for t in tiles_from_tile_table(&tt) {
                let mut tt2 = tt;
                dec_tile(&mut tt2, t);
                assert_eq!(calc_normal_shanten(&tt2, 0), 0);
                assert!(!calc_tiles_to_normal_win(&tt2).is_empty());
            }
        }
    }

    // any 13-tile hand with a winning tile is tenpai
    #[test]
    fn test_random_dealt_hands() {
        let mut wall = vec![];
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if ti == TZ && ni > DR {
                    break;
                }
                for _ in 0..TILE {
                    wall.push(Tile(ti, ni));
                }
            }
        }
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(78);
        for _ in 0..500 {
            wall.shuffle(&mut rng);
            let tt = tiles_to_tile_table(&wall[..13]);
            let sh = calc_normal_shanten(&tt, 0);
            assert!((0..=8).contains(&sh));
            if !calc_tiles_to_normal_win(&tt).is_empty() {
                assert_eq!(sh, 0);
            }
        }
    }
}

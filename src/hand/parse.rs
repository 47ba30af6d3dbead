use crate::model::*;
use crate::util::common::cartesian_product;

use super::win::{calc_mods_cnts, is_kokushimusou_win};

use SetPairType::*;

// declared melds as SetPairs
pub fn parse_melds(melds: &[Meld]) -> ParsedHand {
    let mut res = vec![];

    for m in melds {
        let t = m.tiles.iter().map(|t| t.to_normal()).min().unwrap_or(Z8);
        res.push(match m.meld_type {
            MeldType::Chi => SetPair(Chii, t),
            MeldType::Pon => SetPair(Pon, t),
            MeldType::Minkan | MeldType::Kakan => SetPair(Minkan, t),
            MeldType::Ankan => SetPair(Ankan, t),
        });
    }

    res
}

// Every split of one row into sequences and triplets.
// Scanning from the lowest number, the n copies of the lowest tile are either
// all sequence heads, or one triplet plus (n - 3) sequence heads.
// An empty row has exactly one (empty) split.
fn parse_row_into_sets(tr: &TileRow, ti: Type) -> Vec<ParsedHand> {
    let mut tr = *tr;
    tr[0] = 0; // red 5 is already counted in column 5
    let mut res = vec![];
    let mut ph = vec![];
    parse_row_rec(&mut tr, ti, 1, &mut ph, &mut res);
    res
}

fn parse_row_rec(
    tr: &mut TileRow,
    ti: Type,
    ni: Tnum,
    ph: &mut ParsedHand,
    res: &mut Vec<ParsedHand>,
) {
    if ni == TNUM {
        res.push(ph.clone());
        return;
    }
    let n = tr[ni];
    if n == 0 {
        parse_row_rec(tr, ti, ni + 1, ph, res);
        return;
    }

    for n_koutsu in 0..=(n / 3).min(1) {
        let n_shuntsu = n - 3 * n_koutsu;
        if n_shuntsu > 0 && (ti == TZ || ni > 7 || tr[ni + 1] < n_shuntsu || tr[ni + 2] < n_shuntsu)
        {
            continue;
        }

        let len = ph.len();
        if n_koutsu == 1 {
            ph.push(SetPair(Koutsu, Tile(ti, ni)));
        }
        for _ in 0..n_shuntsu {
            ph.push(SetPair(Shuntsu, Tile(ti, ni)));
        }
        tr[ni] = 0;
        if n_shuntsu > 0 {
            tr[ni + 1] -= n_shuntsu;
            tr[ni + 2] -= n_shuntsu;
        }

        parse_row_rec(tr, ti, ni + 1, ph, res);

        tr[ni] = n;
        if n_shuntsu > 0 {
            tr[ni + 1] += n_shuntsu;
            tr[ni + 2] += n_shuntsu;
        }
        ph.truncate(len);
    }
}

// Kinds that can be the pair of a complete normal hand.
// Only the row whose count is 2 mod 3 can hold the pair.
fn pair_candidates(hand: &TileTable) -> Vec<Tile> {
    let (mods, cnts) = calc_mods_cnts(hand);
    if cnts[1] != 0 || cnts[2] != 1 {
        return vec![];
    }

    let mut res = vec![];
    for ti in 0..TYPE {
        if mods[ti] != 2 {
            continue;
        }
        for ni in 1..TNUM {
            if hand[ti][ni] >= 2 {
                res.push(Tile(ti, ni));
            }
        }
    }
    res
}

// all splits of the concealed tiles into sets + `pair`
fn parse_with_pair(hand: &TileTable, pair: Tile) -> Vec<ParsedHand> {
    let mut rows = vec![];
    for ti in 0..TYPE {
        let mut tr = hand[ti];
        if ti == pair.0 {
            tr[pair.1] -= 2;
        }
        rows.push(parse_row_into_sets(&tr, ti));
    }

    cartesian_product(&rows)
        .into_iter()
        .map(|v| {
            let mut ph: ParsedHand = v.into_iter().flatten().copied().collect();
            ph.push(SetPair(Pair, pair));
            ph
        })
        .collect()
}

// Lazily enumerates every normal decomposition (concealed sets + pair).
// Declared melds are not included.
pub fn parse_into_normal_win(hand: &TileTable) -> impl Iterator<Item = Decomposition> + '_ {
    pair_candidates(hand).into_iter().flat_map(move |pair| {
        parse_with_pair(hand, pair)
            .into_iter()
            .map(|sets| Decomposition {
                shape: Shape::Normal,
                sets,
            })
    })
}

// seven distinct pairs
pub fn parse_into_chiitoitsu_win(hand: &TileTable) -> Option<Decomposition> {
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match hand[ti][ni] {
                0 => {}
                2 => res.push(SetPair(Pair, Tile(ti, ni))),
                _ => return None,
            }
        }
    }

    if res.len() == 7 {
        Some(Decomposition {
            shape: Shape::Chiitoitsu,
            sets: res,
        })
    } else {
        None
    }
}

// thirteen orphans, the duplicated tile is kept as the pair
pub fn parse_into_kokushimusou_win(hand: &TileTable) -> Option<Decomposition> {
    if !is_kokushimusou_win(hand) {
        return None;
    }

    let mut sets = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if hand[ti][ni] == 2 {
                sets.push(SetPair(Pair, Tile(ti, ni)));
            }
        }
    }
    Some(Decomposition {
        shape: Shape::Kokushimusou,
        sets,
    })
}

// Every decomposition of a complete hand's concealed tiles
// (14 - 3 * declared melds tiles). Empty when the hand is not complete.
pub fn decompose(hand: &TileTable) -> impl Iterator<Item = Decomposition> + '_ {
    parse_into_normal_win(hand)
        .chain(parse_into_chiitoitsu_win(hand))
        .chain(parse_into_kokushimusou_win(hand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::evaluate_hand;
    use rand::prelude::*;

    fn table(exp: &str) -> TileTable {
        tiles_to_tile_table(&tiles_from_string(exp).unwrap())
    }

    // tiles used by the decomposition, sets expanded
    fn expand(d: &Decomposition) -> TileTable {
        let mut tt = TileTable::default();
        for SetPair(tp, t) in &d.sets {
            match tp {
                Pair => {
                    tt[t.0][t.1] += 2;
                }
                Shuntsu => {
                    for i in 0..3 {
                        tt[t.0][t.1 + i] += 1;
                    }
                }
                Koutsu => tt[t.0][t.1] += 3,
                _ => panic!("declared meld in concealed decomposition"),
            }
        }
        tt
    }

    fn normalize(hand: &TileTable) -> TileTable {
        let mut tt = *hand;
        for tr in tt.iter_mut() {
            tr[0] = 0;
        }
        tt
    }

    #[test]
    fn test_simple_normal() {
        let hand = table("m123456789p12399");
        let ds: Vec<_> = decompose(&hand).collect();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].shape, Shape::Normal);
        assert_eq!(ds[0].pair_tile(), Some(Tile(TP, 9)));
        assert_eq!(ds[0].sets.len(), 5);
    }

    #[test]
    fn test_ambiguous_runs() {
        // 111222333 reads as three triplets or three identical sequences
        let hand = table("m111222333p456z11");
        let ds: Vec<_> = decompose(&hand).collect();
        assert_eq!(ds.len(), 2);
        let n_koutsu: Vec<usize> = ds
            .iter()
            .map(|d| d.sets.iter().filter(|sp| sp.0 == Koutsu).count())
            .collect();
        assert!(n_koutsu.contains(&3));
        assert!(n_koutsu.contains(&0));

        // pair 55: all triplets, 123x3+444, 111+234x3
        // pair 22: 111+234+345x2
        let hand = table("m11122233344455");
        let pairs: Vec<Tile> = parse_into_normal_win(&hand)
            .map(|d| d.pair_tile().unwrap())
            .collect();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs.iter().filter(|&&t| t == Tile(TM, 5)).count(), 3);
        let d = parse_into_normal_win(&hand)
            .find(|d| d.pair_tile() == Some(Tile(TM, 2)))
            .unwrap();
        let mut sets = d.sets.clone();
        sets.sort_by_key(|sp| (sp.1, sp.0 as usize));
        assert_eq!(
            sets,
            vec![
                SetPair(Koutsu, Tile(TM, 1)),
                SetPair(Pair, Tile(TM, 2)),
                SetPair(Shuntsu, Tile(TM, 2)),
                SetPair(Shuntsu, Tile(TM, 3)),
                SetPair(Shuntsu, Tile(TM, 3)),
            ]
        );
    }

    #[test]
    fn test_multiple_pair_candidates() {
        // nine gates completed on m5, only m5 works as the pair
        let hand = table("m11123455678999");
        let pairs: Vec<Tile> = parse_into_normal_win(&hand)
            .map(|d| d.pair_tile().unwrap())
            .collect();
        assert!(pairs.contains(&Tile(TM, 5)));
        for d in parse_into_normal_win(&hand) {
            assert_eq!(expand(&d), normalize(&hand));
        }
    }

    #[test]
    fn test_chiitoitsu_and_ryanpeikou() {
        // two identical pairs of sequences also reads as seven pairs
        let hand = table("m112233p445566z11");
        let shapes: Vec<Shape> = decompose(&hand).map(|d| d.shape).collect();
        assert!(shapes.contains(&Shape::Normal));
        assert!(shapes.contains(&Shape::Chiitoitsu));
    }

    #[test]
    fn test_chiitoitsu_rejects_four_of_a_kind() {
        let hand = table("m1111p2233s4455z66");
        assert!(parse_into_chiitoitsu_win(&hand).is_none());
        let hand = table("m111p223344s5566z7");
        assert!(parse_into_chiitoitsu_win(&hand).is_none());
    }

    #[test]
    fn test_kokushimusou() {
        let hand = table("m19p19s19z12345677");
        let d = parse_into_kokushimusou_win(&hand).unwrap();
        assert_eq!(d.shape, Shape::Kokushimusou);
        assert_eq!(d.pair_tile(), Some(Tile(TZ, DR)));

        // missing the red dragon, two whites instead
        let hand = table("m19p19s19z12345566");
        assert!(parse_into_kokushimusou_win(&hand).is_none());
        assert_eq!(decompose(&hand).count(), 0);
    }

    #[test]
    fn test_incomplete() {
        let hand = table("m123456789p12389");
        assert_eq!(decompose(&hand).count(), 0);
        // honors never form sequences
        let hand = table("m123456789z12344");
        assert_eq!(decompose(&hand).count(), 0);
    }

    #[test]
    fn test_with_declared_melds() {
        // 8 concealed tiles: two sets and a pair, melds handled by the caller
        let hand = table("p340s67855");
        let ds: Vec<_> = decompose(&hand).collect();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].sets.len(), 3);
        assert!(ds[0].sets.contains(&SetPair(Shuntsu, Tile(TP, 3))));
    }

    #[test]
    fn test_parse_melds() {
        let melds = vec![
            meld_from_string("p406").unwrap(),
            meld_from_string("z5555+").unwrap(),
        ];
        let ph = parse_melds(&melds);
        assert_eq!(ph[0], SetPair(Chii, Tile(TP, 4)));
        assert_eq!(ph[1], SetPair(Ankan, Tile(TZ, DW)));
    }

    // four random sets and a pair, at most 4 copies of a kind
    fn random_complete_hand(rng: &mut rand::rngs::StdRng) -> TileTable {
        let mut tt = TileTable::default();
        let mut n_set = 0;
        while n_set < 4 {
            let ti = rng.gen_range(0..TYPE);
            let sp = if ti != TZ && rng.gen_bool(0.6) {
                SetPair(Shuntsu, Tile(ti, rng.gen_range(1..=7)))
            } else if ti == TZ {
                SetPair(Koutsu, Tile(ti, rng.gen_range(WE..=DR)))
            } else {
                SetPair(Koutsu, Tile(ti, rng.gen_range(1..=9)))
            };
            let mut tt2 = tt;
            match sp.0 {
                Shuntsu => (0..3).for_each(|i| tt2[ti][sp.1 .1 + i] += 1),
                _ => tt2[ti][sp.1 .1] += 3,
            }
            if tt2.iter().all(|tr| tr.iter().all(|&n| n <= TILE)) {
                tt = tt2;
                n_set += 1;
            }
        }
        loop {
            let ti = rng.gen_range(0..TYPE);
            let ni = if ti == TZ {
                rng.gen_range(WE..=DR)
            } else {
                rng.gen_range(1..=9)
            };
            if tt[ti][ni] <= 2 {
                tt[ti][ni] += 2;
                break;
            }
        }

        tt
    }

    // deals random complete hands and checks that every decomposition
    // partitions the multiset exactly
    #[test]
    fn test_random_complete_hands_partition() {
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(12);
        for _ in 0..2000 {
            let tt = random_complete_hand(&mut rng);
            let ds: Vec<_> = decompose(&tt).collect();
            assert!(!ds.is_empty(), "{:?}", tiles_from_tile_table(&tt));
            for d in &ds {
                if d.shape == Shape::Normal || d.shape == Shape::Chiitoitsu {
                    assert_eq!(expand(d), tt, "{}", d);
                }
            }
            // no decomposition is reported twice
            for (i, d) in ds.iter().enumerate() {
                for d2 in &ds[i + 1..] {
                    let mut a = d.sets.clone();
                    let mut b = d2.sets.clone();
                    a.sort_by_key(|sp| (sp.1, sp.0 as usize));
                    b.sort_by_key(|sp| (sp.1, sp.0 as usize));
                    assert!(d.shape != d2.shape || a != b);
                }
            }
        }
    }

    // fu of every scored random hand is a multiple of 10 (chiitoitsu is 25)
    #[test]
    fn test_random_complete_hands_fu() {
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(34);
        let ctxs = [Context::tsumo(WE, WS), Context::ron(WE, WS, WN)];
        let mut n_win = 0;
        for _ in 0..1000 {
            let mut tiles = tiles_from_tile_table(&random_complete_hand(&mut rng));
            let wt = tiles.remove(rng.gen_range(0..tiles.len()));
            let hand = Hand::new(&tiles, vec![]);
            for ctx in &ctxs {
                if let Verdict::Win(res) = evaluate_hand(&hand, wt, ctx).unwrap() {
                    n_win += 1;
                    if res.decomposition.shape == Shape::Chiitoitsu {
                        assert_eq!(res.fu, 25);
                    } else {
                        assert_eq!(res.fu % 10, 0, "{} {}", hand, wt);
                        assert!(res.fu >= 20);
                    }
                }
            }
        }
        assert!(n_win > 0);
    }

    // random 14 tiles from a shuffled wall: any decomposition found must
    // partition the hand
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
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(34);
        for _ in 0..5000 {
            wall.shuffle(&mut rng);
            let tt = tiles_to_tile_table(&wall[..14]);
            for d in decompose(&tt) {
                if d.shape != Shape::Kokushimusou {
                    assert_eq!(expand(&d), tt);
                }
            }
        }
    }
}

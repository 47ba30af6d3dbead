use super::parse::parse_into_chiitoitsu_win;
use crate::model::*;

// [Complete shape check (sets, pair)]

// per type "count mod 3", and how many types have each remainder
pub fn calc_mods_cnts(hand: &TileTable) -> ([usize; TYPE], [usize; 3]) {
    let mut mods = [0; TYPE];
    for ti in 0..TYPE {
        mods[ti] = hand[ti][1..TNUM].iter().sum();
        mods[ti] %= 3;
    }

    let mut cnts = [0; 3];
    for ti in 0..TYPE {
        cnts[mods[ti]] += 1;
    }

    (mods, cnts)
}

// the row is made of sets + one pair
pub fn is_sets_pair(tr: &TileRow, ti: Type) -> bool {
    !calc_pair_candidate(tr, ti).is_empty()
}

// the row is made of sets only
pub fn is_sets(tr: &TileRow, ti: Type) -> bool {
    let (mut n0, mut n1, mut n2);
    n0 = tr[1];
    n1 = tr[2];
    for i in 1..8 {
        n2 = tr[i + 2];
        let n = n0 % 3;
        if (ti == TZ && n != 0) || (n1 < n || n2 < n) {
            return false;
        }
        n0 = n1 - n;
        n1 = n2 - n;
    }
    n0 % 3 == 0 && n1 % 3 == 0
}

// pair candidates of a "sets + pair" row: one of [1,4,7], [2,5,8], [3,6,9]
pub fn calc_pair_candidate_index(tr: &TileRow) -> Vec<Tnum> {
    // the weighted sum of sets is a multiple of 3
    let mut sum = 0;
    for i in 1..TNUM {
        sum += i * tr[i];
    }
    let mod3 = sum % 3;
    let mut pairs = vec![];
    for i in 1..4 {
        pairs.push(3 * i - mod3);
    }
    pairs
}

// pairs of a row made of sets + pair (usually 1, 2 for shapes like 3113)
pub fn calc_pair_candidate(tr: &TileRow, ti: Type) -> Vec<Tile> {
    let mut tr = *tr;
    let mut res = vec![];
    for ni in calc_pair_candidate_index(&tr) {
        if tr[ni] < 2 {
            continue;
        }
        tr[ni] -= 2;
        if is_sets(&tr, ti) {
            res.push(Tile(ti, ni));
        }
        tr[ni] += 2;
    }

    res
}

// [Win shape check]

pub fn is_normal_win(hand: &TileTable) -> bool {
    let (mods, cnts) = calc_mods_cnts(hand);
    if cnts[1] != 0 || cnts[2] != 1 {
        return false;
    }

    (0..TYPE).all(|ti| {
        if mods[ti] == 2 {
            is_sets_pair(&hand[ti], ti)
        } else {
            is_sets(&hand[ti], ti)
        }
    })
}

pub fn is_chiitoitsu_win(hand: &TileTable) -> bool {
    parse_into_chiitoitsu_win(hand).is_some()
}

pub fn is_kokushimusou_win(hand: &TileTable) -> bool {
    let mut count = 0;
    for ti in 0..TZ {
        if hand[ti][1] == 0 || hand[ti][9] == 0 {
            return false;
        }
        for ni in 2..9 {
            if hand[ti][ni] != 0 {
                return false;
            }
        }
        count += hand[ti][1] + hand[ti][9]
    }
    for ni in WE..=DR {
        if hand[TZ][ni] == 0 {
            return false;
        }
        count += hand[TZ][ni]
    }

    count == 14
}

// [Winning tiles]
// empty when the hand is not tenpai

pub fn calc_tiles_to_normal_win(hand: &TileTable) -> Vec<Tile> {
    let (mods, cnts) = calc_mods_cnts(hand);
    let mut res = vec![];
    if cnts[1] == 0 && cnts[2] == 2 {
        // the pair and the waiting set are in two different types
        let mut ti_mod2 = vec![];
        for ti in 0..TYPE {
            if mods[ti] == 2 {
                ti_mod2.push(ti);
            } else if !is_sets(&hand[ti], ti) {
                return vec![];
            }
        }
        for i in 0..2 {
            let (ti0, ti1) = (ti_mod2[i], ti_mod2[1 - i]);
            if is_sets_pair(&hand[ti0], ti0) {
                let mut tr = hand[ti1];
                for ni in 1..TNUM {
                    tr[ni] += 1;
                    if is_sets(&tr, ti1) {
                        res.push(Tile(ti1, ni));
                    }
                    tr[ni] -= 1;
                }
            }
        }
    }
    if cnts[1] == 1 && cnts[2] == 0 {
        // waiting in a single type
        for ti in 0..TYPE {
            if mods[ti] == 1 {
                let mut tr = hand[ti];
                for ni in 1..TNUM {
                    tr[ni] += 1;
                    if is_sets_pair(&tr, ti) {
                        res.push(Tile(ti, ni));
                    }
                    tr[ni] -= 1;
                }
            } else if !is_sets(&hand[ti], ti) {
                return vec![];
            }
        }
    }

    res.retain(|t| t.is_valid());
    res
}

pub fn calc_tiles_to_chiitoitsu_win(hand: &TileTable) -> Vec<Tile> {
    let mut single = None;
    let mut n_pair = 0;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match hand[ti][ni] {
                0 => {}
                1 => {
                    if single.is_some() {
                        return vec![];
                    }
                    single = Some(Tile(ti, ni));
                }
                2 => n_pair += 1,
                _ => return vec![],
            }
        }
    }

    match single {
        Some(t) if n_pair == 6 => vec![t],
        _ => vec![],
    }
}

pub fn calc_tiles_to_kokushimusou_win(hand: &TileTable) -> Vec<Tile> {
    let mut wt = None; // missing terminal/honor
    let mut n_end = 0;
    let mut has_pair = false;
    let mut check = |ti: Type, ni: Tnum| {
        let n = hand[ti][ni];
        n_end += n;
        match n {
            0 => {
                if wt.is_some() {
                    return true; // two kinds missing
                }
                wt = Some(Tile(ti, ni));
                false
            }
            1 => false,
            2 => {
                if has_pair {
                    return true;
                }
                has_pair = true;
                false
            }
            _ => true,
        }
    };

    for ti in 0..TZ {
        if check(ti, 1) || check(ti, 9) {
            return vec![];
        }
    }
    for ni in WE..=DR {
        if check(TZ, ni) {
            return vec![];
        }
    }

    if n_end != 13 {
        return vec![];
    }

    match wt {
        // the only missing terminal/honor
        Some(t) => vec![t],
        // all 13 kinds held: thirteen-sided wait
        None => {
            let mut res = vec![];
            for ti in 0..TZ {
                res.push(Tile(ti, 1));
                res.push(Tile(ti, 9));
            }
            for ni in WE..=DR {
                res.push(Tile(TZ, ni));
            }
            res
        }
    }
}

// Every tile that completes the hand (concealed tiles + melds of 13 tiles).
// Kinds the player already holds all 4 of are excluded.
pub fn winning_tiles(hand: &Hand) -> Vec<Tile> {
    let mut res = calc_tiles_to_normal_win(&hand.tiles);
    if hand.melds.is_empty() {
        res.extend(calc_tiles_to_chiitoitsu_win(&hand.tiles));
        res.extend(calc_tiles_to_kokushimusou_win(&hand.tiles));
    }

    let all = hand.table_with(None);
    res.retain(|t| all[t.0][t.1] < TILE);
    res.sort();
    res.dedup();
    res
}

// [Tenpai discards]
// (discard, winning tiles) pairs that leave the hand tenpai after a draw.
// Used to list riichi declaration options. Red fives are listed separately.

pub fn calc_discards_to_normal_tenpai(hand: &TileTable) -> Vec<(Tile, Vec<Tile>)> {
    calc_discards_to_tenpai(hand, calc_tiles_to_normal_win)
}

pub fn calc_discards_to_chiitoitsu_tenpai(hand: &TileTable) -> Vec<(Tile, Vec<Tile>)> {
    calc_discards_to_tenpai(hand, calc_tiles_to_chiitoitsu_win)
}

pub fn calc_discards_to_kokushimusou_tenpai(hand: &TileTable) -> Vec<(Tile, Vec<Tile>)> {
    let mut n_end = 0;
    for ti in 0..TZ {
        n_end += (hand[ti][1] > 0) as usize + (hand[ti][9] > 0) as usize;
    }
    for ni in WE..=DR {
        n_end += (hand[TZ][ni] > 0) as usize;
    }
    if n_end < 12 {
        return vec![];
    }

    calc_discards_to_tenpai(hand, calc_tiles_to_kokushimusou_win)
}

fn calc_discards_to_tenpai(
    hand: &TileTable,
    calc_wins: fn(&TileTable) -> Vec<Tile>,
) -> Vec<(Tile, Vec<Tile>)> {
    let mut res = vec![];
    let mut h = *hand;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if h[ti][ni] > 0 {
                h[ti][ni] -= 1;
                let v = calc_wins(&h);
                if !v.is_empty() {
                    res.push((Tile(ti, ni), v));
                }
                h[ti][ni] += 1;
            }
        }
    }

    discards_with_red5(hand, res)
}

fn discards_with_red5(
    hand: &TileTable,
    discards: Vec<(Tile, Vec<Tile>)>,
) -> Vec<(Tile, Vec<Tile>)> {
    let mut res = vec![];
    for (t, wins) in discards {
        for t2 in tiles_with_red5(hand, t) {
            res.push((t2, wins.clone()))
        }
    }
    res
}

fn tiles_with_red5(tt: &TileTable, t: Tile) -> Vec<Tile> {
    let Tile(ti, ni) = t;
    let tr = tt[ti];
    if ti == TZ || ni != 5 || tr[0] == 0 {
        return vec![t];
    }
    if tr[0] == tr[5] {
        return vec![Tile(ti, 0)]; // only red fives
    }
    vec![t, Tile(ti, 0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(exp: &str) -> TileTable {
        tiles_to_tile_table(&tiles_from_string(exp).unwrap())
    }

    #[test]
    fn test_pair_candidate_index() {
        let mut tr = TileRow::default();
        for ni in [1, 1, 2, 3, 4] {
            tr[ni] += 1;
        }
        assert_eq!(calc_pair_candidate_index(&tr), vec![1, 4, 7]);
        assert_eq!(calc_pair_candidate(&tr, TM), vec![Tile(TM, 1)]);

        // 3113 has two pairs
        let mut tr = TileRow::default();
        for ni in [1, 1, 1, 2, 3, 4, 4, 4] {
            tr[ni] += 1;
        }
        assert_eq!(calc_pair_candidate(&tr, TM), vec![Tile(TM, 1), Tile(TM, 4)]);
    }

    #[test]
    fn test_is_win() {
        assert!(is_normal_win(&table("m123456789p12399")));
        assert!(!is_normal_win(&table("m123456789p12389")));
        assert!(is_normal_win(&table("m111222333z11122")));
        assert!(is_chiitoitsu_win(&table("m1199p2288s3377z11")));
        assert!(is_kokushimusou_win(&table("m119p19s19z1234567")));
        assert!(!is_kokushimusou_win(&table("m19p19s19z1234566")));
    }

    #[test]
    fn test_tiles_to_normal_win() {
        // 23 two-sided + pair
        let wins = calc_tiles_to_normal_win(&table("m123456789p2399"));
        assert_eq!(wins, vec![Tile(TP, 1), Tile(TP, 4)]);

        // pure nine gates: every manzu
        let wins = calc_tiles_to_normal_win(&table("m1112345678999"));
        assert_eq!(wins.len(), 9);

        // shanpon
        let wins = calc_tiles_to_normal_win(&table("m123456789p99z11"));
        assert_eq!(wins.len(), 2);
        assert!(wins.contains(&Tile(TP, 9)) && wins.contains(&Tile(TZ, WE)));
    }

    #[test]
    fn test_tiles_to_special_win() {
        let wins = calc_tiles_to_chiitoitsu_win(&table("m1199p2288s3377z1"));
        assert_eq!(wins, vec![Tile(TZ, WE)]);
        assert!(calc_tiles_to_chiitoitsu_win(&table("m1111p2288s3377z1")).is_empty());

        let wins = calc_tiles_to_kokushimusou_win(&table("m19p19s19z1234567"));
        assert_eq!(wins.len(), 13);
        let wins = calc_tiles_to_kokushimusou_win(&table("m11p19s19z1234567"));
        assert_eq!(wins, vec![Tile(TM, 9)]);
        assert!(calc_tiles_to_kokushimusou_win(&table("m11p11s19z1234567")).is_empty());
    }

    #[test]
    fn test_winning_tiles_excludes_exhausted_kinds() {
        // m1111 held: m1 can never be drawn
        let hand = Hand::from_string("m1111234p456s789").unwrap();
        let wins = winning_tiles(&hand);
        assert!(!wins.contains(&Tile(TM, 1)));
        assert!(wins.contains(&Tile(TM, 4)));
    }

    #[test]
    fn test_discards_to_tenpai() {
        let hand = table("m123456789p23990");
        let res = calc_discards_to_normal_tenpai(&hand);
        assert!(res.contains(&(Tile(TP, 0), vec![Tile(TP, 1), Tile(TP, 4)])));
        assert!(!res.iter().any(|(t, _)| *t == Tile(TP, 5)));

        let hand = table("m1199p2288s3377z12");
        let res = calc_discards_to_chiitoitsu_tenpai(&hand);
        assert_eq!(res.len(), 2);

        let hand = table("m19p19s19z12345677");
        assert_eq!(calc_discards_to_kokushimusou_tenpai(&hand).len(), 13);
    }
}

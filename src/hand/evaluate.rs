use super::fu::calc_fu;
use super::parse::*;
use super::point::*;
use super::shanten::calc_shanten;
use super::yaku::*;
use crate::error::EvalResult;
use crate::model::*;
use crate::{debug, warn};

// Evaluates `winning_tile` against `hand` (13 tiles incl. melds).
// Every decomposition and every set the winning tile can complete is tried,
// the interpretation with the highest value is returned.
pub fn evaluate_hand(hand: &Hand, winning_tile: Tile, ctx: &Context) -> EvalResult<Verdict> {
    if let Err(e) = hand.validate(Some(winning_tile)).and_then(|_| ctx.validate(hand)) {
        warn!("rejected: {} (hand: {}, tile: {})", e, hand, winning_tile);
        return Err(e);
    }

    let mut tt = hand.tiles;
    inc_tile(&mut tt, winning_tile);
    let wt = winning_tile.to_normal();
    let pm = parse_melds(&hand.melds);

    let mut n_decomposition = 0;
    let mut results = vec![];
    for d in decompose(&tt) {
        if d.shape != Shape::Normal && !hand.melds.is_empty() {
            continue;
        }
        n_decomposition += 1;

        let mut ph = d.sets.clone();
        ph.extend(pm.iter().copied());
        for win_index in win_candidates(&d, wt) {
            let yc = YakuContext::new(tt, d.shape, ph.clone(), win_index, wt, ctx);
            if let Some(res) = score(hand, winning_tile, ctx, &yc) {
                results.push(res);
            }
        }
    }
    debug!("{} decomposition(s), {} scored", n_decomposition, results.len());

    if n_decomposition == 0 {
        let shanten = calc_shanten(&tt, hand.melds.len()).min();
        return Ok(Verdict::NoDecomposition { shanten });
    }

    // several readings of the same tiles: the highest value wins
    match results.into_iter().max_by_key(|r| (r.score, r.fan, r.fu)) {
        Some(res) => {
            debug!("{} {}fu {}han {}", res.decomposition, res.fu, res.fan, res.total);
            Ok(Verdict::Win(res))
        }
        None => Ok(Verdict::NoQualifyingYaku),
    }
}

// shorthand for a win on the tile drawn by the player
pub fn evaluate_hand_tsumo(hand: &Hand, winning_tile: Tile, ctx: &Context) -> EvalResult<Verdict> {
    let ctx = Context {
        is_self_drawn: true,
        discarder: None,
        ..ctx.clone()
    };
    evaluate_hand(hand, winning_tile, &ctx)
}

// shorthand for a win on a tile discarded by `discarder`
pub fn evaluate_hand_ron(
    hand: &Hand,
    winning_tile: Tile,
    discarder: Tnum,
    ctx: &Context,
) -> EvalResult<Verdict> {
    let ctx = Context {
        is_self_drawn: false,
        discarder: Some(discarder),
        ..ctx.clone()
    };
    evaluate_hand(hand, winning_tile, &ctx)
}

// Concealed sets the winning tile may have completed.
// Identical sets give the same reading and are tried once.
fn win_candidates(d: &Decomposition, wt: Tile) -> Vec<Option<usize>> {
    if d.shape != Shape::Normal {
        return vec![None];
    }

    let mut seen: Vec<SetPair> = vec![];
    let mut res = vec![];
    for (i, sp) in d.sets.iter().enumerate() {
        if sp.is_concealed() && sp.contains(wt) && !seen.contains(sp) {
            seen.push(*sp);
            res.push(Some(i));
        }
    }
    res
}

// None when no qualifying yaku holds
fn score(
    hand: &Hand,
    winning_tile: Tile,
    ctx: &Context,
    yc: &YakuContext,
) -> Option<WinResult> {
    let (yakus, mut fan, yakuman) = yc.calc_yaku();
    if yakus.is_empty() {
        return None; // bonus tiles alone never make a win
    }
    let fu = calc_fu(yc);

    let mut yakus: Vec<ScoredYaku> = yakus
        .iter()
        .map(|y| ScoredYaku {
            name: y.name.to_string(),
            fan: if yakuman > 0 {
                y.yakuman()
            } else {
                y.fan(yc.is_open())
            },
        })
        .collect();

    if yakuman == 0 {
        let all = hand.table_with(Some(winning_tile));
        let n_dora = count_dora(&all, &ctx.dora_indicators);
        let n_red_dora = all[TM][0] + all[TP][0] + all[TS][0];
        let n_ura_dora = if ctx.is_riichi() {
            count_dora(&all, &ctx.ura_dora_indicators)
        } else {
            0
        };
        for (name, n) in [
            ("Dora", n_dora),
            ("Aka Dora", n_red_dora),
            ("Ura Dora", n_ura_dora),
        ] {
            if n != 0 {
                yakus.push(ScoredYaku {
                    name: name.to_string(),
                    fan: n,
                });
                fan += n;
            }
        }
    }

    let base_point = calc_base_point(fu, fan, yakuman);
    let is_dealer = ctx.is_dealer();
    let payments = calc_payments(
        base_point,
        is_dealer,
        ctx.is_self_drawn,
        ctx.seat_wind,
        ctx.discarder,
        ctx.honba,
    );
    let score: Point = calc_payments(
        base_point,
        is_dealer,
        ctx.is_self_drawn,
        ctx.seat_wind,
        ctx.discarder,
        0,
    )
    .iter()
    .map(|p| p.amount)
    .sum();
    let total = payments.iter().map(|p| p.amount).sum::<Point>()
        + RIICHI_STICK_POINT * ctx.riichi_sticks as Point;

    Some(WinResult {
        yakus,
        fu,
        fan,
        yakuman,
        base_point,
        payments,
        score,
        total,
        title: get_score_title(base_point, yakuman),
        is_limit: base_point >= 2000,
        decomposition: Decomposition {
            shape: yc.shape,
            sets: yc.parsed_hand.clone(),
        },
        wait: yc.wait(),
    })
}

fn create_dora_table(doras: &[Tile]) -> TileTable {
    let mut dt = TileTable::default();
    for d in doras {
        let t = d.indicated_dora();
        dt[t.0][t.1] += 1;
    }
    dt
}

// dora count over every tile the player holds (red fives count as fives)
fn count_dora(tt: &TileTable, doras: &[Tile]) -> usize {
    let dt = create_dora_table(doras);
    let mut n_dora = 0;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            n_dora += dt[ti][ni] * tt[ti][ni];
        }
    }
    n_dora
}

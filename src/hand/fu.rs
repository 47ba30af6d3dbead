use crate::model::*;

use super::yaku::{is_pinfu, YakuContext};

use SetPairType::*;

// Fu of one decomposition under one wait interpretation.
// Rounded up to a multiple of 10 except for chiitoitsu (fixed 25).
pub fn calc_fu(ctx: &YakuContext) -> usize {
    if ctx.shape == Shape::Chiitoitsu {
        return 25;
    }
    if is_pinfu(ctx) && ctx.is_self_drawn {
        return 20;
    }

    let mut fu = 20;

    // how the hand was won
    fu += if ctx.is_self_drawn {
        2
    } else if !ctx.is_open {
        10 // closed ron
    } else {
        0
    };

    // sets and pair
    for (i, SetPair(tp, t)) in ctx.parsed_hand.iter().enumerate() {
        let is_ron_koutsu = ctx.ron_koutsu && ctx.win_index == Some(i);
        fu += match tp {
            Pair => calc_pair_fu(ctx, t),
            Koutsu if is_ron_koutsu => if t.is_end() { 4 } else { 2 },
            Koutsu => if t.is_end() { 8 } else { 4 },
            Pon => if t.is_end() { 4 } else { 2 },
            Minkan => if t.is_end() { 16 } else { 8 },
            Ankan => if t.is_end() { 32 } else { 16 },
            Shuntsu | Chii => 0,
        };
    }

    // wait
    if matches!(ctx.wait, Wait::Kanchan | Wait::Penchan | Wait::Tanki) {
        fu += 2;
    }

    let fu = (fu + 9) / 10 * 10;
    if ctx.is_open && fu == 20 {
        30 // open pinfu shape
    } else {
        fu
    }
}

// dragons, round wind and seat wind (a double wind pair counts twice)
fn calc_pair_fu(ctx: &YakuContext, t: &Tile) -> usize {
    if !t.is_hornor() {
        return 0;
    }
    if t.is_doragon() {
        return 2;
    }
    let mut fu = 0;
    if t.1 == ctx.prevalent_wind {
        fu += 2;
    }
    if t.1 == ctx.seat_wind {
        fu += 2;
    }
    fu
}

// completion, yaku, fu and points of a hand
mod evaluate;
mod fu;
mod parse;
mod point;
mod shanten;
mod win;
mod yaku;

pub use self::{
    evaluate::{evaluate_hand, evaluate_hand_ron, evaluate_hand_tsumo},
    fu::calc_fu,
    parse::{decompose, parse_melds},
    point::{
        calc_base_point, calc_payments, calc_points, ceil100, get_score_title, Points,
        HONBA_POINT, RIICHI_STICK_POINT,
    },
    shanten::{
        calc_chiitoitsu_shanten, calc_kokushimusou_shanten, calc_normal_shanten, calc_shanten,
        Shanten,
    },
    win::{
        calc_discards_to_chiitoitsu_tenpai, calc_discards_to_kokushimusou_tenpai,
        calc_discards_to_normal_tenpai, calc_tiles_to_chiitoitsu_win,
        calc_tiles_to_kokushimusou_win, calc_tiles_to_normal_win, is_chiitoitsu_win,
        is_kokushimusou_win, is_normal_win, winning_tiles,
    },
    yaku::{Yaku, YakuContext, YakuFlags, DOMINATED, YAKU_LIST},
};

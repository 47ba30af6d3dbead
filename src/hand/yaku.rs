use std::fmt;

use crate::model::*;

use SetPairType::*;

// One interpretation of a complete hand: a decomposition (declared melds
// included), the set completed by the winning tile and the situation.
#[derive(Debug)]
pub struct YakuContext {
    pub(super) hand: TileTable,         // concealed tiles incl. the winning tile (chuuren, kokushi)
    pub(super) shape: Shape,            // normal, chiitoitsu, kokushimusou
    pub(super) parsed_hand: ParsedHand, // every set incl. declared melds
    pub(super) pair_tile: Tile,         // Z8 when there is no pair
    pub(super) winning_tile: Tile,      // always a normal tile (red 5 as 5)
    pub(super) win_index: Option<usize>, // set completed by the winning tile
    pub(super) wait: Wait,
    pub(super) ron_koutsu: bool, // concealed triplet completed by a discard (counts as open)
    pub(super) is_self_drawn: bool,
    pub(super) is_open: bool,
    pub(super) prevalent_wind: Tnum,
    pub(super) seat_wind: Tnum,
    pub(super) yaku_flags: YakuFlags,
    counts: Counts,
    iipeikou_count: usize,
    yakuhai_check: TileRow, // honor triplets by number (pair excluded)
}

impl YakuContext {
    pub fn new(
        hand: TileTable,
        shape: Shape,
        parsed_hand: ParsedHand,
        win_index: Option<usize>,
        winning_tile: Tile,
        ctx: &Context,
    ) -> Self {
        let winning_tile = winning_tile.to_normal();
        let pair_tile = get_pair(&parsed_hand);
        let wait = match (shape, win_index) {
            (Shape::Kokushimusou, _) => Wait::Kokushi,
            (Shape::Chiitoitsu, _) => Wait::Tanki,
            (Shape::Normal, Some(i)) => Wait::of(&parsed_hand[i], winning_tile),
            (Shape::Normal, None) => Wait::Tanki,
        };
        let ron_koutsu = !ctx.is_self_drawn
            && win_index.map_or(false, |i| parsed_hand[i].0 == Koutsu);
        let mut counts = count_type(&parsed_hand);
        if ron_koutsu {
            counts.ankou_total -= 1;
        }
        let iipeikou_count = count_iipeikou(&parsed_hand);
        let yakuhai_check = check_yakuhai(&parsed_hand);
        let is_open = counts.chii + counts.pon + counts.minkan != 0;
        let yaku_flags = YakuFlags::new(ctx, is_open);

        Self {
            hand,
            shape,
            parsed_hand,
            pair_tile,
            winning_tile,
            win_index,
            wait,
            ron_koutsu,
            is_self_drawn: ctx.is_self_drawn,
            is_open,
            prevalent_wind: ctx.round_wind,
            seat_wind: ctx.seat_wind,
            yaku_flags,
            counts,
            iipeikou_count,
            yakuhai_check,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[inline]
    pub fn wait(&self) -> Wait {
        self.wait
    }

    // (yaku list, han, yakuman multiplier)
    // When a yakuman holds only yakuman are returned and han is 0.
    pub fn calc_yaku(&self) -> (Vec<&'static Yaku>, usize, usize) {
        let mut yaku = vec![];
        for y in YAKU_LIST {
            if self.is_open && y.fan_open == 0 {
                continue; // closed hand only
            }
            if (y.func)(self) {
                yaku.push(y)
            }
        }
        let yaku = remove_dominated(yaku);

        let yakuman: Vec<_> = yaku.iter().copied().filter(|y| y.yakuman() > 0).collect();
        if !yakuman.is_empty() {
            let m = yakuman.iter().map(|y| y.yakuman()).sum();
            (yakuman, 0, m)
        } else {
            let fan = yaku.iter().map(|y| y.fan(self.is_open)).sum();
            (yaku, fan, 0)
        }
    }
}

#[derive(Debug, Default)]
struct Counts {
    shuntsu: usize,
    koutsu: usize,
    chii: usize,
    pon: usize,
    minkan: usize,
    ankan: usize,
    shuntsu_total: usize, // shuntsu + chii
    koutsu_total: usize,  // koutsu + pon + minkan + ankan
    ankou_total: usize,   // koutsu + ankan (a triplet completed by ron excluded)
    kantsu_total: usize,  // minkan + ankan
    tis: [usize; TYPE],   // sets per tile type
}

// Yaku given by the situation rather than by the tiles
#[derive(Debug, Default, Clone, Copy)]
pub struct YakuFlags {
    pub menzentsumo: bool,
    pub riichi: bool,
    pub dabururiichi: bool,
    pub ippatsu: bool,
    pub haiteiraoyue: bool,
    pub houteiraoyui: bool,
    pub rinshankaihou: bool,
    pub chankan: bool,
    pub tenhou: bool,
    pub tiihou: bool,
}

impl YakuFlags {
    pub fn new(ctx: &Context, is_open: bool) -> Self {
        let first_draw = ctx.is_first_uninterrupted_turn && ctx.is_self_drawn;
        Self {
            menzentsumo: ctx.is_self_drawn && !is_open,
            riichi: ctx.riichi.is_some(),
            dabururiichi: ctx.riichi.map_or(false, |r| r.is_double),
            ippatsu: ctx.is_ippatsu,
            haiteiraoyue: ctx.is_last_tile && ctx.is_self_drawn,
            houteiraoyui: ctx.is_last_tile && !ctx.is_self_drawn,
            rinshankaihou: ctx.is_rinshan,
            chankan: ctx.is_chankan,
            tenhou: first_draw && ctx.is_dealer(),
            tiihou: first_draw && !ctx.is_dealer(),
        }
    }
}

fn get_pair(ph: &ParsedHand) -> Tile {
    for &SetPair(tp, t) in ph {
        if let Pair = tp {
            return t;
        }
    }
    Z8
}

fn count_type(ph: &ParsedHand) -> Counts {
    let mut cnt = Counts::default();
    for SetPair(tp, t) in ph {
        match tp {
            Pair => {}
            Shuntsu => cnt.shuntsu += 1,
            Koutsu => cnt.koutsu += 1,
            Chii => cnt.chii += 1,
            Pon => cnt.pon += 1,
            Minkan => cnt.minkan += 1,
            Ankan => cnt.ankan += 1,
        }
        cnt.tis[t.0] += 1;
    }
    cnt.shuntsu_total = cnt.shuntsu + cnt.chii;
    cnt.koutsu_total = cnt.koutsu + cnt.pon + cnt.minkan + cnt.ankan;
    cnt.ankou_total = cnt.koutsu + cnt.ankan;
    cnt.kantsu_total = cnt.minkan + cnt.ankan;

    cnt
}

// number of identical concealed sequence pairs
fn count_iipeikou(ph: &ParsedHand) -> usize {
    let mut n = 0;
    let mut shuntsu = TileTable::default();
    for SetPair(tp, t) in ph {
        if let Shuntsu = tp {
            shuntsu[t.0][t.1] += 1;
            if shuntsu[t.0][t.1] % 2 == 0 {
                n += 1;
            }
        }
    }

    n
}

fn check_yakuhai(ph: &ParsedHand) -> TileRow {
    let mut tr = TileRow::default();
    for sp in ph {
        if sp.is_triplet() && sp.1.is_hornor() {
            tr[sp.1 .1] += 1;
        }
    }

    tr
}

pub struct Yaku {
    pub name: &'static str,
    pub func: fn(&YakuContext) -> bool,
    pub fan_close: usize, // han when closed, 13 or more for yakuman
    pub fan_open: usize,  // han when open (0: closed hand only)
}

impl Yaku {
    // yakuman multiplier, 0 for normal yaku
    #[inline]
    pub fn yakuman(&self) -> usize {
        self.fan_close.saturating_sub(12)
    }

    #[inline]
    pub fn fan(&self, is_open: bool) -> usize {
        if is_open {
            self.fan_open
        } else {
            self.fan_close
        }
    }
}

impl fmt::Debug for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.name, self.fan_close, self.fan_open)
    }
}

macro_rules! yaku {
    ($n: expr, $f: expr, $c: expr, $o: expr) => {
        Yaku {
            name: $n,
            func: $f,
            fan_close: $c,
            fan_open: $o,
        }
    };
}

pub static YAKU_LIST: &[Yaku] = &[
    yaku!("Round Wind", is_bakaze, 1, 1),
    yaku!("Seat Wind", is_jikaze, 1, 1),
    yaku!("Haku", is_haku, 1, 1),
    yaku!("Hatsu", is_hatsu, 1, 1),
    yaku!("Chun", is_chun, 1, 1),
    yaku!("Tanyao", is_tanyaochuu, 1, 1),
    yaku!("Pinfu", is_pinfu, 1, 0),
    yaku!("Iipeikou", is_iipeikou, 1, 0),
    yaku!("Ryanpeikou", is_ryanpeikou, 3, 0),
    yaku!("Ittsu", is_ikkitsuukan, 2, 1),
    yaku!("Sanshoku Doujun", is_sanshokudoujun, 2, 1),
    yaku!("Sanshoku Doukou", is_sanshokudoukou, 2, 2),
    yaku!("Chanta", is_chanta, 2, 1),
    yaku!("Junchan", is_junchan, 3, 2),
    yaku!("Honroutou", is_honroutou, 2, 2),
    yaku!("Chinroutou", is_chinroutou, 13, 13),
    yaku!("Toitoi", is_toitoihou, 2, 2),
    yaku!("Sanankou", is_sanankou, 2, 2),
    yaku!("Suuankou", is_suuankou, 13, 0),
    yaku!("Suuankou Tanki", is_suuankoutanki, 14, 0),
    yaku!("Sankantsu", is_sankantsu, 2, 2),
    yaku!("Suukantsu", is_suukantsu, 13, 13),
    yaku!("Honitsu", is_honiisou, 3, 2),
    yaku!("Chinitsu", is_chiniisou, 6, 5),
    yaku!("Shousangen", is_shousangen, 2, 2),
    yaku!("Daisangen", is_daisangen, 13, 13),
    yaku!("Shousuushii", is_shousuushii, 13, 13),
    yaku!("Daisuushii", is_daisuushii, 14, 14),
    yaku!("Ryuuiisou", is_ryuuiisou, 13, 13),
    yaku!("Tsuuiisou", is_tuuiisou, 13, 13),
    yaku!("Chuuren Poutou", is_chuurenpoutou, 13, 0),
    yaku!("Junsei Chuuren Poutou", is_junseichuurenpoutou, 14, 0),
    // special shapes
    yaku!("Kokushi Musou", is_kokushimusou, 13, 0),
    yaku!("Kokushi Musou 13-sided", is_kokushimusoujuusanmenmachi, 14, 0),
    yaku!("Chiitoitsu", is_chiitoitsu, 2, 0),
    // situational
    yaku!("Menzen Tsumo", is_menzentsumo, 1, 0),
    yaku!("Riichi", is_riichi, 1, 0),
    yaku!("Double Riichi", is_dabururiichi, 2, 0),
    yaku!("Ippatsu", is_ippatsu, 1, 0),
    yaku!("Haitei", is_haiteiraoyue, 1, 1),
    yaku!("Houtei", is_houteiraoyui, 1, 1),
    yaku!("Rinshan", is_rinshankaihou, 1, 1),
    yaku!("Chankan", is_chankan, 1, 1),
    yaku!("Tenhou", is_tenhou, 13, 0),
    yaku!("Chiihou", is_tiihou, 13, 0),
];

// (weaker, stronger): the weaker yaku is dropped when the stronger one holds
pub static DOMINATED: &[(&str, &str)] = &[
    ("Iipeikou", "Ryanpeikou"),
    ("Chanta", "Junchan"),
    ("Honroutou", "Chinroutou"),
    ("Honitsu", "Chinitsu"),
    ("Sanankou", "Suuankou"),
    ("Sanankou", "Suuankou Tanki"),
    ("Suuankou", "Suuankou Tanki"),
    ("Sankantsu", "Suukantsu"),
    ("Shousuushii", "Daisuushii"),
    ("Chuuren Poutou", "Junsei Chuuren Poutou"),
    ("Kokushi Musou", "Kokushi Musou 13-sided"),
    ("Riichi", "Double Riichi"),
];

fn remove_dominated(yaku: Vec<&'static Yaku>) -> Vec<&'static Yaku> {
    let holds = |name: &str| yaku.iter().any(|y| y.name == name);
    let keep: Vec<bool> = yaku
        .iter()
        .map(|y| {
            !DOMINATED
                .iter()
                .any(|&(weak, strong)| weak == y.name && holds(strong))
        })
        .collect();
    yaku.iter()
        .zip(keep)
        .filter(|(_, k)| *k)
        .map(|(&y, _)| y)
        .collect()
}

// Round wind
fn is_bakaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.prevalent_wind] == 1
}

// Seat wind
fn is_jikaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.seat_wind] == 1
}

fn is_haku(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DW] == 1
}

fn is_hatsu(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DG] == 1
}

fn is_chun(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DR] == 1
}

// All simples
fn is_tanyaochuu(ctx: &YakuContext) -> bool {
    !ctx.parsed_hand.iter().any(|sp| sp.has_end())
}

// Four concealed sequences, a non-value pair and a two-sided wait.
// Only concealed sequences are counted, so the hand is closed.
pub(super) fn is_pinfu(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu != 4 {
        return false;
    }

    let pt = &ctx.pair_tile;
    if pt.is_doragon() || (pt.is_wind() && (pt.1 == ctx.prevalent_wind || pt.1 == ctx.seat_wind))
    {
        return false;
    }

    ctx.wait == Wait::Ryanmen
}

fn is_iipeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count >= 1
}

fn is_ryanpeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 2
}

// Pure straight: 123, 456, 789 of one suit
fn is_ikkitsuukan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let mut f147 = [[false; 3]; 3];
    for sp in &ctx.parsed_hand {
        let t = sp.1;
        if sp.is_sequence() && (t.1 == 1 || t.1 == 4 || t.1 == 7) {
            f147[t.0][t.1 / 3] = true;
        }
    }

    f147.iter().any(|s| s.iter().all(|&b| b))
}

// The same sequence in the three suits
fn is_sanshokudoujun(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let mut mps = [[false; 3]; TNUM];
    for sp in &ctx.parsed_hand {
        if sp.is_sequence() {
            mps[sp.1 .1][sp.1 .0] = true;
        }
    }

    mps.iter().any(|s| s.iter().all(|&b| b))
}

// The same triplet in the three suits
fn is_sanshokudoukou(ctx: &YakuContext) -> bool {
    if ctx.counts.koutsu_total < 3 {
        return false;
    }

    let mut mps = [[false; 3]; TNUM];
    for sp in &ctx.parsed_hand {
        if sp.is_triplet() && sp.1.is_suit() {
            mps[sp.1 .1][sp.1 .0] = true;
        }
    }

    mps.iter().any(|s| s.iter().all(|&b| b))
}

// Terminal or honor in each set, with sequences and honors
fn is_chanta(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    let mut has_hornor = false;
    for sp in &ctx.parsed_hand {
        if !sp.has_end() {
            return false;
        }
        if sp.1.is_hornor() {
            has_hornor = true;
        }
    }

    has_hornor
}

// Terminal in each set, with sequences and no honors
fn is_junchan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    ctx.parsed_hand
        .iter()
        .all(|sp| sp.has_end() && !sp.1.is_hornor())
}

// Terminals and honors only
fn is_honroutou(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total != 0 || ctx.shape == Shape::Kokushimusou {
        return false;
    }

    let mut has_hornor = false;
    let mut has_terminal = false;
    for SetPair(_, t) in &ctx.parsed_hand {
        if t.is_hornor() {
            has_hornor = true;
        } else if t.is_terminal() {
            has_terminal = true;
        } else {
            return false;
        }
    }

    has_hornor && has_terminal
}

// Terminals only
fn is_chinroutou(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total != 0 || ctx.shape == Shape::Kokushimusou {
        return false;
    }

    ctx.parsed_hand.iter().all(|sp| sp.1.is_terminal())
}

fn is_toitoihou(ctx: &YakuContext) -> bool {
    ctx.counts.koutsu_total == 4
}

fn is_sanankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total >= 3
}

fn is_suuankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4
}

fn is_suuankoutanki(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4 && ctx.wait == Wait::Tanki
}

fn is_sankantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total >= 3
}

fn is_suukantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 4
}

fn n_suit_types(ctx: &YakuContext) -> usize {
    let tis = &ctx.counts.tis;
    [TM, TP, TS].iter().filter(|&&ti| tis[ti] > 0).count()
}

// Half flush
fn is_honiisou(ctx: &YakuContext) -> bool {
    ctx.shape != Shape::Kokushimusou && n_suit_types(ctx) == 1 && ctx.counts.tis[TZ] > 0
}

// Full flush
fn is_chiniisou(ctx: &YakuContext) -> bool {
    n_suit_types(ctx) == 1 && ctx.counts.tis[TZ] == 0
}

fn is_shousangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 2 && ctx.pair_tile.is_doragon()
}

fn is_daisangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 3
}

fn is_shousuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 3 && ctx.pair_tile.is_wind()
}

fn is_daisuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 4
}

// All green: s2, s3, s4, s6, s8 and green dragon
fn is_ryuuiisou(ctx: &YakuContext) -> bool {
    let tis = &ctx.counts.tis;
    if tis[TS] + tis[TZ] != ctx.parsed_hand.len() || ctx.shape == Shape::Kokushimusou {
        return false;
    }

    ctx.parsed_hand.iter().all(|sp| {
        let t = sp.1;
        if sp.is_sequence() {
            t.1 == 2 // only 234
        } else if t.is_hornor() {
            t.1 == DG
        } else {
            matches!(t.1, 2 | 3 | 4 | 6 | 8)
        }
    })
}

// All honors
fn is_tuuiisou(ctx: &YakuContext) -> bool {
    ctx.shape != Shape::Kokushimusou && ctx.counts.tis[TZ] == ctx.parsed_hand.len()
}

// Nine gates. Pure when the hand was waiting on all nine kinds.
fn is_chuurenpoutou(ctx: &YakuContext) -> bool {
    is_chuurenpoutou2(ctx)
}

fn is_junseichuurenpoutou(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    let cnt = ctx.hand[wt.0][wt.1];
    is_chuurenpoutou2(ctx) && (cnt == 2 || cnt == 4)
}

// Thirteen orphans. 13-sided when the pair is the winning tile.
fn is_kokushimusou(ctx: &YakuContext) -> bool {
    ctx.shape == Shape::Kokushimusou
}

fn is_kokushimusoujuusanmenmachi(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    ctx.shape == Shape::Kokushimusou && ctx.hand[wt.0][wt.1] == 2
}

fn is_chiitoitsu(ctx: &YakuContext) -> bool {
    ctx.shape == Shape::Chiitoitsu
}

fn is_menzentsumo(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.menzentsumo
}

fn is_riichi(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.riichi
}

fn is_dabururiichi(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.dabururiichi
}

fn is_ippatsu(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.ippatsu
}

fn is_haiteiraoyue(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.haiteiraoyue
}

fn is_houteiraoyui(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.houteiraoyui
}

fn is_rinshankaihou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.rinshankaihou
}

fn is_chankan(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.chankan
}

fn is_tenhou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.tenhou
}

fn is_tiihou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.tiihou
}

// 1112345678999 + any tile of the same suit, closed
fn is_chuurenpoutou2(ctx: &YakuContext) -> bool {
    if ctx.is_open || ctx.shape != Shape::Normal || ctx.counts.ankan != 0 {
        return false;
    }

    let tis = &ctx.counts.tis;
    let ti = match [TM, TP, TS].iter().find(|&&ti| tis[ti] == 5) {
        Some(&ti) => ti,
        None => return false,
    };

    let h = &ctx.hand;
    if h[ti][1] < 3 || h[ti][9] < 3 {
        return false;
    }
    (2..9).all(|ni| h[ti][ni] != 0)
}

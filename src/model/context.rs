use super::*;
use crate::error::{EvalError, EvalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Riichi {
    pub turn: usize,     // turn of the declaration (first draw = 1)
    pub is_double: bool, // declared on an uninterrupted first turn
}

// Situational facts of one win evaluation. Winds are Tnum of the honor row
// (WE, WS, WW, WN); the seat with the east wind is the dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub round_wind: Tnum,
    pub seat_wind: Tnum,
    pub is_self_drawn: bool,
    pub discarder: Option<Tnum>, // seat wind of the discarding player (ron only)
    pub riichi: Option<Riichi>,
    pub turn: usize, // number of draws of the winner in this hand
    pub is_first_uninterrupted_turn: bool,
    pub is_ippatsu: bool,
    pub is_last_tile: bool, // haitei (self-draw) or houtei (ron)
    pub is_rinshan: bool,
    pub is_chankan: bool,
    pub kan_count: usize, // quads declared at the table in this hand
    pub dora_indicators: Vec<Tile>,
    pub ura_dora_indicators: Vec<Tile>, // only counted with riichi
    pub honba: usize,
    pub riichi_sticks: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            round_wind: WE,
            seat_wind: WE,
            is_self_drawn: true,
            discarder: None,
            riichi: None,
            turn: 2,
            is_first_uninterrupted_turn: false,
            is_ippatsu: false,
            is_last_tile: false,
            is_rinshan: false,
            is_chankan: false,
            kan_count: 0,
            dora_indicators: vec![],
            ura_dora_indicators: vec![],
            honba: 0,
            riichi_sticks: 0,
        }
    }
}

impl Context {
    pub fn tsumo(round_wind: Tnum, seat_wind: Tnum) -> Self {
        Self {
            round_wind,
            seat_wind,
            ..Default::default()
        }
    }

    pub fn ron(round_wind: Tnum, seat_wind: Tnum, discarder: Tnum) -> Self {
        Self {
            round_wind,
            seat_wind,
            is_self_drawn: false,
            discarder: Some(discarder),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_dealer(&self) -> bool {
        self.seat_wind == WE
    }

    #[inline]
    pub fn is_riichi(&self) -> bool {
        self.riichi.is_some()
    }

    // Rejects contradictory flags. `hand` is the winner's hand snapshot.
    pub fn validate(&self, hand: &Hand) -> EvalResult<()> {
        let invalid = |reason: &str| {
            Err(EvalError::InvalidContext {
                reason: reason.to_string(),
            })
        };
        let is_wind = |w: Tnum| (WE..=WN).contains(&w);

        if !is_wind(self.round_wind) || !is_wind(self.seat_wind) {
            return invalid("wind out of range");
        }
        let indicators = self.dora_indicators.iter().chain(&self.ura_dora_indicators);
        if indicators.clone().any(|t| !t.is_valid()) {
            return invalid("invalid dora indicator");
        }
        if self.dora_indicators.len() > 5 || self.ura_dora_indicators.len() > 5 {
            return invalid("more than 5 dora indicators");
        }
        match (self.is_self_drawn, self.discarder) {
            (true, Some(_)) => return invalid("self-draw with a discarding player"),
            (false, None) => return invalid("claimed discard without a discarding player"),
            (false, Some(d)) if !is_wind(d) => return invalid("discarder wind out of range"),
            (false, Some(d)) if d == self.seat_wind => {
                return invalid("winner cannot claim own discard")
            }
            _ => {}
        }

        if let Some(r) = self.riichi {
            if hand.is_open() {
                return invalid("riichi with an open hand");
            }
            if r.turn == 0 || r.turn > self.turn {
                return invalid("riichi declared after the current turn");
            }
            if r.is_double && r.turn != 1 {
                return invalid("double riichi must be declared on the first turn");
            }
            if self.is_ippatsu && self.turn > r.turn + 1 {
                return invalid("ippatsu after a full turn past riichi");
            }
        } else if self.is_ippatsu {
            return invalid("ippatsu without riichi");
        }

        if self.is_rinshan {
            if !self.is_self_drawn {
                return invalid("rinshan win on a discard");
            }
            if self.kan_count == 0 {
                return invalid("rinshan win without any quad");
            }
        }
        if self.is_chankan && self.is_self_drawn {
            return invalid("chankan on self-draw");
        }
        if self.is_last_tile && (self.is_rinshan || self.is_chankan) {
            return invalid("last tile win together with rinshan or chankan");
        }
        if self.is_first_uninterrupted_turn {
            if self.turn != 1 {
                return invalid("first uninterrupted turn flag after turn 1");
            }
            if self.riichi.is_some() || !hand.melds.is_empty() {
                return invalid("first uninterrupted turn with riichi or melds");
            }
        }
        if hand.count_kan() > self.kan_count {
            return invalid("hand holds more quads than declared at the table");
        }

        Ok(())
    }
}

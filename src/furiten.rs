use serde::{Deserialize, Serialize};

use crate::debug;
use crate::hand::winning_tiles;
use crate::model::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuritenState {
    Clear,
    Temporary, // passed a win on a discard, cleared by the next own draw
    Permanent, // a winning tile is in the own discards, kept until the hand ends
}

#[derive(Debug, Clone, Default)]
struct SeatFuriten {
    discards: Vec<Tile>, // kinds discarded in this hand (red 5 as 5)
    waits: Vec<Tile>,    // current winning tiles
    is_temporary: bool,
    is_permanent: bool,
    is_riichi: bool,
}

impl SeatFuriten {
    fn check_discards(&mut self) {
        if self.discards.iter().any(|d| self.waits.contains(d)) {
            self.is_permanent = true;
        }
    }
}

// Furiten state of every seat in one hand.
// The session reports the events, the tracker never infers turn order.
// Seats are 0..SEAT, any other seat is a caller bug and panics.
#[derive(Debug, Clone, Default)]
pub struct FuritenTracker {
    seats: [SeatFuriten; SEAT],
}

impl FuritenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // new hand
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn seat(&self, seat: Seat) -> &SeatFuriten {
        debug_assert!(seat < SEAT, "seat out of range: {}", seat);
        &self.seats[seat]
    }

    fn seat_mut(&mut self, seat: Seat) -> &mut SeatFuriten {
        debug_assert!(seat < SEAT, "seat out of range: {}", seat);
        &mut self.seats[seat]
    }

    pub fn state(&self, seat: Seat) -> FuritenState {
        let sf = self.seat(seat);
        if sf.is_permanent {
            FuritenState::Permanent
        } else if sf.is_temporary {
            FuritenState::Temporary
        } else {
            FuritenState::Clear
        }
    }

    pub fn is_ron_legal(&self, seat: Seat) -> bool {
        self.state(seat) == FuritenState::Clear
    }

    pub fn waits(&self, seat: Seat) -> &[Tile] {
        &self.seat(seat).waits
    }

    // Replaces the winning tiles of `seat`, e.g. after a discard changed
    // the hand. A wait already in the discards makes the seat furiten.
    pub fn set_waits(&mut self, seat: Seat, waits: Vec<Tile>) {
        let mut waits: Vec<Tile> = waits.into_iter().map(|t| t.to_normal()).collect();
        waits.sort();
        waits.dedup();

        let sf = self.seat_mut(seat);
        sf.waits = waits;
        sf.check_discards();
        debug!(
            "seat {} waits {:?} {:?}",
            seat,
            self.waits(seat),
            self.state(seat)
        );
    }

    // `hand` is the 13-tile hand after the discard
    pub fn update_waits(&mut self, seat: Seat, hand: &Hand) {
        self.set_waits(seat, winning_tiles(hand));
    }

    pub fn mark_discard(&mut self, seat: Seat, tile: Tile) {
        let sf = self.seat_mut(seat);
        let t = tile.to_normal();
        if !sf.discards.contains(&t) {
            sf.discards.push(t);
        }
        sf.check_discards();
    }

    // `seat` did not claim a win it could have claimed
    pub fn mark_pass_on_call(&mut self, seat: Seat) {
        let sf = self.seat_mut(seat);
        if sf.is_riichi {
            sf.is_permanent = true; // waits are fixed after riichi
        } else {
            sf.is_temporary = true;
        }
        debug!("seat {} passed a win: {:?}", seat, self.state(seat));
    }

    pub fn mark_draw(&mut self, seat: Seat) {
        self.seat_mut(seat).is_temporary = false;
    }

    pub fn mark_riichi(&mut self, seat: Seat) {
        self.seat_mut(seat).is_riichi = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Tile {
        Tile::from_symbol(s).unwrap()
    }

    #[test]
    fn test_permanent_furiten() {
        let mut ft = FuritenTracker::new();
        // m1/m4 two-sided wait
        let hand = Hand::from_string("m23456789p123s11").unwrap();
        ft.update_waits(0, &hand);
        assert_eq!(ft.waits(0), &[t("m1"), t("m4"), t("m7")]);
        assert!(ft.is_ron_legal(0));

        ft.mark_discard(0, t("m4"));
        assert_eq!(ft.state(0), FuritenState::Permanent);

        // later discards and draws never clear it
        ft.mark_draw(0);
        ft.mark_discard(0, t("z1"));
        ft.set_waits(0, vec![t("p5")]);
        assert!(!ft.is_ron_legal(0));

        ft.reset();
        assert!(ft.is_ron_legal(0));
    }

    #[test]
    fn test_discard_before_wait() {
        let mut ft = FuritenTracker::new();
        ft.mark_discard(1, t("p0"));
        assert!(ft.is_ron_legal(1));
        // the red five discarded earlier matches a later p5 wait
        ft.set_waits(1, vec![t("p5"), t("p8")]);
        assert_eq!(ft.state(1), FuritenState::Permanent);
    }

    #[test]
    fn test_temporary_furiten() {
        let mut ft = FuritenTracker::new();
        ft.set_waits(2, vec![t("s3"), t("s6")]);
        ft.mark_pass_on_call(2);
        assert_eq!(ft.state(2), FuritenState::Temporary);
        assert!(!ft.is_ron_legal(2));
        // other seats are not affected
        assert!(ft.is_ron_legal(3));

        ft.mark_draw(2);
        assert_eq!(ft.state(2), FuritenState::Clear);
    }

    #[test]
    fn test_pass_after_riichi() {
        let mut ft = FuritenTracker::new();
        ft.set_waits(3, vec![t("z5")]);
        ft.mark_riichi(3);
        ft.mark_pass_on_call(3);
        ft.mark_draw(3);
        assert_eq!(ft.state(3), FuritenState::Permanent);
    }

    #[test]
    #[should_panic]
    fn test_seat_out_of_range() {
        let mut ft = FuritenTracker::new();
        ft.mark_draw(SEAT);
    }
}

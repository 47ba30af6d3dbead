// Type aliases
pub type Type = usize; // tile type (manzu, pinzu, souzu, honors)
pub type Tnum = usize; // tile number (1~9, 0: red 5)
pub type Seat = usize; // seat index (0~3)
pub type Point = i32;

// Number
pub const SEAT: usize = 4; // number of seats
pub const TYPE: usize = 4; // number of tile types
pub const TNUM: usize = 10; // number of tile numbers (1~9, 0: red 5)
pub const TILE: usize = 4; // copies of each kind
pub const RED5_PER_SUIT: usize = 1; // red fives in each suit

// Type Index
pub const TM: usize = 0; // Manzu
pub const TP: usize = 1; // Pinzu
pub const TS: usize = 2; // Souzu
pub const TZ: usize = 3; // Zihai (honors)

// Tnum Index (honors)
pub const WE: usize = 1; // Wind:    East
pub const WS: usize = 2; // Wind:    South
pub const WW: usize = 3; // Wind:    West
pub const WN: usize = 4; // Wind:    North
pub const DW: usize = 5; // Doragon: White
pub const DG: usize = 6; // Doragon: Green
pub const DR: usize = 7; // Doragon: Red
pub const UK: usize = 8; // Unknown

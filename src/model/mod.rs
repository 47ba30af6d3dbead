// data model of the hand evaluator
mod context;
mod decomposition;
mod define;
mod hand;
mod meld;
mod tile;
mod win_context;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use context::*;
pub use decomposition::*;
pub use define::*;
pub use hand::*;
pub use meld::*;
pub use tile::*;
pub use win_context::*;

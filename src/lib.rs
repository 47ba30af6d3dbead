#![warn(rust_2018_idioms)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::too_many_arguments)]

pub mod app;
pub mod error;
pub mod furiten;
pub mod hand;
pub mod model;
pub mod util;

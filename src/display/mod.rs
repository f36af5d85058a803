//! Status display: when to redraw ([`scheduler`]) and what to draw
//! ([`screen`]).

pub mod scheduler;
pub mod screen;

//! Nine poker chips dropped onto the bottom of a window, each driven by its
//! own rapier2d world and eased into a resting row.

pub mod modules;

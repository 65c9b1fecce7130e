pub extern crate nalgebra as na;

pub mod cursor;
pub mod footprint;
pub mod geodesy;
pub mod path;
pub mod propagator;
pub mod report;
pub mod scenario;
pub mod session;
pub mod source;
pub mod trail;
pub mod units;

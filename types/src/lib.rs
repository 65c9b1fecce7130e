extern crate nalgebra as na;

pub mod geo_point;
pub mod prelude;
pub mod time;
pub mod tle;

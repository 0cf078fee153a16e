#[macro_use]
extern crate approx;
extern crate nalgebra as na;

mod cuboid_cuboid_penetration;
mod degenerate_penetration;
mod gjk3;
mod penetration_properties;

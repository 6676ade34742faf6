//! Host-side glue between a sound graph and whatever drives it.

pub mod driver;

pub use driver::Driver;

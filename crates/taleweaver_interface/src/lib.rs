//! Trait definitions for the Taleweaver story service.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;

pub use driver::TaleweaverDriver;

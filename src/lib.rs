pub mod cli;
pub mod diagnostic;
pub mod error;
pub mod model;
pub mod parsers;
pub mod report;
pub mod source;

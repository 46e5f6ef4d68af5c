pub mod cobertura;
pub mod tree;

use crate::error::Result;
use crate::model::Report;

/// Every report parser implements this trait.
pub trait Parser {
    /// Parse the input bytes into the report model.
    fn parse(&self, input: &[u8]) -> Result<Report>;
}

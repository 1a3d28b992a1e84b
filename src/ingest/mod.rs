//! Table construction from external text: delimited data, string grids and
//! JSON documents, plus serialization back to delimited text.

pub mod delimited;
pub mod grid;
pub mod json;

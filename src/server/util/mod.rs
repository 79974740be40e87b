//! Small parsing helpers shared by the model layer.

pub mod parse;

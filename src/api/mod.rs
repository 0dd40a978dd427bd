pub mod parse;
pub mod pipe;
pub mod settings;

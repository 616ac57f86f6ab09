//! Core of the Verdict expression language: lexer, parser, evaluator,
//! member resolution and the interpreter API.

pub mod api;
pub mod emit;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod members;
pub mod parser;
pub mod scope;
pub mod stdlib;
pub mod values;

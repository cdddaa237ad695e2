pub mod automaton;
pub mod converter;
pub mod logger;
pub mod validation;

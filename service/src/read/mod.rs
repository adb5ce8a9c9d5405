//! Read entities definitions.

pub mod listing;
pub mod predicate;

pub use self::predicate::Predicate;

pub mod builder;
pub mod catalog;
pub mod error;
pub mod expression;
pub mod query;
pub mod resolver;

pub mod cache;
pub mod currency;
pub mod fetch;
pub mod mapping;
pub mod matrix;
pub mod output;
pub mod parser;
pub mod quotes;

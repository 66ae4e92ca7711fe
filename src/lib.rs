pub mod aggregate;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod records;

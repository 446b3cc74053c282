pub mod reader;

pub use reader::ExpressionReader;

mod select;

pub use select::{quote_identifier, CompileError, SelectBuilder, COMPARISON_OPS};

pub mod statement;

pub use statement::{
    read_statement, read_statement_file, ImportError, ImportOutcome, SkippedRow, StatementProfile,
};

pub mod record;
pub mod row;
pub mod shift;
pub mod table;

pub use record::LogRecord;
pub use row::{LogRow, Parsed};
pub use shift::Shift;
pub use table::LogTable;

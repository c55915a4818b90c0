/// Trace CSV export.
pub mod export;
pub mod load;
pub mod time;

// Shared helpers for dates and clock times

pub mod date;
pub mod time;

// Aggregate handlers
pub mod a001_sale_entry;
pub mod a002_employee;

// Dashboard handlers
pub mod d400_period_summary;

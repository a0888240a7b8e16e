pub mod a001_sale_entry;
pub mod a002_employee;
pub mod common;

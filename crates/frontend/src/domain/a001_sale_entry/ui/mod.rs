pub mod daily_ledger;
pub mod entry_form;
pub mod last_sale;

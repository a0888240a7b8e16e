pub mod d400_period_summary;

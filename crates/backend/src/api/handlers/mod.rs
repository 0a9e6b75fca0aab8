// Dashboard handlers (d400)
pub mod d400_sales_explorer;

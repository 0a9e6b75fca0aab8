pub mod sales_store;

pub mod a001_product;
pub mod a002_stock_batch;
pub mod a003_stock_adjustment;

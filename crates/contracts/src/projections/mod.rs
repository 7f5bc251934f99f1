pub mod p901_stock_movements;

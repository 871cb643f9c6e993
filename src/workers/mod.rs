pub mod quote_refresh;

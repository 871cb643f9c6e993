pub mod context;
pub mod display;
pub mod quote;
pub mod settings;
pub mod token;

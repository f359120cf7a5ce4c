pub mod bills;
pub mod history;
pub mod products;

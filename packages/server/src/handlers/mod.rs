pub mod health;
pub mod intelligence;
pub mod pdf;

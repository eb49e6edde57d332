mod intelligence;
mod pdf;
mod upload;

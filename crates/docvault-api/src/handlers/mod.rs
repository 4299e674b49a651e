pub mod browse;
pub mod upload;

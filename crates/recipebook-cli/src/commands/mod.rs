pub mod browse;
pub mod export;
pub mod generate;
pub mod init;
pub mod recipe;

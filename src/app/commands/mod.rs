pub mod config;
pub mod maps;
pub mod run;

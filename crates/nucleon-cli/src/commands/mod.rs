pub mod config;
pub mod qc;
pub mod run;

use crate::cli::run;

pub mod api;
pub mod catalog;
pub mod cli;
mod config;
pub mod domain;
pub mod player;

fn main() {
    run();
}

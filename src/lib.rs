//! Turns a week of WakaTime stats into pie chart data. Entries can be hidden, grouped and
//! recolored before the chart is stored and served over HTTP or printed in a terminal.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod server;
pub mod service;
pub mod utils;

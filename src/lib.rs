pub mod cli;
pub mod config;
pub mod data_models;
pub mod fetcher;
pub mod normalizer;
pub mod render;
pub mod search;

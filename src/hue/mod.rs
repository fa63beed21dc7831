pub mod client;
pub mod light;
pub mod rest;

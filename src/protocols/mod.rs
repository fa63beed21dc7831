pub mod https;
pub mod serial;

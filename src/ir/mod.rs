pub mod codes;
pub mod color;
pub mod handlers;
pub mod receiver;

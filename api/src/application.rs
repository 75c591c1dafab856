pub mod http;
pub mod viewer;

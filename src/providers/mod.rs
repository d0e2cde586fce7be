pub mod http_backend;
pub mod util;

pub use http_backend::HttpBackend;

// Persistence backends

pub mod http_file;

pub use http_file::HttpFileBackend;

pub mod compression;
pub mod response_middleware;

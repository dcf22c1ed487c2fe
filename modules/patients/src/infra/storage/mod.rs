pub mod kv_repo;
pub mod mapper;

pub mod scan_queries;
pub mod status_queries;

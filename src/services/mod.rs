pub mod backend_client;
pub mod fetch_service;
pub mod reconciliation_service;
pub mod rollup_service;
pub mod stats_service;

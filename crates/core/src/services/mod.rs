pub mod chart_service;
pub mod market_service;
pub mod search_service;
pub mod sort_service;
pub mod view_service;

pub mod analytics_service;
pub mod chart_service;
pub mod date_service;

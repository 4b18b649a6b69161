pub mod chart_service;
pub mod coin_service;
pub mod convert_service;
pub mod p2p_service;
pub mod quote_service;

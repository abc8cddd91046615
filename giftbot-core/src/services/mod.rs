pub mod redemption_service;
pub mod roster_service;

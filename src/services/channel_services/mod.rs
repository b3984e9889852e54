pub mod channel_client_service;
pub mod reconnect_service;

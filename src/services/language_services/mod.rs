pub mod language_sniffer_service;

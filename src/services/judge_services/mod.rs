pub mod judge_adapter_service;

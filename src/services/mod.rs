pub mod billing;
pub mod tenant_service;

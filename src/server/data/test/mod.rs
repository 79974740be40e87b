mod audit_log;
mod fleet;
mod gallery;
mod gdpr;
mod port_battle;
mod signup;
mod user;

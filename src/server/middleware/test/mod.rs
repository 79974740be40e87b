mod auth;
mod maintenance;

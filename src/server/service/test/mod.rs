mod blacklist;
mod gallery;
mod port_battle;
mod user;

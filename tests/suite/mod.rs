mod persistence;
mod properties;
mod session;

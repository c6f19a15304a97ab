mod cookies;
mod error;
mod protocol;

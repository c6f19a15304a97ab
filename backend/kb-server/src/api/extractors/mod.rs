pub mod token_cookies;

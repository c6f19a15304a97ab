use crate::api::cookies::{CookieOptions, IDENTITY_COOKIE, STATE_COOKIE, build_set_cookie, find_cookie};

use std::time::Duration;

use googletest::prelude::*;
use http::{HeaderMap, HeaderValue, header::COOKIE};

fn headers(values: &[&str]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for value in values {
        headers.append(COOKIE, HeaderValue::from_str(value).unwrap());
    }
    headers
}

#[test]
fn given_both_cookies_when_finding_then_each_is_returned() {
    let headers = headers(&["auth-token=aaa; state-token=bbb"]);

    assert_eq!(find_cookie(&headers, IDENTITY_COOKIE).as_deref(), Some("aaa"));
    assert_eq!(find_cookie(&headers, STATE_COOKIE).as_deref(), Some("bbb"));
}

#[test]
fn given_cookies_split_across_headers_when_finding_then_all_headers_are_searched() {
    let headers = headers(&["theme=dark", "state-token=xyz"]);

    assert_eq!(find_cookie(&headers, STATE_COOKIE).as_deref(), Some("xyz"));
}

#[test]
fn given_missing_or_empty_cookie_when_finding_then_none() {
    let headers = headers(&["auth-token=; other=1"]);

    assert!(find_cookie(&headers, IDENTITY_COOKIE).is_none());
    assert!(find_cookie(&headers, STATE_COOKIE).is_none());
}

#[test]
fn given_similar_name_when_finding_then_exact_name_is_required() {
    let headers = headers(&["xauth-token=nope; auth-token=yes"]);

    assert_eq!(find_cookie(&headers, IDENTITY_COOKIE).as_deref(), Some("yes"));
}

#[test]
fn given_options_when_building_cookie_then_attributes_are_set() {
    let options = CookieOptions {
        max_age: Duration::from_secs(3600),
        secure: false,
    };

    let cookie = build_set_cookie(STATE_COOKIE, "token", &options).unwrap();

    assert_that!(
        cookie.to_str().unwrap(),
        eq("state-token=token; HttpOnly; SameSite=Strict; Path=/; Max-Age=3600")
    );
}

#[test]
fn given_secure_option_when_building_cookie_then_secure_flag_is_appended() {
    let options = CookieOptions {
        max_age: Duration::from_secs(60),
        secure: true,
    };

    let cookie = build_set_cookie(IDENTITY_COOKIE, "t", &options).unwrap();

    assert_that!(cookie.to_str().unwrap(), ends_with("; Secure"));
}

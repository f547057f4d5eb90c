// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Security headers middleware.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// Path prefix of publicly served photo files.
pub const PHOTO_PATH_PREFIX: &str = "/uploads/photos";

/// Add security headers to all responses.
///
/// Photos are embedded by the frontend from another origin, so they get a
/// cross-origin resource policy; API responses stay same-origin.
pub async fn add_security_headers(req: Request, next: Next) -> Response {
    let is_photo = req.uri().path().starts_with(PHOTO_PATH_PREFIX);
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert(
        "Strict-Transport-Security",
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    headers.insert("Referrer-Policy", HeaderValue::from_static("no-referrer"));
    headers.insert(
        "Cross-Origin-Resource-Policy",
        HeaderValue::from_static(if is_photo { "cross-origin" } else { "same-origin" }),
    );

    response
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod auth;
pub mod catalog;
pub mod identity;
pub mod locks;
pub mod password;
pub mod photos;
pub mod reviews;

pub use auth::{AuthService, IssuedCredential};
pub use catalog::ExcursionService;
pub use identity::{IdentityProfile, IdentityProvider};
pub use locks::KeyedLocks;
pub use photos::{PhotoService, PhotoStore, UploadedPhoto};
pub use reviews::ReviewService;

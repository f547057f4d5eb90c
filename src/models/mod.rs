// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod excursion;
pub mod reference;
pub mod review;
pub mod user;

pub use excursion::{Excursion, ExcursionFilter, ExcursionInput};
pub use review::{RatingAggregate, Review, ReviewInput};
pub use user::{Session, User, UserResponse};

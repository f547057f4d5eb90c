// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Review model and the rating aggregate derived from it.

use crate::time_utils::iso8601;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored review (`reviews` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub excursion_id: String,
    pub user_id: String,
    /// Reviewer name at the time of writing
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/excursions/{id}/reviews`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewInput {
    /// Wide enough that any JSON integer reaches range validation
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    #[validate(length(min = 10, max = 1000))]
    pub comment: String,
}

/// Average rating and count over an excursion's reviews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingAggregate {
    /// Mean rating rounded to one decimal place; 0.0 without reviews
    pub average_rating: f64,
    pub review_count: u32,
}

impl RatingAggregate {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self {
                average_rating: 0.0,
                review_count: 0,
            };
        }

        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        let mean = f64::from(sum) / reviews.len() as f64;

        Self {
            average_rating: round_to_tenths(mean),
            review_count: reviews.len() as u32,
        }
    }
}

/// Round a non-negative value to one decimal, ties to even, deciding on the
/// exact binary value rather than on `value * 10.0`.
fn round_to_tenths(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }

    // value == mantissa * 2^exponent exactly.
    let bits = value.to_bits();
    let exponent_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if exponent_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exponent_bits - 1075)
    };

    if exponent >= 0 {
        return value;
    }
    let shift = exponent.unsigned_abs();
    if shift >= 100 {
        return 0.0;
    }

    let scaled = u128::from(mantissa) * 10;
    let tenths = scaled >> shift;
    let remainder = scaled - (tenths << shift);
    let half = 1u128 << (shift - 1);

    let tenths = if remainder > half || (remainder == half && tenths % 2 == 1) {
        tenths + 1
    } else {
        tenths
    };
    tenths as f64 / 10.0
}

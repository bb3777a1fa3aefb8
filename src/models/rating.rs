use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ShopError};

use super::product::Review;

/// Shown in place of an average when no ratings exist.
pub const NO_RATINGS_LABEL: &str = "No ratings yet";

// ---------------------------------------------------------------------------
// Rating — Star rating in 1..=5
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn new(value: i64) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ShopError::InvalidRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ShopError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> u8 {
        r.0
    }
}

// ---------------------------------------------------------------------------
// RatingBook — Page-local ratings for one product
// ---------------------------------------------------------------------------

/// Ratings held in memory for the product currently on screen.
///
/// Seeded from the catalog's reviews; visitor submissions are appended and
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingBook {
    ratings: Vec<Rating>,
}

impl RatingBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from reviews, skipping any whose rating is not a whole 1..=5.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let ratings = reviews
            .iter()
            .filter_map(|review| {
                let Some(r) = review.rating.as_f64() else {
                    warn!(review = %review.id, rating = %review.rating, "skipping non-numeric review rating");
                    return None;
                };
                if r.fract() != 0.0 {
                    warn!(review = %review.id, rating = r, "skipping non-integer review rating");
                    return None;
                }
                match Rating::new(r as i64) {
                    Ok(rating) => Some(rating),
                    Err(_) => {
                        warn!(review = %review.id, rating = r, "skipping out-of-range review rating");
                        None
                    }
                }
            })
            .collect();
        Self { ratings }
    }

    /// Validate and append a visitor rating. Out-of-range input leaves the
    /// book untouched.
    pub fn submit(&mut self, value: i64) -> Result<Rating> {
        let rating = Rating::new(value)?;
        self.ratings.push(rating);
        Ok(rating)
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Arithmetic mean rounded to one decimal.
    pub fn average(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: u32 = self.ratings.iter().map(|r| u32::from(r.value())).sum();
        let mean = f64::from(sum) / self.ratings.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }

    pub fn average_label(&self) -> String {
        match self.average() {
            Some(avg) => format!("{avg:.1}"),
            None => NO_RATINGS_LABEL.to_string(),
        }
    }
}

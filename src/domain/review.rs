use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A per-item customer review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub item_id: String,
    pub uid: String,
    pub author: String,
    pub rating: u8,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
    pub flagged: bool,
}

/// Denormalized moderation copy of a flagged review, keyed by review id in
/// its own collection. Kept consistent with the source review by the review
/// service (flag, dismiss and delete touch both copies together).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlaggedReview {
    pub review: Review,
}

/// Mean rating across reviews; 0.0 when there are none.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| r.rating as u32).sum();
    sum as f64 / reviews.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(rating: u8) -> Review {
        Review {
            id: "review_1".to_string(),
            item_id: "item_1".to_string(),
            uid: "user_1".to_string(),
            author: "Alice".to_string(),
            rating,
            comment: "Fresh and tasty".to_string(),
            timestamp: Utc::now(),
            flagged: false,
        }
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(average_rating(&[review(4)]), 4.0);
        assert_eq!(average_rating(&[review(2), review(5)]), 3.5);
    }
}

use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::actor_framework::ServiceResponse;
use crate::clients::ReviewClient;
use crate::domain::{Clock, FlaggedReview, Review};

use super::error::ReviewError;

#[derive(Debug)]
pub enum ReviewRequest {
    SubmitReview {
        item_id: String,
        uid: String,
        author: String,
        rating: u8,
        comment: String,
        respond_to: ServiceResponse<String, ReviewError>,
    },
    EditReview {
        item_id: String,
        review_id: String,
        rating: u8,
        comment: String,
        respond_to: ServiceResponse<Review, ReviewError>,
    },
    ListReviews {
        item_id: String,
        respond_to: ServiceResponse<Vec<Review>, ReviewError>,
    },
    FlagReview {
        item_id: String,
        review_id: String,
        respond_to: ServiceResponse<(), ReviewError>,
    },
    DismissFlag {
        review_id: String,
        respond_to: ServiceResponse<(), ReviewError>,
    },
    DeleteReview {
        item_id: String,
        review_id: String,
        respond_to: ServiceResponse<(), ReviewError>,
    },
    FlaggedQueue {
        respond_to: ServiceResponse<Vec<FlaggedReview>, ReviewError>,
    },
    Shutdown,
}

/// Owns per-item reviews plus the denormalized flagged-review queue. The
/// two copies are only ever written together, which is what keeps the
/// moderation worklist consistent with the source reviews.
pub struct ReviewService {
    receiver: mpsc::Receiver<ReviewRequest>,
    reviews: HashMap<String, Vec<Review>>,
    flagged: HashMap<String, FlaggedReview>,
    next_id: u64,
    clock: Clock,
}

impl ReviewService {
    pub fn new(buffer_size: usize, clock: Clock) -> (Self, ReviewClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            reviews: HashMap::new(),
            flagged: HashMap::new(),
            next_id: 1,
            clock,
        };
        let client = ReviewClient::new(sender);
        (service, client)
    }

    #[instrument(name = "review_service", skip(self))]
    pub async fn run(mut self) {
        info!("ReviewService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ReviewRequest::SubmitReview {
                    item_id,
                    uid,
                    author,
                    rating,
                    comment,
                    respond_to,
                } => {
                    let result = self.handle_submit_review(item_id, uid, author, rating, comment);
                    let _ = respond_to.send(result);
                }
                ReviewRequest::EditReview {
                    item_id,
                    review_id,
                    rating,
                    comment,
                    respond_to,
                } => {
                    let result = self.handle_edit_review(&item_id, &review_id, rating, comment);
                    let _ = respond_to.send(result);
                }
                ReviewRequest::ListReviews {
                    item_id,
                    respond_to,
                } => {
                    let mut reviews = self.reviews.get(&item_id).cloned().unwrap_or_default();
                    reviews.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                    let _ = respond_to.send(Ok(reviews));
                }
                ReviewRequest::FlagReview {
                    item_id,
                    review_id,
                    respond_to,
                } => {
                    let result = self.handle_flag_review(&item_id, &review_id);
                    let _ = respond_to.send(result);
                }
                ReviewRequest::DismissFlag {
                    review_id,
                    respond_to,
                } => {
                    let result = self.handle_dismiss_flag(&review_id);
                    let _ = respond_to.send(result);
                }
                ReviewRequest::DeleteReview {
                    item_id,
                    review_id,
                    respond_to,
                } => {
                    let result = self.handle_delete_review(&item_id, &review_id);
                    let _ = respond_to.send(result);
                }
                ReviewRequest::FlaggedQueue { respond_to } => {
                    let queue: Vec<FlaggedReview> = self.flagged.values().cloned().collect();
                    let _ = respond_to.send(Ok(queue));
                }
                ReviewRequest::Shutdown => {
                    info!("ReviewService shutting down");
                    break;
                }
            }
        }

        info!("ReviewService stopped");
    }

    #[instrument(fields(item_id = %item_id, rating = %rating), skip(self, uid, author, comment))]
    fn handle_submit_review(
        &mut self,
        item_id: String,
        uid: String,
        author: String,
        rating: u8,
        comment: String,
    ) -> Result<String, ReviewError> {
        debug!("Processing submit_review request");

        if !(1..=5).contains(&rating) {
            return Err(ReviewError::InvalidRating(rating));
        }
        if comment.trim().is_empty() {
            return Err(ReviewError::ValidationError("Comment required".to_string()));
        }

        let id = format!("review_{}", self.next_id);
        self.next_id += 1;

        let review = Review {
            id: id.clone(),
            item_id: item_id.clone(),
            uid,
            author,
            rating,
            comment,
            timestamp: (self.clock)(),
            flagged: false,
        };
        self.reviews.entry(item_id).or_default().push(review);

        info!(review_id = %id, "Review submitted");
        Ok(id)
    }

    #[instrument(fields(item_id = %item_id, review_id = %review_id), skip(self, comment))]
    fn handle_edit_review(
        &mut self,
        item_id: &str,
        review_id: &str,
        rating: u8,
        comment: String,
    ) -> Result<Review, ReviewError> {
        debug!("Processing edit_review request");

        if !(1..=5).contains(&rating) {
            return Err(ReviewError::InvalidRating(rating));
        }

        let now = (self.clock)();
        let review = self
            .reviews
            .get_mut(item_id)
            .and_then(|reviews| reviews.iter_mut().find(|r| r.id == review_id))
            .ok_or_else(|| ReviewError::NotFound(review_id.to_string()))?;

        review.rating = rating;
        review.comment = comment;
        review.timestamp = now;
        Ok(review.clone())
    }

    /// Marks the source review and writes the denormalized queue copy in
    /// the same handler, keeping the two in step.
    #[instrument(fields(item_id = %item_id, review_id = %review_id), skip(self))]
    fn handle_flag_review(&mut self, item_id: &str, review_id: &str) -> Result<(), ReviewError> {
        debug!("Processing flag_review request");

        let review = self
            .reviews
            .get_mut(item_id)
            .and_then(|reviews| reviews.iter_mut().find(|r| r.id == review_id))
            .ok_or_else(|| ReviewError::NotFound(review_id.to_string()))?;

        review.flagged = true;
        self.flagged.insert(
            review_id.to_string(),
            FlaggedReview {
                review: review.clone(),
            },
        );
        info!("Review flagged for moderation");
        Ok(())
    }

    /// Unflags the source review (found through the queue copy's item id)
    /// and removes the copy.
    #[instrument(fields(review_id = %review_id), skip(self))]
    fn handle_dismiss_flag(&mut self, review_id: &str) -> Result<(), ReviewError> {
        debug!("Processing dismiss_flag request");

        let flagged = self
            .flagged
            .remove(review_id)
            .ok_or_else(|| ReviewError::NotFound(review_id.to_string()))?;

        if let Some(review) = self
            .reviews
            .get_mut(&flagged.review.item_id)
            .and_then(|reviews| reviews.iter_mut().find(|r| r.id == review_id))
        {
            review.flagged = false;
        }
        info!("Flag dismissed");
        Ok(())
    }

    /// Removes the source review and its queue copy together.
    #[instrument(fields(item_id = %item_id, review_id = %review_id), skip(self))]
    fn handle_delete_review(&mut self, item_id: &str, review_id: &str) -> Result<(), ReviewError> {
        debug!("Processing delete_review request");

        let reviews = self
            .reviews
            .get_mut(item_id)
            .ok_or_else(|| ReviewError::NotFound(review_id.to_string()))?;
        let before = reviews.len();
        reviews.retain(|r| r.id != review_id);
        if reviews.len() == before {
            return Err(ReviewError::NotFound(review_id.to_string()));
        }

        self.flagged.remove(review_id);
        info!("Review deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::system_clock;

    fn spawn() -> ReviewClient {
        let (service, client) = ReviewService::new(16, system_clock());
        tokio::spawn(service.run());
        client
    }

    async fn submit(client: &ReviewClient, rating: u8, comment: &str) -> Result<String, ReviewError> {
        client
            .submit_review(
                "item_1".to_string(),
                "user_1".to_string(),
                "Alice".to_string(),
                rating,
                comment.to_string(),
            )
            .await
    }

    #[tokio::test]
    async fn test_submit_validates_rating_and_comment() {
        let client = spawn();

        assert_eq!(
            submit(&client, 0, "bad").await.unwrap_err(),
            ReviewError::InvalidRating(0)
        );
        assert_eq!(
            submit(&client, 6, "bad").await.unwrap_err(),
            ReviewError::InvalidRating(6)
        );
        assert!(matches!(
            submit(&client, 3, "  ").await.unwrap_err(),
            ReviewError::ValidationError(_)
        ));
        assert!(submit(&client, 5, "Great produce").await.is_ok());
    }

    #[tokio::test]
    async fn test_flag_and_dismiss_keep_copies_consistent() {
        let client = spawn();
        let review_id = submit(&client, 2, "Bruised fruit").await.unwrap();

        client
            .flag_review("item_1".to_string(), review_id.clone())
            .await
            .unwrap();

        let queue = client.flagged_queue().await.unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].review.id, review_id);
        let reviews = client.list_reviews("item_1".to_string()).await.unwrap();
        assert!(reviews[0].flagged);

        client.dismiss_flag(review_id.clone()).await.unwrap();
        assert!(client.flagged_queue().await.unwrap().is_empty());
        let reviews = client.list_reviews("item_1".to_string()).await.unwrap();
        assert!(!reviews[0].flagged);
    }

    #[tokio::test]
    async fn test_delete_removes_both_copies() {
        let client = spawn();
        let review_id = submit(&client, 1, "Spam").await.unwrap();
        client
            .flag_review("item_1".to_string(), review_id.clone())
            .await
            .unwrap();

        client
            .delete_review("item_1".to_string(), review_id.clone())
            .await
            .unwrap();

        assert!(client.list_reviews("item_1".to_string()).await.unwrap().is_empty());
        assert!(client.flagged_queue().await.unwrap().is_empty());

        let err = client
            .delete_review("item_1".to_string(), review_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::NotFound(_)));
    }
}

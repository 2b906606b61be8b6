use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::client_method;
use crate::domain::{FlaggedReview, Review};
use crate::review_actor::{ReviewError, ReviewRequest};

/// Client for the review and moderation actor.
#[derive(Clone)]
pub struct ReviewClient {
    sender: mpsc::Sender<ReviewRequest>,
}

impl ReviewClient {
    pub fn new(sender: mpsc::Sender<ReviewRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), String> {
        debug!("Sending shutdown request");
        self.sender
            .send(ReviewRequest::Shutdown)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

client_method!(ReviewClient => fn submit_review(item_id: String, uid: String, author: String, rating: u8, comment: String) -> String as ReviewRequest::SubmitReview, Error = ReviewError);
client_method!(ReviewClient => fn edit_review(item_id: String, review_id: String, rating: u8, comment: String) -> Review as ReviewRequest::EditReview, Error = ReviewError);
client_method!(ReviewClient => fn list_reviews(item_id: String) -> Vec<Review> as ReviewRequest::ListReviews, Error = ReviewError);
client_method!(ReviewClient => fn flag_review(item_id: String, review_id: String) -> () as ReviewRequest::FlagReview, Error = ReviewError);
client_method!(ReviewClient => fn dismiss_flag(review_id: String) -> () as ReviewRequest::DismissFlag, Error = ReviewError);
client_method!(ReviewClient => fn delete_review(item_id: String, review_id: String) -> () as ReviewRequest::DeleteReview, Error = ReviewError);
client_method!(ReviewClient => fn flagged_queue() -> Vec<FlaggedReview> as ReviewRequest::FlaggedQueue, Error = ReviewError);

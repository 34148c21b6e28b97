use crate::{
    endpoints::handlers::configs::schema::GeneralContext,
    models::graphql::{Review, ReviewInput},
};

pub struct ReviewQuery {}

#[juniper::graphql_object(
    Context = GeneralContext,
)]
impl ReviewQuery {
    /// Reviews under one scholarship, public
    pub async fn get_scholarship_reviews(
        context: &GeneralContext,
        scholarship_id: String,
    ) -> Result<Vec<Review>, String> {
        context.review_repo().get_scholarship_reviews(scholarship_id)
    }

    pub async fn get_my_reviews(
        context: &GeneralContext,
        access_token: String,
    ) -> Result<Vec<Review>, String> {
        context.review_repo().get_my_reviews(access_token)
    }

    /// Every review in the system, moderator dashboard
    pub async fn get_all_reviews(
        context: &GeneralContext,
        access_token: String,
    ) -> Result<Vec<Review>, String> {
        context.review_repo().get_all_reviews(access_token)
    }
}

pub struct ReviewMutation {}

#[juniper::graphql_object(
    Context = GeneralContext,
)]
impl ReviewMutation {
    pub async fn create_review(
        context: &GeneralContext,
        access_token: String,
        review: ReviewInput,
    ) -> Result<String, String> {
        context.review_repo().create_review(access_token, review)
    }

    pub async fn update_review(
        context: &GeneralContext,
        access_token: String,
        id: String,
        rating_point: f64,
        review_comment: String,
    ) -> Result<String, String> {
        context
            .review_repo()
            .update_review(access_token, id, rating_point, review_comment)
    }

    pub async fn delete_review(
        context: &GeneralContext,
        access_token: String,
        id: String,
    ) -> Result<String, String> {
        context.review_repo().delete_review(access_token, id)
    }
}

use actix_web::web::Data;
use r2d2::Pool;
use redis::{Client, Commands, JsonCommands};

use crate::{
    models::{
        auth::UserRole,
        graphql::{Review, ReviewInput},
        redis::{Review as RedisReview, Scholarship as RedisScholarship},
    },
    repos::{
        auth::{get_profile, require_role},
        graphql::utils::{new_model_id, read_json_doc, scan_models},
    },
};

pub struct ReviewRepo {
    pub pool: Data<Pool<Client>>,
}

impl ReviewRepo {
    /// Public listing shown on the scholarship details page.
    pub fn get_scholarship_reviews(&self, scholarship_id: String) -> Result<Vec<Review>, String> {
        scan_models::<Review, RedisReview>(
            self.pool.clone(),
            &format!("reviews:{}:*", scholarship_id),
        )
    }

    pub fn get_my_reviews(&self, access_token: String) -> Result<Vec<Review>, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        let (_, profile) = get_profile(&mut con, &access_token)?;
        drop(con);

        let all = scan_models::<Review, RedisReview>(self.pool.clone(), "reviews:*")?;
        Ok(all
            .into_iter()
            .filter(|r| r.user_email == profile.email)
            .collect())
    }

    pub fn get_all_reviews(&self, access_token: String) -> Result<Vec<Review>, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        require_role(
            &mut con,
            &access_token,
            &[UserRole::Moderator, UserRole::Admin],
        )?;
        drop(con);

        scan_models::<Review, RedisReview>(self.pool.clone(), "reviews:*")
    }

    pub fn create_review(
        &self,
        access_token: String,
        input: ReviewInput,
    ) -> Result<String, String> {
        if input.rating_point < 1.0 || input.rating_point > 5.0 {
            return Err("Rating must be between 1 and 5".to_string());
        }

        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        let (_, profile) = get_profile(&mut con, &access_token)?;

        // snapshot the names off the scholarship being reviewed
        let scholarship_key = format!("scholarships:{}", input.scholarship_id);
        let scholarship = read_json_doc::<RedisScholarship>(&mut con, &scholarship_key)?
            .ok_or(format!("Scholarship {} does not exist", input.scholarship_id))?;

        let review_id = new_model_id(&[&profile.email, &input.scholarship_id]);
        let doc = RedisReview {
            scholarship_id: input.scholarship_id.clone(),
            scholarship_name: scholarship.scholarship_name,
            university_name: scholarship.university_name,
            user_name: profile.display_name,
            user_email: profile.email,
            user_image: profile.photo,
            rating_point: input.rating_point,
            review_comment: input.review_comment,
            review_date: chrono::Utc::now().to_rfc3339(),
        };

        let id = format!("{}:{}", input.scholarship_id, review_id);
        con.json_set::<_, _, _, ()>(format!("reviews:{}", id), "$", &doc)
            .map_err(|_| "Error saving review")?;

        Ok(id)
    }

    pub fn update_review(
        &self,
        access_token: String,
        id: String,
        rating_point: f64,
        review_comment: String,
    ) -> Result<String, String> {
        if rating_point < 1.0 || rating_point > 5.0 {
            return Err("Rating must be between 1 and 5".to_string());
        }

        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        let (_, profile) = get_profile(&mut con, &access_token)?;

        let key = format!("reviews:{}", id);
        let mut doc = read_json_doc::<RedisReview>(&mut con, &key)?
            .ok_or(format!("Review {} does not exist", id))?;

        if doc.user_email != profile.email {
            return Err("You can only edit your own reviews".to_string());
        }

        doc.rating_point = rating_point;
        doc.review_comment = review_comment;
        doc.review_date = chrono::Utc::now().to_rfc3339();

        con.json_set::<_, _, _, ()>(key, "$", &doc)
            .map_err(|_| "Error saving review")?;

        Ok(id)
    }

    /// Owners drop their own review, moderators can drop anyone's.
    pub fn delete_review(&self, access_token: String, id: String) -> Result<String, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        let (_, profile) = get_profile(&mut con, &access_token)?;

        let key = format!("reviews:{}", id);
        let doc = read_json_doc::<RedisReview>(&mut con, &key)?
            .ok_or(format!("Review {} does not exist", id))?;

        let role = UserRole::from_string(profile.role.clone());
        let is_owner = doc.user_email == profile.email;
        if !is_owner && role != UserRole::Moderator && role != UserRole::Admin {
            return Err("You can only delete your own reviews".to_string());
        }

        con.del::<_, ()>(&key).map_err(|_| "Error deleting review")?;

        Ok(id)
    }
}

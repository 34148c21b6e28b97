use serde::{Deserialize, Serialize};

use crate::{
    models::{
        graphql::{
            Application as GraphQLApplication, ApplicationStatus, PaymentStatus,
            Review as GraphQLReview, Scholarship as GraphQLScholarship,
            UserAccount as GraphQLUserAccount,
        },
        auth::UserRole,
        GraphQLMappable,
    },
    repos::graphql::utils::get_key,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scholarship {
    pub scholarship_name: String,
    pub university_name: String,
    pub university_image: String,
    pub university_country: String,
    pub university_city: String,
    pub university_world_rank: i32,
    pub subject_category: String,
    pub scholarship_category: String,
    pub degree: String,
    pub tuition_fees: Option<f64>,
    pub application_fees: f64,
    pub service_charge: f64,
    pub application_deadline: String,
    pub scholarship_post_date: String,
    pub scholarship_description: String,
    pub stipend_details: Option<String>,
}

impl GraphQLMappable<GraphQLScholarship> for Scholarship {
    fn to_graphql_type(&self, key: String) -> GraphQLScholarship {
        GraphQLScholarship {
            id: get_key(key, "scholarships".to_owned()),
            scholarship_name: self.scholarship_name.clone(),
            university_name: self.university_name.clone(),
            university_image: self.university_image.clone(),
            university_country: self.university_country.clone(),
            university_city: self.university_city.clone(),
            university_world_rank: self.university_world_rank,
            subject_category: self.subject_category.clone(),
            scholarship_category: self.scholarship_category.clone(),
            degree: self.degree.clone(),
            tuition_fees: self.tuition_fees,
            application_fees: self.application_fees,
            service_charge: self.service_charge,
            application_deadline: self.application_deadline.clone(),
            scholarship_post_date: self.scholarship_post_date.clone(),
            scholarship_description: self.scholarship_description.clone(),
            stipend_details: self.stipend_details.clone(),
        }
    }
}

// Written once by the checkout store, read and updated by the dashboard side.
// Statuses are kept as strings in redis, the enums only live on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub scholarship_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_image: String,
    pub university_name: String,
    pub university_country: String,
    pub university_city: String,
    pub scholarship_name: String,
    pub scholarship_category: String,
    pub subject_category: String,
    pub degree: String,
    pub application_fees: f64,
    pub service_charge: f64,
    pub application_status: String,
    pub payment_status: String,
    pub transaction_id: Option<String>,
    pub application_date: String,
    pub phone: String,
    pub address: String,
    pub ssc_result: String,
    pub hsc_result: String,
    pub study_gap: String,
    pub feedback: Option<String>,
}

impl GraphQLMappable<GraphQLApplication> for Application {
    fn to_graphql_type(&self, key: String) -> GraphQLApplication {
        GraphQLApplication {
            id: get_key(key, "applications".to_owned()),
            scholarship_id: self.scholarship_id.clone(),
            user_id: self.user_id.clone(),
            user_name: self.user_name.clone(),
            user_email: self.user_email.clone(),
            user_image: self.user_image.clone(),
            university_name: self.university_name.clone(),
            university_country: self.university_country.clone(),
            university_city: self.university_city.clone(),
            scholarship_name: self.scholarship_name.clone(),
            scholarship_category: self.scholarship_category.clone(),
            subject_category: self.subject_category.clone(),
            degree: self.degree.clone(),
            application_fees: self.application_fees,
            service_charge: self.service_charge,
            application_status: ApplicationStatus::from_string(self.application_status.clone()),
            payment_status: PaymentStatus::from_string(self.payment_status.clone()),
            transaction_id: self.transaction_id.clone(),
            application_date: self.application_date.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            ssc_result: self.ssc_result.clone(),
            hsc_result: self.hsc_result.clone(),
            study_gap: self.study_gap.clone(),
            feedback: self.feedback.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub scholarship_id: String,
    pub scholarship_name: String,
    pub university_name: String,
    pub user_name: String,
    pub user_email: String,
    pub user_image: String,
    pub rating_point: f64,
    pub review_comment: String,
    pub review_date: String,
}

impl GraphQLMappable<GraphQLReview> for Review {
    fn to_graphql_type(&self, key: String) -> GraphQLReview {
        GraphQLReview {
            id: get_key(key, "reviews".to_owned()),
            scholarship_id: self.scholarship_id.clone(),
            scholarship_name: self.scholarship_name.clone(),
            university_name: self.university_name.clone(),
            user_name: self.user_name.clone(),
            user_email: self.user_email.clone(),
            user_image: self.user_image.clone(),
            rating_point: self.rating_point,
            review_comment: self.review_comment.clone(),
            review_date: self.review_date.clone(),
        }
    }
}

/// Receipt written only after a confirmed charge, linked back to the
/// application it paid for. Never exists for an unpaid application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub email: String,
    pub transaction_id: String,
    pub amount: f64,
    pub application_id: String,
    pub scholarship_id: String,
    pub scholarship_name: String,
    pub university_name: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub email: String,
    pub photo: String,
    pub role: String,
    pub created_at: String,
}

impl GraphQLMappable<GraphQLUserAccount> for UserProfile {
    fn to_graphql_type(&self, key: String) -> GraphQLUserAccount {
        // profile keys look like users:{hash}:profile, the hash is the id
        let tail = get_key(key, "users".to_owned());
        GraphQLUserAccount {
            id: tail.trim_end_matches(":profile").to_string(),
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            photo: self.photo.clone(),
            role: UserRole::from_string(self.role.clone()),
            created_at: self.created_at.clone(),
        }
    }
}

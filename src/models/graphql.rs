use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use serde::{Deserialize, Serialize};

use crate::models::auth::UserRole;

// Dates travel as strings end to end, same as the post/deadline strings the
// dashboard sends. No parsing on this side beyond ordering comparisons.

#[derive(Clone, Serialize, Deserialize, GraphQLObject, Debug)]
pub struct Scholarship {
    pub id: String,
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

#[derive(Clone, GraphQLInputObject, Debug)]
pub struct ScholarshipInput {
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
    pub scholarship_description: String,
    pub stipend_details: Option<String>,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, GraphQLEnum, PartialEq)]
pub enum ScholarshipSort {
    DateDesc,
    DateAsc,
    FeesAsc,
    FeesDesc,
}

#[derive(Clone, Serialize, Deserialize, GraphQLObject, Debug)]
pub struct Application {
    pub id: String,
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
    pub application_status: ApplicationStatus,
    pub payment_status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub application_date: String,
    pub phone: String,
    pub address: String,
    pub ssc_result: String,
    pub hsc_result: String,
    pub study_gap: String,
    pub feedback: Option<String>,
}

/// The fields a student may still change while the application sits in
/// `pending`. Everything else is a snapshot taken at checkout time.
#[derive(Clone, GraphQLInputObject, Debug)]
pub struct ApplicationEdit {
    pub phone: String,
    pub address: String,
    pub ssc_result: String,
    pub hsc_result: String,
    pub study_gap: Option<String>,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, GraphQLEnum, PartialEq)]
pub enum ApplicationStatus {
    Pending,
    Processing,
    Completed,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Processing => "processing",
            ApplicationStatus::Completed => "completed",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn from_string(value: String) -> ApplicationStatus {
        match value.as_str() {
            "processing" => ApplicationStatus::Processing,
            "completed" => ApplicationStatus::Completed,
            "rejected" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Pending,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, GraphQLEnum, PartialEq)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
        }
    }

    pub fn from_string(value: String) -> PaymentStatus {
        match value.as_str() {
            "paid" => PaymentStatus::Paid,
            _ => PaymentStatus::Unpaid,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, GraphQLObject, Debug)]
pub struct Review {
    pub id: String,
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

#[derive(Clone, GraphQLInputObject, Debug)]
pub struct ReviewInput {
    pub scholarship_id: String,
    pub rating_point: f64,
    pub review_comment: String,
}

#[derive(Clone, Serialize, Deserialize, GraphQLObject, Debug)]
pub struct UserAccount {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub photo: String,
    pub role: UserRole,
    pub created_at: String,
}

#[derive(Clone, Serialize, Deserialize, GraphQLObject, Debug)]
pub struct NamedCount {
    pub name: String,
    pub count: i32,
}

#[derive(Clone, Serialize, Deserialize, GraphQLObject, Debug)]
pub struct StatusCounts {
    pub pending: i32,
    pub processing: i32,
    pub completed: i32,
    pub rejected: i32,
}

#[derive(Clone, Serialize, Deserialize, GraphQLObject, Debug)]
pub struct RoleCounts {
    pub student: i32,
    pub moderator: i32,
    pub admin: i32,
}

#[derive(Clone, Serialize, Deserialize, GraphQLObject, Debug)]
pub struct PaymentCounts {
    pub paid: i32,
    pub unpaid: i32,
}

#[derive(Clone, Serialize, Deserialize, GraphQLObject, Debug)]
pub struct Analytics {
    pub total_users: i32,
    pub total_scholarships: i32,
    pub total_applications: i32,
    pub total_fees_collected: f64,
    pub status_counts: StatusCounts,
    pub user_roles: RoleCounts,
    pub payment_status: PaymentCounts,
    pub applications_by_university: Vec<NamedCount>,
    pub applications_by_category: Vec<NamedCount>,
}

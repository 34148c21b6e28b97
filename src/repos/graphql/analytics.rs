use std::collections::HashMap;

use actix_web::web::Data;
use r2d2::Pool;
use redis::Client;

use crate::{
    models::{
        auth::UserRole,
        graphql::{Analytics, NamedCount, PaymentCounts, RoleCounts, StatusCounts},
        redis::{Application as RedisApplication, PaymentRecord, UserProfile},
    },
    repos::{
        auth::require_role,
        graphql::utils::{read_json_doc, scan_keys},
    },
};

const TOP_GROUPS_LIMIT: usize = 5;

pub struct AnalyticsRepo {
    pub pool: Data<Pool<Client>>,
}

impl AnalyticsRepo {
    /// One aggregate for the admin dashboard, computed by walking every
    /// document. Fine at this catalog's size.
    /// TODO: paginate the scans once the dataset outgrows a single pass
    pub fn get_analytics(&self, access_token: String) -> Result<Analytics, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        require_role(&mut con, &access_token, &[UserRole::Admin])?;

        let mut status_counts = StatusCounts {
            pending: 0,
            processing: 0,
            completed: 0,
            rejected: 0,
        };
        let mut payment_status = PaymentCounts { paid: 0, unpaid: 0 };
        let mut by_university: HashMap<String, i32> = HashMap::new();
        let mut by_category: HashMap<String, i32> = HashMap::new();

        let application_keys = scan_keys(&mut con, "applications:*")?;
        let mut total_applications = 0;
        for key in &application_keys {
            let Some(doc) = read_json_doc::<RedisApplication>(&mut con, key)? else {
                continue;
            };
            total_applications += 1;

            match doc.application_status.as_str() {
                "processing" => status_counts.processing += 1,
                "completed" => status_counts.completed += 1,
                "rejected" => status_counts.rejected += 1,
                _ => status_counts.pending += 1,
            }
            match doc.payment_status.as_str() {
                "paid" => payment_status.paid += 1,
                _ => payment_status.unpaid += 1,
            }
            *by_university.entry(doc.university_name).or_insert(0) += 1;
            *by_category.entry(doc.scholarship_category).or_insert(0) += 1;
        }

        let mut user_roles = RoleCounts {
            student: 0,
            moderator: 0,
            admin: 0,
        };
        let profile_keys = scan_keys(&mut con, "users:*:profile")?;
        let mut total_users = 0;
        for key in &profile_keys {
            let Some(profile) = read_json_doc::<UserProfile>(&mut con, key)? else {
                continue;
            };
            total_users += 1;
            match UserRole::from_string(profile.role) {
                UserRole::Admin => user_roles.admin += 1,
                UserRole::Moderator => user_roles.moderator += 1,
                UserRole::Student => user_roles.student += 1,
            }
        }

        let mut total_fees_collected = 0.0;
        for key in &scan_keys(&mut con, "payments:*")? {
            if let Some(record) = read_json_doc::<PaymentRecord>(&mut con, key)? {
                total_fees_collected += record.amount;
            }
        }

        let total_scholarships = scan_keys(&mut con, "scholarships:*")?.len() as i32;

        Ok(Analytics {
            total_users,
            total_scholarships,
            total_applications,
            total_fees_collected,
            status_counts,
            user_roles,
            payment_status,
            applications_by_university: Self::top_counts(by_university),
            applications_by_category: Self::top_counts(by_category),
        })
    }

    fn top_counts(groups: HashMap<String, i32>) -> Vec<NamedCount> {
        let mut counts: Vec<NamedCount> = groups
            .into_iter()
            .map(|(name, count)| NamedCount { name, count })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        counts.truncate(TOP_GROUPS_LIMIT);
        counts
    }
}

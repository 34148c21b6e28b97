use std::cmp::Ordering;

use actix_web::web::Data;
use r2d2::Pool;
use redis::{Client, Commands, JsonCommands};

use crate::{
    models::{
        auth::UserRole,
        graphql::{Scholarship, ScholarshipInput, ScholarshipSort},
        redis::Scholarship as RedisScholarship,
        GraphQLMappable,
    },
    repos::{
        auth::require_role,
        graphql::utils::{new_model_id, read_json_doc, scan_models},
    },
};

const TOP_SCHOLARSHIPS_LIMIT: usize = 6;

pub struct ScholarshipRepo {
    pub pool: Data<Pool<Client>>,
}

impl ScholarshipRepo {
    pub fn get_scholarship(&self, id: String) -> Result<Scholarship, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        let key = format!("scholarships:{}", id);

        match read_json_doc::<RedisScholarship>(&mut con, &key)? {
            Some(doc) => Ok(doc.to_graphql_type(key)),
            None => Err(format!("Scholarship {} does not exist", id)),
        }
    }

    /// Browse listing. Every filter is optional and they stack.
    pub fn get_all_scholarships(
        &self,
        search: Option<String>,
        category: Option<String>,
        country: Option<String>,
        degree: Option<String>,
        sort: Option<ScholarshipSort>,
    ) -> Result<Vec<Scholarship>, String> {
        let all = scan_models::<Scholarship, RedisScholarship>(self.pool.clone(), "scholarships:*")?;

        let needle = search.map(|s| s.to_lowercase());
        let mut filtered = Vec::new();
        for scholarship in all {
            if let Some(needle) = &needle {
                let haystack = format!(
                    "{} {} {}",
                    scholarship.scholarship_name, scholarship.university_name, scholarship.degree
                )
                .to_lowercase();
                if !haystack.contains(needle.as_str()) {
                    continue;
                }
            }
            if let Some(category) = &category {
                if &scholarship.scholarship_category != category {
                    continue;
                }
            }
            if let Some(country) = &country {
                if &scholarship.university_country != country {
                    continue;
                }
            }
            if let Some(degree) = &degree {
                if &scholarship.degree != degree {
                    continue;
                }
            }
            filtered.push(scholarship);
        }

        // post dates are rfc3339 strings, plain string order is date order
        match sort.unwrap_or(ScholarshipSort::DateDesc) {
            ScholarshipSort::DateDesc => {
                filtered.sort_by(|a, b| b.scholarship_post_date.cmp(&a.scholarship_post_date))
            }
            ScholarshipSort::DateAsc => {
                filtered.sort_by(|a, b| a.scholarship_post_date.cmp(&b.scholarship_post_date))
            }
            ScholarshipSort::FeesAsc => filtered.sort_by(|a, b| {
                a.application_fees
                    .partial_cmp(&b.application_fees)
                    .unwrap_or(Ordering::Equal)
            }),
            ScholarshipSort::FeesDesc => filtered.sort_by(|a, b| {
                b.application_fees
                    .partial_cmp(&a.application_fees)
                    .unwrap_or(Ordering::Equal)
            }),
        }

        Ok(filtered)
    }

    /// Home page picks: cheapest application fee first, newest post breaking ties.
    pub fn get_top_scholarships(&self) -> Result<Vec<Scholarship>, String> {
        let mut all =
            scan_models::<Scholarship, RedisScholarship>(self.pool.clone(), "scholarships:*")?;

        all.sort_by(|a, b| {
            a.application_fees
                .partial_cmp(&b.application_fees)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.scholarship_post_date.cmp(&a.scholarship_post_date))
        });
        all.truncate(TOP_SCHOLARSHIPS_LIMIT);

        Ok(all)
    }

    pub fn get_related_scholarships(
        &self,
        category: String,
        exclude_id: String,
    ) -> Result<Vec<Scholarship>, String> {
        let all = scan_models::<Scholarship, RedisScholarship>(self.pool.clone(), "scholarships:*")?;

        Ok(all
            .into_iter()
            .filter(|s| s.scholarship_category == category && s.id != exclude_id)
            .collect())
    }

    pub fn create_scholarship(
        &self,
        access_token: String,
        input: ScholarshipInput,
    ) -> Result<String, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        require_role(&mut con, &access_token, &[UserRole::Admin])?;

        let id = new_model_id(&[&input.scholarship_name, &input.university_name]);
        let doc = Self::doc_from_input(input, chrono::Utc::now().to_rfc3339());

        con.json_set::<_, _, _, ()>(format!("scholarships:{}", id), "$", &doc)
            .map_err(|_| "Error saving scholarship")?;

        Ok(id)
    }

    pub fn update_scholarship(
        &self,
        access_token: String,
        id: String,
        input: ScholarshipInput,
    ) -> Result<String, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        require_role(&mut con, &access_token, &[UserRole::Admin])?;

        let key = format!("scholarships:{}", id);
        let existing = read_json_doc::<RedisScholarship>(&mut con, &key)?
            .ok_or(format!("Scholarship {} does not exist", id))?;

        // the post date is set once at creation and survives edits
        let doc = Self::doc_from_input(input, existing.scholarship_post_date);

        con.json_set::<_, _, _, ()>(key, "$", &doc)
            .map_err(|_| "Error saving scholarship")?;

        Ok(id)
    }

    pub fn delete_scholarship(&self, access_token: String, id: String) -> Result<String, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        require_role(&mut con, &access_token, &[UserRole::Admin])?;

        let key = format!("scholarships:{}", id);
        let removed = con
            .del::<_, i64>(&key)
            .map_err(|_| "Error deleting scholarship")?;

        if removed == 0 {
            return Err(format!("Scholarship {} does not exist", id));
        }
        Ok(id)
    }

    fn doc_from_input(input: ScholarshipInput, post_date: String) -> RedisScholarship {
        RedisScholarship {
            scholarship_name: input.scholarship_name,
            university_name: input.university_name,
            university_image: input.university_image,
            university_country: input.university_country,
            university_city: input.university_city,
            university_world_rank: input.university_world_rank,
            subject_category: input.subject_category,
            scholarship_category: input.scholarship_category,
            degree: input.degree,
            tuition_fees: input.tuition_fees,
            application_fees: input.application_fees,
            service_charge: input.service_charge,
            application_deadline: input.application_deadline,
            scholarship_post_date: post_date,
            scholarship_description: input.scholarship_description,
            stipend_details: input.stipend_details,
        }
    }
}

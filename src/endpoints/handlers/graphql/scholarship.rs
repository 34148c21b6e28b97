use crate::{
    endpoints::handlers::configs::schema::GeneralContext,
    models::graphql::{Scholarship, ScholarshipInput, ScholarshipSort},
};

pub struct ScholarshipQuery {}

#[juniper::graphql_object(
    Context = GeneralContext,
)]
impl ScholarshipQuery {
    /// Single scholarship, the details page
    pub async fn get_scholarship(
        context: &GeneralContext,
        id: String,
    ) -> Result<Scholarship, String> {
        context.scholarship_repo().get_scholarship(id)
    }

    /// Browse listing with optional stacking filters
    pub async fn get_all_scholarships(
        context: &GeneralContext,
        search: Option<String>,
        category: Option<String>,
        country: Option<String>,
        degree: Option<String>,
        sort: Option<ScholarshipSort>,
    ) -> Result<Vec<Scholarship>, String> {
        context
            .scholarship_repo()
            .get_all_scholarships(search, category, country, degree, sort)
    }

    /// Cheapest-first home page picks
    pub async fn get_top_scholarships(
        context: &GeneralContext,
    ) -> Result<Vec<Scholarship>, String> {
        context.scholarship_repo().get_top_scholarships()
    }

    pub async fn get_related_scholarships(
        context: &GeneralContext,
        category: String,
        exclude_id: String,
    ) -> Result<Vec<Scholarship>, String> {
        context
            .scholarship_repo()
            .get_related_scholarships(category, exclude_id)
    }
}

pub struct ScholarshipMutation {}

#[juniper::graphql_object(
    Context = GeneralContext,
)]
impl ScholarshipMutation {
    pub async fn create_scholarship(
        context: &GeneralContext,
        access_token: String,
        scholarship: ScholarshipInput,
    ) -> Result<String, String> {
        context
            .scholarship_repo()
            .create_scholarship(access_token, scholarship)
    }

    pub async fn update_scholarship(
        context: &GeneralContext,
        access_token: String,
        id: String,
        scholarship: ScholarshipInput,
    ) -> Result<String, String> {
        context
            .scholarship_repo()
            .update_scholarship(access_token, id, scholarship)
    }

    pub async fn delete_scholarship(
        context: &GeneralContext,
        access_token: String,
        id: String,
    ) -> Result<String, String> {
        context
            .scholarship_repo()
            .delete_scholarship(access_token, id)
    }
}

use crate::{
    endpoints::handlers::configs::schema::GeneralContext, models::graphql::Analytics,
};

pub struct AnalyticsQuery {}

#[juniper::graphql_object(
    Context = GeneralContext,
)]
impl AnalyticsQuery {
    /// The whole admin dashboard aggregate in one call
    pub async fn get_analytics(
        context: &GeneralContext,
        access_token: String,
    ) -> Result<Analytics, String> {
        context.analytics_repo().get_analytics(access_token)
    }
}

use crate::{
    endpoints::handlers::configs::schema::GeneralContext,
    models::graphql::{Application, ApplicationEdit, ApplicationStatus},
};

pub struct ApplicationQuery {}

#[juniper::graphql_object(
    Context = GeneralContext,
)]
impl ApplicationQuery {
    /// Every application in the system, moderator dashboard
    pub async fn get_all_applications(
        context: &GeneralContext,
        access_token: String,
    ) -> Result<Vec<Application>, String> {
        context.application_repo().get_all_applications(access_token)
    }

    /// The caller's own applications
    pub async fn get_my_applications(
        context: &GeneralContext,
        access_token: String,
    ) -> Result<Vec<Application>, String> {
        context.application_repo().get_my_applications(access_token)
    }
}

pub struct ApplicationMutation {}

#[juniper::graphql_object(
    Context = GeneralContext,
)]
impl ApplicationMutation {
    pub async fn update_application_status(
        context: &GeneralContext,
        access_token: String,
        id: String,
        status: ApplicationStatus,
    ) -> Result<String, String> {
        context
            .application_repo()
            .update_status(access_token, id, status)
    }

    pub async fn add_application_feedback(
        context: &GeneralContext,
        access_token: String,
        id: String,
        feedback: String,
    ) -> Result<String, String> {
        context
            .application_repo()
            .add_feedback(access_token, id, feedback)
    }

    pub async fn edit_application(
        context: &GeneralContext,
        access_token: String,
        id: String,
        edit: ApplicationEdit,
    ) -> Result<Application, String> {
        context
            .application_repo()
            .edit_application(access_token, id, edit)
    }

    pub async fn cancel_application(
        context: &GeneralContext,
        access_token: String,
        id: String,
    ) -> Result<String, String> {
        context
            .application_repo()
            .cancel_application(access_token, id)
    }
}

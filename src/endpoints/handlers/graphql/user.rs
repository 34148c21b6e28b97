use crate::{
    endpoints::handlers::configs::schema::GeneralContext,
    models::{auth::UserRole, graphql::UserAccount},
};

pub struct UserQuery {}

#[juniper::graphql_object(
    Context = GeneralContext,
)]
impl UserQuery {
    /// Admin listing, optionally narrowed by role or a name/email search
    pub async fn get_all_users(
        context: &GeneralContext,
        access_token: String,
        role: Option<UserRole>,
        search: Option<String>,
    ) -> Result<Vec<UserAccount>, String> {
        context.user_repo().get_all_users(access_token, role, search)
    }
}

pub struct UserMutation {}

#[juniper::graphql_object(
    Context = GeneralContext,
)]
impl UserMutation {
    pub async fn set_user_role(
        context: &GeneralContext,
        access_token: String,
        id: String,
        role: UserRole,
    ) -> Result<String, String> {
        context.user_repo().set_user_role(access_token, id, role)
    }

    pub async fn delete_user(
        context: &GeneralContext,
        access_token: String,
        id: String,
    ) -> Result<String, String> {
        context.user_repo().delete_user(access_token, id)
    }
}

use serde::{Deserialize, Serialize};

pub mod auth;
pub mod graphql;
pub mod redis;

//My Own error message
#[derive(Clone, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

#[derive(Clone, Serialize)]
pub struct GeneralInfo {
    pub api_version: String,
}

/// Persisted models implement this so repos can hand them out as GraphQL
/// objects, with the id recovered from the redis key they were read from.
pub trait GraphQLMappable<T> {
    fn to_graphql_type(&self, key: String) -> T;
}

use juniper::GraphQLEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize, Debug)]
pub struct SignUpInfo {
    pub email: String,
    pub pass_code: String, //TODO: move to hashed passwords on the client side too
    pub display_name: String,
    pub photo: Option<String>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct LoginInfo {
    pub email: String,
    pub pass_code: String,
}

#[derive(Clone, Serialize)]
pub struct TokenInfo {
    pub display_name: String,
    pub access_token: String,
    pub role: String,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, GraphQLEnum, PartialEq)]
pub enum UserRole {
    Student,
    Moderator,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Student => "student",
            UserRole::Moderator => "moderator",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_string(value: String) -> UserRole {
        match value.as_str() {
            "admin" => UserRole::Admin,
            "moderator" => UserRole::Moderator,
            // anything unknown stays a plain student account
            _ => UserRole::Student,
        }
    }
}

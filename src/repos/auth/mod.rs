use redis::{cmd, Commands, JsonCommands};
use utils::hashing_composite_key;

use crate::{
    endpoints::handlers::configs::connection_pool::get_pool_connection,
    models::{
        auth::{TokenInfo, UserRole},
        redis::UserProfile,
        ErrorMessage,
    },
    repos::graphql::utils::read_json_doc,
};

pub mod utils;

pub fn create_user_with_access_token(
    email: String,
    pass: String,
    display_name: String,
    photo: Option<String>,
) -> Result<TokenInfo, ErrorMessage> {
    let mut con = get_pool_connection()
        .get()
        .expect("Couldn't connect to pool");

    // This will be the token that the user will use for every later call
    let access_token = hashing_composite_key(&[&email, &pass]);

    // The reference on the db
    let db_composite_key = hashing_composite_key(&[&access_token]);

    let taken = cmd("EXISTS")
        .arg(format!("users_on_used:{}", &email))
        .query::<bool>(&mut con)
        .unwrap_or(true);

    if taken {
        return Err(ErrorMessage {
            message: "Couldn't Create User".to_string(),
        });
    }

    // Want the reservation the closest to key level, it only marks existence
    let _: () = con
        .set(format!("users_on_used:{}", &email), "")
        .expect("USERNAME CREATION : Couldn't reserve email");

    let profile = UserProfile {
        display_name: display_name.clone(),
        email,
        photo: photo.unwrap_or_default(),
        // every new account starts as a plain student
        role: UserRole::Student.as_str().to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    con.json_set::<_, _, _, ()>(
        format!("users:{}:profile", &db_composite_key),
        "$",
        &profile,
    )
    .expect("PROFILE CREATION: Couldn't store profile");

    Ok(TokenInfo {
        display_name,
        access_token,
        role: UserRole::Student.as_str().to_string(),
    })
}

pub fn get_user_access_token(email: String, pass: String) -> Result<TokenInfo, ErrorMessage> {
    let mut con = get_pool_connection()
        .get()
        .expect("Couldn't connect to pool");

    // The token derived from the email and pass
    let access_token = hashing_composite_key(&[&email, &pass]);

    match get_profile(&mut con, &access_token) {
        Ok((_, profile)) => Ok(TokenInfo {
            display_name: profile.display_name,
            access_token,
            role: profile.role,
        }),
        Err(_) => Err(ErrorMessage {
            message: "User Might Not Exist or Email/Password is wrong".to_string(),
        }),
    }
}

/// Resolves an access token to the stored profile plus its db key.
pub fn get_profile(
    con: &mut redis::Connection,
    access_token: &str,
) -> Result<(String, UserProfile), String> {
    let db_composite_key = hashing_composite_key(&[&access_token.to_string()]);
    let key = format!("users:{}:profile", db_composite_key);

    match read_json_doc::<UserProfile>(con, &key)? {
        Some(profile) => Ok((db_composite_key, profile)),
        None => Err("User Might Not Exist or the session expired".to_string()),
    }
}

/// Gate for mutating operations. Reads the caller's role off their profile
/// and rejects the call when it is not one of the allowed ones.
pub fn require_role(
    con: &mut redis::Connection,
    access_token: &str,
    allowed: &[UserRole],
) -> Result<UserProfile, String> {
    let (_, profile) = get_profile(con, access_token)?;
    let role = UserRole::from_string(profile.role.clone());

    if allowed.contains(&role) {
        Ok(profile)
    } else {
        Err("You don't have the role needed for this operation".to_string())
    }
}

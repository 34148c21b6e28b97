use actix_web::web::Data;
use r2d2::Pool;
use redis::{Client, Commands, JsonCommands};

use crate::{
    models::{auth::UserRole, graphql::UserAccount, redis::UserProfile},
    repos::{
        auth::require_role,
        auth::utils::delete_keys_by_pattern,
        graphql::utils::{read_json_doc, scan_models},
    },
};

pub struct UserRepo {
    pub pool: Data<Pool<Client>>,
}

impl UserRepo {
    pub fn get_all_users(
        &self,
        access_token: String,
        role: Option<UserRole>,
        search: Option<String>,
    ) -> Result<Vec<UserAccount>, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        require_role(&mut con, &access_token, &[UserRole::Admin])?;
        drop(con);

        let all = scan_models::<UserAccount, UserProfile>(self.pool.clone(), "users:*:profile")?;

        let needle = search.map(|s| s.to_lowercase());
        let mut filtered = Vec::new();
        for user in all {
            if let Some(role) = role {
                if user.role != role {
                    continue;
                }
            }
            if let Some(needle) = &needle {
                let haystack = format!("{} {}", user.display_name, user.email).to_lowercase();
                if !haystack.contains(needle.as_str()) {
                    continue;
                }
            }
            filtered.push(user);
        }

        Ok(filtered)
    }

    pub fn set_user_role(
        &self,
        access_token: String,
        id: String,
        role: UserRole,
    ) -> Result<String, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        require_role(&mut con, &access_token, &[UserRole::Admin])?;

        let key = format!("users:{}:profile", id);
        let mut doc = read_json_doc::<UserProfile>(&mut con, &key)?
            .ok_or(format!("User {} does not exist", id))?;

        doc.role = role.as_str().to_string();
        con.json_set::<_, _, _, ()>(key, "$", &doc)
            .map_err(|_| "Error saving user profile")?;

        Ok(id)
    }

    /// Drops the profile, the email reservation and everything keyed under
    /// the account. Scholarship applications stay, the program still has them.
    pub fn delete_user(&self, access_token: String, id: String) -> Result<String, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        require_role(&mut con, &access_token, &[UserRole::Admin])?;

        let key = format!("users:{}:profile", id);
        let doc = read_json_doc::<UserProfile>(&mut con, &key)?
            .ok_or(format!("User {} does not exist", id))?;

        let _: () = con
            .del(format!("users_on_used:{}", doc.email))
            .map_err(|_| "Error releasing the email reservation")?;
        delete_keys_by_pattern(&mut con, format!("users:{}:*", id))
            .map_err(|_| "Error deleting user keys")?;

        Ok(id)
    }
}

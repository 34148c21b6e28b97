use actix_web::web::Data;
use r2d2::Pool;
use redis::{Client, Commands, JsonCommands};

use crate::{
    models::{
        auth::UserRole,
        graphql::{Application, ApplicationEdit, ApplicationStatus},
        redis::Application as RedisApplication,
        GraphQLMappable,
    },
    repos::{
        auth::{get_profile, require_role},
        auth::utils::hashing_composite_key,
        graphql::utils::{read_json_doc, scan_models},
    },
};

pub struct ApplicationRepo {
    pub pool: Data<Pool<Client>>,
}

impl ApplicationRepo {
    /// Moderator view over every application in the system.
    pub fn get_all_applications(&self, access_token: String) -> Result<Vec<Application>, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        require_role(
            &mut con,
            &access_token,
            &[UserRole::Moderator, UserRole::Admin],
        )?;
        drop(con);

        scan_models::<Application, RedisApplication>(self.pool.clone(), "applications:*")
    }

    /// A student's own applications, resolved from their token so nobody can
    /// list someone else's by guessing an email.
    pub fn get_my_applications(&self, access_token: String) -> Result<Vec<Application>, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        let (_, profile) = get_profile(&mut con, &access_token)?;
        drop(con);

        let user_hash = hashing_composite_key(&[&profile.email]);
        scan_models::<Application, RedisApplication>(
            self.pool.clone(),
            &format!("applications:{}:*", user_hash),
        )
    }

    pub fn update_status(
        &self,
        access_token: String,
        id: String,
        status: ApplicationStatus,
    ) -> Result<String, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        require_role(
            &mut con,
            &access_token,
            &[UserRole::Moderator, UserRole::Admin],
        )?;

        let key = format!("applications:{}", id);
        let mut doc = read_json_doc::<RedisApplication>(&mut con, &key)?
            .ok_or(format!("Application {} does not exist", id))?;

        doc.application_status = status.as_str().to_string();
        con.json_set::<_, _, _, ()>(key, "$", &doc)
            .map_err(|_| "Error saving application")?;

        Ok(id)
    }

    pub fn add_feedback(
        &self,
        access_token: String,
        id: String,
        feedback: String,
    ) -> Result<String, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        require_role(
            &mut con,
            &access_token,
            &[UserRole::Moderator, UserRole::Admin],
        )?;

        let key = format!("applications:{}", id);
        let mut doc = read_json_doc::<RedisApplication>(&mut con, &key)?
            .ok_or(format!("Application {} does not exist", id))?;

        doc.feedback = Some(feedback);
        con.json_set::<_, _, _, ()>(key, "$", &doc)
            .map_err(|_| "Error saving application")?;

        Ok(id)
    }

    /// Students may touch their contact/academic fields only while the
    /// application still sits in pending.
    pub fn edit_application(
        &self,
        access_token: String,
        id: String,
        edit: ApplicationEdit,
    ) -> Result<Application, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        let (_, profile) = get_profile(&mut con, &access_token)?;

        let key = format!("applications:{}", id);
        let mut doc = read_json_doc::<RedisApplication>(&mut con, &key)?
            .ok_or(format!("Application {} does not exist", id))?;

        if doc.user_email != profile.email {
            return Err("You can only edit your own applications".to_string());
        }
        if doc.application_status != ApplicationStatus::Pending.as_str() {
            return Err("Only pending applications can be edited".to_string());
        }

        doc.phone = edit.phone;
        doc.address = edit.address;
        doc.ssc_result = edit.ssc_result;
        doc.hsc_result = edit.hsc_result;
        doc.study_gap = edit.study_gap.unwrap_or_else(|| "No gap".to_string());

        con.json_set::<_, _, _, ()>(&key, "$", &doc)
            .map_err(|_| "Error saving application")?;

        Ok(doc.to_graphql_type(key))
    }

    pub fn cancel_application(&self, access_token: String, id: String) -> Result<String, String> {
        let mut con = self.pool.get().map_err(|_| "Couldn't connect to pool")?;
        let (_, profile) = get_profile(&mut con, &access_token)?;

        let key = format!("applications:{}", id);
        let doc = read_json_doc::<RedisApplication>(&mut con, &key)?
            .ok_or(format!("Application {} does not exist", id))?;

        if doc.user_email != profile.email {
            return Err("You can only cancel your own applications".to_string());
        }
        if doc.application_status != ApplicationStatus::Pending.as_str() {
            return Err("Only pending applications can be cancelled".to_string());
        }

        con.del::<_, ()>(&key)
            .map_err(|_| "Error deleting application")?;

        Ok(id)
    }
}

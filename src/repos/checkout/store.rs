use actix_web::web::Data;
use r2d2::Pool;
use redis::{Client, JsonCommands};

use crate::{
    models::redis::{Application, PaymentRecord},
    repos::{auth::utils::hashing_composite_key, graphql::utils::new_model_id},
};

/// Where finished checkout attempts land. The orchestrator only ever appends
/// through this, one application per attempt plus a receipt on success.
pub trait ApplicationStore {
    /// Persists one application attempt and returns the new record's id.
    fn insert_application(&self, record: &Application) -> Result<String, String>;

    /// Persists the receipt for a confirmed charge.
    fn insert_receipt(&self, receipt: &PaymentRecord) -> Result<(), String>;
}

pub struct RedisApplicationStore {
    pub pool: Data<Pool<Client>>,
}

impl ApplicationStore for RedisApplicationStore {
    fn insert_application(&self, record: &Application) -> Result<String, String> {
        let mut con = self
            .pool
            .get()
            .map_err(|_| "Couldn't connect to pool".to_string())?;

        // id embeds the applicant hash so per user listings stay one scan
        let user_hash = hashing_composite_key(&[&record.user_email]);
        let record_id = new_model_id(&[&record.user_email, &record.scholarship_id]);
        let id = format!("{}:{}", user_hash, record_id);

        con.json_set::<_, _, _, ()>(format!("applications:{}", id), "$", record)
            .map_err(|_| "Error saving application".to_string())?;

        Ok(id)
    }

    fn insert_receipt(&self, receipt: &PaymentRecord) -> Result<(), String> {
        let mut con = self
            .pool
            .get()
            .map_err(|_| "Couldn't connect to pool".to_string())?;

        let user_hash = hashing_composite_key(&[&receipt.email]);
        let key = format!("payments:{}:{}", user_hash, receipt.transaction_id);

        con.json_set::<_, _, _, ()>(key, "$", receipt)
            .map_err(|_| "Error saving payment record".to_string())?;

        Ok(())
    }
}

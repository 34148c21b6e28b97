use actix_web::web::Data;
use r2d2::Pool;
use redis::{from_redis_value, Client, Commands, Connection, JsonCommands, Value as RedisValue};
use serde::de::DeserializeOwned;
use serde_json::from_str;

use crate::models::GraphQLMappable;
use crate::repos::auth::utils::hashing_composite_key;

/// Takes the id tail out of a full redis key, e.g.
/// `applications:AB12:CD34` with model `applications` gives `AB12:CD34`.
pub fn get_key(key: String, model: String) -> String {
    let prefix = format!("{}:", model);
    match key.find(&prefix) {
        Some(idx) => key[idx + prefix.len()..].to_string(),
        None => key,
    }
}

/// Fresh identifier for a new document, derived from its seed fields plus the
/// creation instant so two identical submissions never collide.
pub fn new_model_id(parts: &[&String]) -> String {
    let now = chrono::Utc::now();
    let stamp = format!("{}{}", now.timestamp(), now.timestamp_subsec_nanos());

    let mut seed: Vec<&String> = parts.to_vec();
    seed.push(&stamp);

    hashing_composite_key(&seed)
}

pub fn scan_keys(con: &mut Connection, pattern: &str) -> Result<Vec<String>, String> {
    let iter = con
        .scan_match::<String, String>(pattern.to_string())
        .map_err(|_| format!("Error scanning keys for {}", pattern))?;
    Ok(iter.collect())
}

/// Reads one JSON document. The redis JSON module hands the value back as a
/// nested string holding a one element array, so unwrap that here once.
pub fn read_json_doc<T: DeserializeOwned>(
    con: &mut Connection,
    key: &str,
) -> Result<Option<T>, String> {
    let exists = con
        .exists::<&str, bool>(key)
        .map_err(|_| format!("Error checking key {}", key))?;
    if !exists {
        return Ok(None);
    }

    let raw = con
        .json_get::<&str, &str, RedisValue>(key, "$")
        .map_err(|_| format!("Error getting document for key {}", key))?;
    let nested = from_redis_value::<String>(&raw).map_err(|_| "Error parsing redis value")?;
    let docs = from_str::<Vec<T>>(&nested).map_err(|_| "Error deserializing document")?;

    let mut docs = docs;
    if docs.len() != 1 {
        // anything but a single document at the root path is corrupt, skip it
        return Ok(None);
    }
    Ok(Some(docs.remove(0)))
}

/// Scans every document behind a key pattern and maps it to its GraphQL shape.
pub fn scan_models<G, R>(pool: Data<Pool<Client>>, pattern: &str) -> Result<Vec<G>, String>
where
    R: DeserializeOwned + GraphQLMappable<G>,
{
    let mut con = pool.get().map_err(|_| "Couldn't connect to pool")?;
    let keys = scan_keys(&mut con, pattern)?;

    let mut models = Vec::new();
    for key in keys {
        if let Some(doc) = read_json_doc::<R>(&mut con, &key)? {
            models.push(doc.to_graphql_type(key.clone()));
        }
    }
    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::{get_key, new_model_id};

    #[test]
    fn get_key_strips_the_model_prefix() {
        assert_eq!(
            get_key("scholarships:F00D".to_string(), "scholarships".to_string()),
            "F00D"
        );
        assert_eq!(
            get_key("applications:AB:CD".to_string(), "applications".to_string()),
            "AB:CD"
        );
    }

    #[test]
    fn get_key_leaves_unprefixed_keys_alone() {
        assert_eq!(
            get_key("whatever".to_string(), "scholarships".to_string()),
            "whatever"
        );
    }

    #[test]
    fn new_model_id_does_not_collide_for_identical_seeds() {
        let seed = "same@mail.com".to_string();
        let first = new_model_id(&[&seed]);
        let second = new_model_id(&[&seed]);
        assert_ne!(first, second);
    }
}

use redis::{Commands, RedisResult};
use sha2::{Digest, Sha256};

/// function that giving n reference to arguments, returns the hashed key in string format
pub fn hashing_composite_key(args: &[&String]) -> String {
    let mut string_acc = String::new();

    for arg in args {
        string_acc = format!("{}{}", &string_acc, arg);
    }

    let hashed_args = Sha256::digest(string_acc);

    //X is for hexadecimal
    format!("{:X}", hashed_args)
}

/// Removes every key matching a pattern, used when an account is deleted
pub fn delete_keys_by_pattern(con: &mut redis::Connection, pattern: String) -> RedisResult<()> {
    if let Ok(keys_iter) = con.scan_match::<String, String>(pattern) {
        let keys: Vec<String> = keys_iter.collect();
        for key in keys {
            let _: RedisResult<()> = con.del(&key);
        }
    }
    Ok(())
}

pub mod dashmap_token_provider;
pub mod hashmap_role_store;
pub mod hashmap_user_store;
pub mod hashset_banned_token_store;
pub mod password_hashing;
pub mod postgres_role_store;
pub mod postgres_user_store;
pub mod redis_banned_token_store;
pub mod redis_token_provider;

pub use dashmap_token_provider::DashMapTokenProvider;
pub use hashmap_role_store::HashMapRoleStore;
pub use hashmap_user_store::HashMapUserStore;
pub use hashset_banned_token_store::HashSetBannedTokenStore;
pub use postgres_role_store::PostgresRoleStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_banned_token_store::RedisBannedTokenStore;
pub use redis_token_provider::RedisTokenProvider;

use rand::{Rng, distr::Alphanumeric};

use crate::config::TOKEN_LENGTH;

fn generate_raw_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

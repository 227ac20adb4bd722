pub mod hashmap_approval_code_store;
pub mod hashmap_registration_code_store;
pub mod hashmap_user_store;
pub mod hashset_group_store;
pub mod postgres_approval_code_store;
pub mod postgres_group_store;
pub mod postgres_registration_code_store;
pub mod postgres_user_store;
pub mod redis_approval_code_store;

pub use hashmap_approval_code_store::HashMapApprovalCodeStore;
pub use hashmap_registration_code_store::HashMapRegistrationCodeStore;
pub use hashmap_user_store::HashMapUserStore;
pub use hashset_group_store::HashSetGroupStore;
pub use postgres_approval_code_store::PostgresApprovalCodeStore;
pub use postgres_group_store::PostgresGroupStore;
pub use postgres_registration_code_store::PostgresRegistrationCodeStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_approval_code_store::RedisApprovalCodeStore;

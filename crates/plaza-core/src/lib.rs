//! plaza/crates/plaza-core/src/lib.rs
//!
//! The central domain types and interface definitions for Plaza.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use uuid::Uuid;

    #[test]
    fn test_post_creation_v7() {
        let id = Uuid::now_v7();
        let post = Post {
            id,
            title: "Youth housing grants".to_string(),
            content: "Does anyone know the deadline?".to_string(),
            user_name: "jiho".to_string(),
            user_job: "student".to_string(),
            file: None,
            created_at: chrono::Utc::now(),
        };
        assert_eq!(post.id, id);
        assert!(post.file.is_none());
    }

    #[test]
    fn test_user_hash_never_serializes() {
        let user = User {
            id: Uuid::now_v7(),
            name: "Jiho Park".to_string(),
            login_id: "jiho".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            job: "student".to_string(),
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("userPw").is_none());
        assert_eq!(json["userId"], "jiho");
    }

    #[test]
    fn test_post_serializes_camel_case() {
        let post = Post {
            id: Uuid::now_v7(),
            title: "t".to_string(),
            content: "c".to_string(),
            user_name: "n".to_string(),
            user_job: "j".to_string(),
            file: Some("abc.png".to_string()),
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userName"], "n");
        assert_eq!(json["userJob"], "j");
        assert!(json.get("createdAt").is_some());
    }
}

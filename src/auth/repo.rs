use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::db::Db;

/// Fields of a user about to be inserted.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub nationality: &'a str,
    pub phone: &'a str,
    pub password_hash: &'a str,
}

impl User {
    /// Find a user by email, ignoring ASCII case.
    pub async fn find_by_email(db: &Db, email: &str) -> Option<User> {
        db.read()
            .await
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Create a new user. Returns `None` when the email is already taken in
    /// any letter case; the check and the insert share one write lock. The
    /// email is stored exactly as given.
    pub async fn create(db: &Db, new: NewUser<'_>) -> Option<User> {
        let mut tables = db.write().await;
        if tables
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(new.email))
        {
            return None;
        }
        let user = User {
            id: tables.next_user_id(),
            first_name: new.first_name.to_string(),
            last_name: new.last_name.to_string(),
            email: new.email.to_string(),
            nationality: new.nationality.to_string(),
            phone: new.phone.to_string(),
            password_hash: new.password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        tables.users.insert(user.id, user.clone());
        Some(user)
    }
}

/// Server-side session table.
pub struct Session;

impl Session {
    pub async fn open(db: &Db, user_id: i64) -> Uuid {
        let sid = Uuid::new_v4();
        db.write().await.sessions.insert(sid, user_id);
        sid
    }

    /// Owner of a live session, if the session has not been revoked.
    pub async fn owner(db: &Db, sid: Uuid) -> Option<i64> {
        db.read().await.sessions.get(&sid).copied()
    }

    pub async fn revoke(db: &Db, sid: Uuid) -> bool {
        db.write().await.sessions.remove(&sid).is_some()
    }
}

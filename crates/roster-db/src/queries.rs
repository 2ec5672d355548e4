use crate::models::UserRow;
use crate::{Database, UserStore};
use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

use roster_types::models::UserRecord;

impl UserStore for Database {
    fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let row = self.with_conn(|conn| query_user_by_id(conn, user_id))?;
        row.map(decode_row).transpose()
    }

    fn find_all(&self) -> Result<Vec<UserRecord>> {
        let rows = self.with_conn(query_users)?;
        debug!("Loaded {} user rows", rows.len());
        rows.into_iter().map(decode_row).collect()
    }

    fn save(&self, record: &UserRecord) -> Result<UserRecord> {
        let row = UserRow::from(record);
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (user_id, password, is_verified) VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET
                    password = excluded.password,
                    is_verified = excluded.is_verified",
                (&row.user_id, &row.password, &row.is_verified),
            )?;
            Ok(())
        })?;
        Ok(record.clone())
    }
}

fn decode_row(row: UserRow) -> Result<UserRecord> {
    let user_id = row.user_id.clone();
    UserRecord::try_from(row).with_context(|| format!("Corrupt is_verified on user '{}'", user_id))
}

fn query_user_by_id(conn: &Connection, user_id: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT user_id, password, is_verified FROM users WHERE user_id = ?1")?;

    let row = stmt
        .query_row([user_id], |row| {
            Ok(UserRow {
                user_id: row.get(0)?,
                password: row.get(1)?,
                is_verified: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_users(conn: &Connection) -> Result<Vec<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT user_id, password, is_verified FROM users ORDER BY rowid")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(UserRow {
                user_id: row.get(0)?,
                password: row.get(1)?,
                is_verified: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_types::code::{CodecError, VerificationCode};

    fn user(id: &str, verified: VerificationCode) -> UserRecord {
        UserRecord {
            user_id: id.to_string(),
            password: "password1".to_string(),
            is_verified: verified,
        }
    }

    #[test]
    fn save_then_find() {
        let db = Database::open_in_memory().unwrap();
        db.save(&user("alice", VerificationCode::True)).unwrap();

        let found = db.find_by_id("alice").unwrap().unwrap();
        assert_eq!(found, user("alice", VerificationCode::True));
        assert!(db.find_by_id("bob").unwrap().is_none());
    }

    #[test]
    fn flag_is_stored_as_single_char_token() {
        let db = Database::open_in_memory().unwrap();
        db.save(&user("alice", VerificationCode::False)).unwrap();

        let token: String = db
            .with_conn(|conn| {
                Ok(conn.query_row(
                    "SELECT is_verified FROM users WHERE user_id = 'alice'",
                    [],
                    |r| r.get(0),
                )?)
            })
            .unwrap();
        assert_eq!(token, "F");
    }

    #[test]
    fn save_overwrites_existing_id() {
        let db = Database::open_in_memory().unwrap();
        db.save(&user("alice", VerificationCode::True)).unwrap();
        db.save(&user("alice", VerificationCode::False)).unwrap();

        let all = db.find_all().unwrap();
        assert_eq!(all, vec![user("alice", VerificationCode::False)]);
    }

    #[test]
    fn find_all_returns_insertion_order() {
        let db = Database::open_in_memory().unwrap();
        for id in ["carol", "alice", "bob"] {
            db.save(&user(id, VerificationCode::True)).unwrap();
        }
        let ids: Vec<_> = db.find_all().unwrap().into_iter().map(|u| u.user_id).collect();
        assert_eq!(ids, vec!["carol", "alice", "bob"]);
    }

    #[test]
    fn corrupt_token_surfaces_as_codec_error() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (user_id, password, is_verified) VALUES ('eve', 'password1', 'Z')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let err = db.find_by_id("eve").unwrap_err();
        let codec = err.downcast_ref::<CodecError>().unwrap();
        assert_eq!(
            codec,
            &CodecError::Unsupported {
                token: "Z".to_string()
            }
        );
        assert!(db.find_all().is_err());
    }
}

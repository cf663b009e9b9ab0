//! User registration.

use rusqlite::ErrorCode;

use crate::clock::Clock;
use crate::database::{map_busy, Database};
use crate::error::{Error, Result};
use crate::user::{NewUser, User};

/// Registers a user.
///
/// Emails are unique ignoring case: `Ada@Example.com` and `ada@example.com`
/// are the same address.
///
/// # Errors
///
/// Returns an error if:
/// - The email is already registered (a validation error on `email`)
/// - The write lock cannot be acquired within the busy timeout
/// - The insert fails
///
/// # Examples
///
/// ```no_run
/// use roombook::clock::SystemClock;
/// use roombook::database::{Database, DatabaseConfig};
/// use roombook::operations::register_user;
/// use roombook::NewUser;
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
/// let user = NewUser::new("Ada", "ada@example.com", "s3cret").unwrap();
/// let stored = register_user(&mut db, &user, &SystemClock).unwrap();
/// println!("registered user {}", stored.id);
/// ```
pub fn register_user<C: Clock>(db: &mut Database, user: &NewUser, clock: &C) -> Result<User> {
    let seconds = db.config().busy_timeout.as_secs();
    let tx = db.begin_immediate()?;

    if Database::find_user_by_email(&tx, user.email())?.is_some() {
        return Err(duplicate_email(user));
    }

    let stored = match Database::insert_user(&tx, user, clock.now()) {
        Err(Error::Database(err)) if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
            return Err(duplicate_email(user));
        }
        other => other?,
    };
    tx.commit().map_err(|e| map_busy(e, seconds))?;

    log::info!("registered user {} <{}>", stored.id, stored.email);
    Ok(stored)
}

/// Lists all users in registration order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_users(db: &Database) -> Result<Vec<User>> {
    Database::list_users(db.connection())
}

fn duplicate_email(user: &NewUser) -> Error {
    Error::validation(
        "email",
        format!("A user with email '{}' is already registered", user.email()),
    )
}

use crate::core::error::StoreError;
use crate::models::user::UserRecord;
use crate::utils::auth::verify_secret;
use crate::validation::fields::check_record_field;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Loaded view of the credential file, keyed by username
pub type UserMap = HashMap<String, UserRecord>;

impl UserRecord {
    fn to_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.username, self.password, self.language, self.singer
        )
    }

    fn from_line(line: &str, line_num: usize) -> Result<Self, StoreError> {
        let parts: Vec<&str> = line.split(',').collect();

        match parts.as_slice() {
            [username, password, language, singer] => Ok(UserRecord::new(
                *username, *password, *language, *singer,
            )),
            _ => Err(StoreError::Malformed {
                line: line_num,
                fields: parts.len(),
            }),
        }
    }
}

/// Append-only flat-file credential store
///
/// Every `load` re-reads the whole file; nothing is cached between calls.
pub struct CredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A missing file means no users yet.
    pub fn load(&self) -> Result<UserMap, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(UserMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let reader = BufReader::new(file);
        let mut users = UserMap::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|e| self.io_error(e))?;
            // only the terminator is stripped, so fields come back exactly as saved
            let record = UserRecord::from_line(line.trim_end_matches(['\r', '\n']), line_num + 1)?;
            // later lines win, matching a plain dict rebuild
            users.insert(record.username.clone(), record);
        }

        Ok(users)
    }

    /// Append one record. Duplicate usernames are the caller's problem.
    pub fn save(&self, record: &UserRecord) -> Result<(), StoreError> {
        Self::check_record(record)?;

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.append(record)
    }

    /// Load, reject a taken username, then append, all under the write lock
    pub fn register(&self, record: &UserRecord) -> Result<(), StoreError> {
        Self::check_record(record)?;

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let users = self.load()?;
        if users.contains_key(&record.username) {
            return Err(StoreError::DuplicateUsername(record.username.clone()));
        }

        self.append(record)
    }

    fn append(&self, record: &UserRecord) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        // a hand-edited file may lack the final newline
        let prefix = if ends_without_newline(&mut file).map_err(|e| self.io_error(e))? {
            "\n"
        } else {
            ""
        };

        writeln!(file, "{}{}", prefix, record.to_line()).map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))?;

        Ok(())
    }

    fn check_record(record: &UserRecord) -> Result<(), StoreError> {
        let fields = [
            ("username", record.username.as_str()),
            ("password", record.password.as_str()),
            ("language", record.language.as_str()),
            ("singer", record.singer.as_str()),
        ];

        for (name, value) in fields {
            check_record_field(name, value).map_err(|e| StoreError::InvalidField {
                field: name,
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn ends_without_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;

    Ok(last[0] != b'\n')
}

/// The stored record for `username`, if `password` matches it
pub fn find_authenticated<'a>(
    users: &'a UserMap,
    username: &str,
    password: &str,
) -> Option<&'a UserRecord> {
    users
        .get(username)
        .filter(|user| verify_secret(password, &user.password))
}

/// True iff `username` exists and its stored password equals `password`
pub fn authenticate(users: &UserMap, username: &str, password: &str) -> bool {
    find_authenticated(users, username, password).is_some()
}

//! Demo user accounts and reserved-area documents.
//!
//! These stand in for a real backend; the built-in table matches the demo
//! credentials shipped with the web catalog and can be replaced via the
//! `users_file` setting.

use std::path::Path;

/// One order in a user's history.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub id: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    pub total: f64,
    pub status: String,
}

/// A demo account with its reserved-area content.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub name: String,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Display metadata for a downloadable document.
#[derive(Clone, Debug)]
pub struct DocumentMeta {
    pub name: String,
    pub size: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
}

/// The account table active for this run.
#[derive(Clone, Debug)]
pub struct UserTable {
    users: Vec<UserRecord>,
}

/// Why a password change was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordError {
    UnknownUser,
    WrongPassword,
}

impl std::fmt::Display for PasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PasswordError::UnknownUser => "Utente non autenticato",
            PasswordError::WrongPassword => "Password attuale non corretta",
        })
    }
}

impl std::error::Error for PasswordError {}

#[derive(Debug, serde::Deserialize)]
struct UserFile {
    #[serde(default)]
    user: Vec<UserRecord>,
}

fn order(id: &str, date: &str, total: f64, status: &str) -> Order {
    Order {
        id: id.to_string(),
        date: date.to_string(),
        total,
        status: status.to_string(),
    }
}

impl UserTable {
    /// The built-in demo accounts.
    #[must_use]
    pub fn builtin() -> Self {
        let user = |username: &str,
                    password: &str,
                    name: &str,
                    company: &str,
                    role: &str,
                    documents: &[&str],
                    orders: Vec<Order>| UserRecord {
            username: username.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            company: company.to_string(),
            role: role.to_string(),
            documents: documents.iter().map(|d| (*d).to_string()).collect(),
            orders,
        };
        UserTable {
            users: vec![
                user(
                    "cliente",
                    "maestri2024",
                    "Cliente Demo",
                    "Azienda Demo Srl",
                    "cliente",
                    &["listino_2024.pdf", "catalogo_completo.pdf"],
                    vec![
                        order("ORD-001", "2024-01-15", 1250.00, "completato"),
                        order("ORD-002", "2024-02-20", 3400.00, "in corso"),
                    ],
                ),
                user(
                    "rivenditore",
                    "rivendita2024",
                    "Rivenditore Demo",
                    "Rivendita Spa",
                    "rivenditore",
                    &[
                        "listino_2024.pdf",
                        "listino_rivenditori.pdf",
                        "catalogo_completo.pdf",
                        "presentazione_prodotti.pdf",
                    ],
                    vec![
                        order("ORD-R001", "2024-01-10", 8500.00, "completato"),
                        order("ORD-R002", "2024-02-05", 12300.00, "completato"),
                        order("ORD-R003", "2024-03-01", 5600.00, "in corso"),
                    ],
                ),
                user(
                    "admin",
                    "admin2024",
                    "Amministratore",
                    "Maestri Srl",
                    "admin",
                    &[
                        "listino_2024.pdf",
                        "listino_rivenditori.pdf",
                        "catalogo_completo.pdf",
                        "presentazione_prodotti.pdf",
                        "manuali_tecnici.pdf",
                    ],
                    Vec::new(),
                ),
            ],
        }
    }

    /// Load a replacement table from TOML (`[[user]]` entries); the built-in
    /// table is kept on any error.
    #[must_use]
    pub fn from_file(path: &Path) -> Self {
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| toml::from_str::<UserFile>(&raw).map_err(|e| e.to_string()));
        match parsed {
            Ok(file) if !file.user.is_empty() => UserTable { users: file.user },
            Ok(_) => {
                tracing::warn!(path = %path.display(), "empty user file; using built-in accounts");
                Self::builtin()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid user file; using built-in accounts");
                Self::builtin()
            }
        }
    }

    #[must_use]
    pub fn find(&self, username: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Credential check; both fields must match exactly.
    #[must_use]
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&UserRecord> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
    }

    /// Replace a user's password after checking the current one.
    ///
    /// The change lives only as long as this table; nothing is written back
    /// to the account source.
    pub fn change_password(
        &mut self,
        username: &str,
        current: &str,
        new: &str,
    ) -> Result<(), PasswordError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or(PasswordError::UnknownUser)?;
        if user.password != current {
            return Err(PasswordError::WrongPassword);
        }
        user.password = new.to_string();
        Ok(())
    }
}

/// Metadata for a document id; unknown ids fall back to the id itself with
/// placeholder size and date.
#[must_use]
pub fn document_meta(id: &str) -> DocumentMeta {
    const DOCUMENTS: &[(&str, &str, &str, &str)] = &[
        ("listino_2024.pdf", "Listino Prezzi 2024", "2.4 MB", "2024-01-01"),
        (
            "listino_rivenditori.pdf",
            "Listino Rivenditori 2024",
            "1.8 MB",
            "2024-01-01",
        ),
        (
            "catalogo_completo.pdf",
            "Catalogo Completo Prodotti",
            "15.6 MB",
            "2024-02-15",
        ),
        (
            "presentazione_prodotti.pdf",
            "Presentazione Gamma Prodotti",
            "8.2 MB",
            "2024-01-20",
        ),
        ("manuali_tecnici.pdf", "Manuali Tecnici", "25.4 MB", "2023-12-10"),
    ];
    DOCUMENTS
        .iter()
        .find(|(doc_id, ..)| *doc_id == id)
        .map_or_else(
            || DocumentMeta {
                name: id.to_string(),
                size: "N/D".to_string(),
                date: "N/D".to_string(),
            },
            |(_, name, size, date)| DocumentMeta {
                name: (*name).to_string(),
                size: (*size).to_string(),
                date: (*date).to_string(),
            },
        )
}

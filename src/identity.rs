//! User identity and text token composition.
//!
//! The token drawn at every tile is `"{label} {user}{spaces}"`, derived once
//! per run. The trailing spaces separate neighbouring tokens on a row.

/// Strip a `DOMAIN\` prefix or an `@domain` suffix from an account name.
///
/// The last backslash wins, so `CORP\sub\alice` yields `alice`. The `@`
/// suffix is only considered when there is no backslash.
pub fn extract_username(full: &str) -> &str {
    if let Some(i) = full.rfind('\\') {
        return &full[i + 1..];
    }
    if let Some(i) = full.find('@') {
        return &full[..i];
    }
    full
}

/// Account name of the current user.
///
/// Asks the OS account database first and falls back to `USERNAME` (Windows)
/// or `USER` when the lookup fails.
pub fn current_username() -> Option<String> {
    let os_account = match whoami::fallible::username() {
        Ok(name) => Some(name),
        Err(e) => {
            tracing::debug!(error = %e, "OS account lookup failed, trying environment");
            None
        }
    };
    let env_accounts = ["USERNAME", "USER"]
        .iter()
        .filter_map(|var| std::env::var(var).ok());
    first_account(os_account.into_iter().chain(env_accounts))
}

fn first_account<I: IntoIterator<Item = String>>(candidates: I) -> Option<String> {
    candidates.into_iter().find(|name| !name.trim().is_empty())
}

/// The literal string drawn at each tile position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToken(String);

impl TextToken {
    /// Build `"{label} {short user}{space_count spaces}"`.
    pub fn compose(label: &str, account: &str, space_count: usize) -> Self {
        let user = extract_username(account);
        Self(format!("{} {}{}", label, user, " ".repeat(space_count)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for TextToken {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for TextToken {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl std::fmt::Display for TextToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

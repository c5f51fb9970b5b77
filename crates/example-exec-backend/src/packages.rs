//! Package install vetting
//!
//! Install requests are validated against a denylist of known-bad names
//! and an approval list of packages that need a human sign-off before
//! they reach the interpreter environment. Nothing here talks to a real
//! package index; the demo validates and reports.

const BLOCKED_PACKAGES: &[&str] = &["crypto-locker", "pythonapi", "python-api", "system", "snake"];

const APPROVAL_REQUIRED: &[&str] = &[
    "cryptography",
    "crypto",
    "requests",
    "urllib3",
    "socket",
    "subprocess",
];

/// Why an install request was refused
#[derive(Debug, PartialEq, Eq)]
pub enum Rejection {
    InvalidName,
    Blocked,
    NeedsApproval,
}

impl Rejection {
    pub fn detail(&self, package: &str) -> String {
        match self {
            Rejection::InvalidName => format!("Invalid package name: {package}"),
            Rejection::Blocked => format!("Package '{package}' is blocked"),
            Rejection::NeedsApproval => {
                format!("Package '{package}' requires approval before installation")
            }
        }
    }
}

fn valid_name(package: &str) -> bool {
    !package.is_empty()
        && package
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Vet a package name, case-insensitively.
pub fn vet(package: &str) -> Result<(), Rejection> {
    if !valid_name(package) {
        return Err(Rejection::InvalidName);
    }
    let lower = package.to_ascii_lowercase();
    if BLOCKED_PACKAGES.contains(&lower.as_str()) {
        return Err(Rejection::Blocked);
    }
    if APPROVAL_REQUIRED.contains(&lower.as_str()) {
        return Err(Rejection::NeedsApproval);
    }
    Ok(())
}

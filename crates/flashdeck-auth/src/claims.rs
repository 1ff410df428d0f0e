use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::Role;

/// Which of the two token families a token belongs to.
///
/// Stored in the `kind` claim so a token signed for one purpose is rejected
/// when presented for the other, even if both secrets happen to be equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: Uuid,
    pub role: Role,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

/// Fields the codec checks after the signature has been verified.
pub(crate) trait TimedClaims {
    fn kind(&self) -> TokenKind;
    fn exp(&self) -> i64;
}

impl TimedClaims for AccessClaims {
    fn kind(&self) -> TokenKind {
        self.kind
    }

    fn exp(&self) -> i64 {
        self.exp
    }
}

impl TimedClaims for RefreshClaims {
    fn kind(&self) -> TokenKind {
        self.kind
    }

    fn exp(&self) -> i64 {
        self.exp
    }
}

use serde::{Deserialize, Serialize};

/// JWT token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Athlete id
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}

/// The athlete a request was authenticated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AthleteSession {
    pub athlete_id: i64,
}

impl AthleteSession {
    pub fn from_claims(claims: &Claims) -> Result<Self, std::num::ParseIntError> {
        Ok(Self {
            athlete_id: claims.sub.parse()?,
        })
    }
}

use serde::{Deserialize, Serialize};

/// Identidad verificada del llamante.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub uid: String,
}

/// Contexto de la invocación. `auth` es `None` si el token no se pudo verificar.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub auth: Option<CallerIdentity>,
}

impl RequestContext {
    #[cfg(test)]
    pub fn authenticated(uid: impl Into<String>) -> Self {
        Self {
            auth: Some(CallerIdentity { uid: uid.into() }),
        }
    }

    pub fn anonymous() -> Self {
        Self { auth: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: u64,
}

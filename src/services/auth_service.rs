//! services/auth_service.rs
//! Verificación del token Bearer del llamante (JWT HS256).

use actix_web::{http::header, HttpRequest};
use anyhow::{anyhow, Context, Result};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::models::auth_model::{CallerIdentity, Claims, RequestContext};

#[derive(Clone)]
pub struct AuthService {
    decoding_key: Option<DecodingKey>,
}

impl AuthService {
    /// Sin secreto no hay forma de verificar tokens: todo llamante queda sin autenticar.
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            decoding_key: secret
                .filter(|s| !s.is_empty())
                .map(|s| DecodingKey::from_secret(s.as_bytes())),
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("AUTH_JWT_SECRET").ok();
        if secret.as_deref().map_or(true, str::is_empty) {
            log::warn!("AUTH_JWT_SECRET no definido; todas las llamadas serán rechazadas");
        }
        Self::new(secret.as_deref())
    }

    pub fn verify_token(&self, token: &str) -> Result<CallerIdentity> {
        let key = self
            .decoding_key
            .as_ref()
            .ok_or_else(|| anyhow!("No hay secreto configurado para verificar tokens"))?;

        let data = decode::<Claims>(token, key, &Validation::new(Algorithm::HS256))
            .context("Token inválido")?;

        if data.claims.sub.is_empty() {
            return Err(anyhow!("Token sin 'sub'"));
        }
        Ok(CallerIdentity {
            uid: data.claims.sub,
        })
    }

    /// Construye el contexto de la invocación a partir del header `Authorization`.
    /// Cualquier problema con el token deja `auth = None`.
    pub fn context_from_request(&self, req: &HttpRequest) -> RequestContext {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token);

        let Some(token) = token else {
            return RequestContext::anonymous();
        };

        match self.verify_token(token) {
            Ok(identity) => RequestContext {
                auth: Some(identity),
            },
            Err(e) => {
                log::warn!("(context_from_request) Token rechazado: {:#}", e);
                RequestContext::anonymous()
            }
        }
    }
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

#[cfg(test)]
pub fn issue_test_token(secret: &str, uid: &str, exp: u64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    encode(
        &Header::new(Algorithm::HS256),
        &Claims {
            sub: uid.to_string(),
            exp,
        },
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("no se pudo firmar el token de prueba")
}

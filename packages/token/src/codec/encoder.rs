//! Token encoding

use super::SEPARATOR;
use crate::base64url;
use crate::config::CodecConfig;
use crate::error::{TokenError, TokenResult};
use crate::types::{MAX_NESTING_DEPTH, Payload, TokenHeader, exceeds_nesting_depth};

pub(super) fn encode(config: &CodecConfig, payload: &Payload) -> TokenResult<String> {
    let algorithm = config.algorithm();
    let mac = config.mac_for(algorithm)?;
    if exceeds_nesting_depth(payload) {
        return Err(TokenError::serialization(&format!(
            "payload nests deeper than {MAX_NESTING_DEPTH} levels"
        )));
    }

    let header_json = serde_json::to_vec(&TokenHeader::new(algorithm))
        .map_err(|e| TokenError::serialization(&e.to_string()))?;
    let payload_json =
        serde_json::to_vec(payload).map_err(|e| TokenError::serialization(&e.to_string()))?;

    let mut token = base64url::encode(&header_json);
    token.push(SEPARATOR);
    token.push_str(&base64url::encode(&payload_json));

    let signature = mac(config.secret().expose(), token.as_bytes())?;
    token.push(SEPARATOR);
    token.push_str(&base64url::encode(&signature));

    tracing::debug!(
        alg = algorithm,
        payload_len = payload_json.len(),
        token_len = token.len(),
        "encoded token"
    );
    Ok(token)
}

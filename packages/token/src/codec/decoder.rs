//! Token decoding and verification
//!
//! Steps run in a fixed order and the first failure aborts: segment
//! count, base64url, JSON shape and nesting depth, `alg` presence, algorithm selection,
//! signature. The payload is only handed back after the signature check.

use super::SEPARATOR;
use crate::base64url;
use crate::config::{AlgorithmPolicy, CodecConfig};
use crate::error::{TokenError, TokenResult, describe_json_error};
use crate::signer::signatures_match;
use crate::types::{MAX_NESTING_DEPTH, Payload, Segment, exceeds_nesting_depth};
use signet_common::LoggingTransformer;

pub(super) fn decode(config: &CodecConfig, token: &str) -> TokenResult<Payload> {
    verify(config, token).map_err(|error| {
        if error.is_rejection() {
            LoggingTransformer::log_token_rejected(
                "decode",
                error.kind(),
                &LoggingTransformer::fingerprint(token.as_bytes()),
            );
        }
        error
    })
}

fn verify(config: &CodecConfig, token: &str) -> TokenResult<Payload> {
    let [header_b64, payload_b64, signature_b64] = split(token)?;

    let header_bytes = decode_segment(Segment::Header, header_b64)?;
    let payload_bytes = decode_segment(Segment::Payload, payload_b64)?;
    let signature = decode_segment(Segment::Signature, signature_b64)?;

    let header = parse_object(Segment::Header, &header_bytes)?;
    let payload = parse_object(Segment::Payload, &payload_bytes)?;

    let header_alg = match header.get("alg").and_then(serde_json::Value::as_str) {
        Some(alg) if !alg.is_empty() => alg,
        _ => return Err(TokenError::MissingAlgorithm),
    };

    let verifying_alg = match config.policy() {
        AlgorithmPolicy::Configured => config.algorithm(),
        AlgorithmPolicy::HeaderAllowList => {
            if !config.allows(header_alg) {
                return Err(TokenError::DisallowedAlgorithm(header_alg.to_string()));
            }
            header_alg
        }
    };
    let mac = config.mac_for(verifying_alg)?;

    // The signing input is the two segments as received, not re-encoded.
    let signing_input_len = header_b64.len() + 1 + payload_b64.len();
    let expected = mac(
        config.secret().expose(),
        &token.as_bytes()[..signing_input_len],
    )?;
    if !signatures_match(&expected, &signature) {
        return Err(TokenError::SignatureMismatch);
    }

    tracing::debug!(
        alg = verifying_alg,
        payload_len = payload_bytes.len(),
        "verified token"
    );
    Ok(payload)
}

fn split(token: &str) -> TokenResult<[&str; 3]> {
    let mut parts = token.split(SEPARATOR);
    let segments = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None) => [header, payload, signature],
        _ => {
            let count = token.split(SEPARATOR).count();
            return Err(TokenError::Format(format!(
                "expected 3 segments, found {count}"
            )));
        }
    };

    if let Some(position) = segments.iter().position(|segment| segment.is_empty()) {
        let segment = [Segment::Header, Segment::Payload, Segment::Signature][position];
        return Err(TokenError::Format(format!("{segment} segment is empty")));
    }
    Ok(segments)
}

fn decode_segment(segment: Segment, encoded: &str) -> TokenResult<Vec<u8>> {
    base64url::decode(encoded).map_err(|e| TokenError::decode(segment, &e.to_string()))
}

fn parse_object(segment: Segment, bytes: &[u8]) -> TokenResult<Payload> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| TokenError::decode(segment, "segment is not valid UTF-8"))?;
    match serde_json::from_str(text) {
        Ok(serde_json::Value::Object(object)) if exceeds_nesting_depth(&object) => {
            Err(TokenError::decode(
                segment,
                &format!("JSON nests deeper than {MAX_NESTING_DEPTH} levels"),
            ))
        }
        Ok(serde_json::Value::Object(object)) => Ok(object),
        Ok(serde_json::Value::Null) => Err(TokenError::decode(segment, "JSON value is null")),
        Ok(_) => Err(TokenError::decode(segment, "JSON value is not an object")),
        Err(e) => Err(TokenError::decode(segment, &describe_json_error(&e))),
    }
}

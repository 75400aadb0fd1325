//! HMAC signer and algorithm registry tests

use hex_literal::hex;
use signet_token::{Algorithm, AlgorithmRegistry, TokenError, signer};

const KEY: &[u8] = b"Jefe";
const DATA: &[u8] = b"what do ya want for nothing?";

// RFC 4231 test case 2
#[test]
fn test_rfc4231_vectors() {
    assert_eq!(
        signer::sign(Algorithm::Hs256, DATA, KEY).expect("sign"),
        hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
    );
    assert_eq!(
        signer::sign(Algorithm::Hs384, DATA, KEY).expect("sign"),
        hex!(
            "af45d2e376484031617f78d2b58a6b1b9c7ef464f5a01b47e42ec3736322445e"
            "8e2240ca5e69e2c78b3239ecfab21649"
        )
    );
    assert_eq!(
        signer::sign(Algorithm::Hs512, DATA, KEY).expect("sign"),
        hex!(
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554"
            "9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        )
    );
}

#[test]
fn test_signing_is_deterministic_and_sized() {
    for algorithm in Algorithm::ALL {
        let first = signer::sign(algorithm, DATA, KEY).expect("sign");
        let second = signer::sign(algorithm, DATA, KEY).expect("sign");
        assert_eq!(first, second);
        assert_eq!(first.len(), algorithm.digest_len());
    }
}

#[test]
fn test_signatures_match() {
    let signature = signer::sign(Algorithm::Hs256, DATA, KEY).expect("sign");
    let mut tampered = signature.clone();
    tampered[0] ^= 1;

    assert!(signer::signatures_match(&signature, &signature.clone()));
    assert!(!signer::signatures_match(&signature, &tampered));
    assert!(!signer::signatures_match(&signature, &signature[..31]));
    assert!(!signer::signatures_match(&signature, &[]));
}

#[test]
fn test_algorithm_identifiers() {
    assert_eq!("HS256".parse::<Algorithm>(), Ok(Algorithm::Hs256));
    assert_eq!("HS384".parse::<Algorithm>(), Ok(Algorithm::Hs384));
    assert_eq!("HS512".parse::<Algorithm>(), Ok(Algorithm::Hs512));
    assert_eq!(
        "hs256".parse::<Algorithm>(),
        Err(TokenError::UnsupportedAlgorithm("hs256".to_string()))
    );
    assert_eq!(Algorithm::default(), Algorithm::Hs256);
    assert_eq!(Algorithm::Hs512.to_string(), "HS512");
}

#[test]
fn test_registry_builtins() {
    let registry = AlgorithmRegistry::with_builtins();
    assert_eq!(registry.ids(), vec!["HS256", "HS384", "HS512"]);

    let mac = registry.resolve("HS384").expect("builtin");
    assert_eq!(
        mac(KEY, DATA).expect("mac"),
        signer::sign(Algorithm::Hs384, DATA, KEY).expect("sign")
    );

    assert!(matches!(
        registry.resolve("RS256"),
        Err(TokenError::UnsupportedAlgorithm(id)) if id == "RS256"
    ));
}

#[test]
fn test_registry_registration() {
    let mut registry = AlgorithmRegistry::with_builtins();

    registry
        .register("HS256-TRUNC16", |secret, data| {
            let mut digest = signer::sign(Algorithm::Hs256, data, secret)?;
            digest.truncate(16);
            Ok(digest)
        })
        .expect("register");
    assert!(registry.contains("HS256-TRUNC16"));
    let truncated = registry.resolve("HS256-TRUNC16").expect("resolve");
    assert_eq!(truncated(KEY, DATA).expect("mac").len(), 16);

    assert!(matches!(
        registry.register("HS256", |_, _| Ok(Vec::new())),
        Err(TokenError::Configuration(_))
    ));
    assert!(matches!(
        registry.register("", |_, _| Ok(Vec::new())),
        Err(TokenError::UnsupportedAlgorithm(_))
    ));

    // The shared registry is unaffected by local registrations
    assert!(!AlgorithmRegistry::shared_builtins().contains("HS256-TRUNC16"));
}

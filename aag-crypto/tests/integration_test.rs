use aag_crypto::errors::AagCryptoError;
use aag_crypto::group::create_heisenberg_group;
use aag_crypto::keypair::{KeyExchangeConfig, PartySizes};
use aag_crypto::protocol::{Verification, match_rate, run_key_exchange};

#[test]
fn happy_flow() -> Result<(), AagCryptoError> {
    let group = create_heisenberg_group(0)?;
    let config =
        KeyExchangeConfig::new(PartySizes::new(10, 2), PartySizes::new(10, 4)).with_seed(2024);

    let result = run_key_exchange(&group, config)?;

    assert!(result.matched);
    assert_eq!(result.verification, Verification::Verified);
    assert_eq!(result.alice_secret, result.bob_secret.invert());

    Ok(())
}

#[test]
fn modular_happy_flow() -> Result<(), AagCryptoError> {
    let group = create_heisenberg_group(65537)?;
    let config = KeyExchangeConfig::new(PartySizes::new(8, 3), PartySizes::new(5, 5))
        .with_modulus(65537)
        .with_seed(99);

    let secret = run_key_exchange(&group, config)?.into_verified()?;
    assert!(secret.rows().iter().flatten().all(|v| v.sign() != num_bigint::Sign::Minus));

    Ok(())
}

#[test]
fn boundary_sizes_succeed() -> Result<(), AagCryptoError> {
    let group = create_heisenberg_group(0)?;

    let whole_key =
        KeyExchangeConfig::new(PartySizes::new(6, 6), PartySizes::new(3, 3)).with_seed(5);
    assert!(run_key_exchange(&group, whole_key)?.matched);

    let trivial = KeyExchangeConfig::new(PartySizes::new(6, 1), PartySizes::new(1, 1)).with_seed(6);
    assert!(run_key_exchange(&group, trivial)?.matched);

    Ok(())
}

#[test]
fn oversized_private_key_rejected() -> Result<(), AagCryptoError> {
    let group = create_heisenberg_group(0)?;
    let config = KeyExchangeConfig::new(PartySizes::new(3, 4), PartySizes::new(10, 4)).with_seed(1);

    assert!(matches!(
        run_key_exchange(&group, config),
        Err(AagCryptoError::InvalidConfiguration(_))
    ));

    Ok(())
}

#[test]
fn thousand_unseeded_runs_all_match() -> Result<(), AagCryptoError> {
    let group = create_heisenberg_group(0)?;
    let config = KeyExchangeConfig::default();

    assert_eq!(match_rate(&group, &config, 1000)?, 1000);

    Ok(())
}

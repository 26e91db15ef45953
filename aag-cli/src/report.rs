use std::fmt::Write;

use aag_crypto::codec::encode_key;
use aag_crypto::errors::AagCryptoError;
use aag_crypto::protocol::{ExchangeResult, PartyTranscript, Verification};

use crate::analysis::{InClassReport, Side};

fn write_party(out: &mut String, name: &str, party: &PartyTranscript) -> std::fmt::Result {
    writeln!(out, "{name}")?;
    writeln!(out, "public_key:\n{}", party.public_key)?;
    writeln!(out, "---")?;
    writeln!(out, "private_key:\n{}", party.private_key.element())?;
    writeln!(out, "---")?;
    writeln!(out, "witness: {}", party.private_key.witness())?;
    writeln!(out, "---")?;
    writeln!(out, "received conjugated key:\n{}", party.received)?;
    writeln!(out, "---")?;
    writeln!(out, "shared secret:\n{}", party.secret)?;
    writeln!(out, "---")
}

fn write_exchange(out: &mut String, result: &ExchangeResult) -> std::fmt::Result {
    if let Some(transcript) = &result.transcript {
        write_party(out, "Alice", &transcript.alice)?;
        write_party(out, "Bob", &transcript.bob)?;
        writeln!(out, "inv shared secret (Bob):\n{}", result.bob_secret.invert())?;
        writeln!(out, "---")?;
    }
    match result.verification {
        Verification::Verified => writeln!(out, "matched: true"),
        Verification::Mismatch(kind) => writeln!(out, "matched: false ({kind})"),
    }
}

/// Human readable dump of a run; the full material only when a transcript was kept.
pub fn render_exchange(result: &ExchangeResult) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    write_exchange(&mut out, result).ok();
    out
}

/// JSON wire form of both conjugated keys, as they would travel between the parties.
pub fn render_wire(result: &ExchangeResult) -> Result<Option<String>, AagCryptoError> {
    let Some(transcript) = &result.transcript else {
        return Ok(None);
    };
    let to_alice = encode_key(&transcript.alice.received)?;
    let to_bob = encode_key(&transcript.bob.received)?;
    Ok(Some(format!("to_alice: {to_alice}\nto_bob: {to_bob}")))
}

fn write_in_class(out: &mut String, report: &InClassReport) -> std::fmt::Result {
    writeln!(out, "private element A = a2 * a3^-1:\n{}", report.private_element)?;
    for (i, conjugated) in report.conjugated.iter().enumerate() {
        writeln!(out, "b{}' = A^-1 * b{} * A:\n{}", i + 1, i + 1, conjugated)?;
    }
    for (depth, layer) in report.layers.iter().enumerate() {
        writeln!(out, "layer {}", depth + 1)?;
        for outcome in &layer.outcomes {
            let form = match outcome.side {
                Side::Inner => format!("{0}^-1 * x * {0}", outcome.label),
                Side::Outer => format!("{0} * x * {0}^-1", outcome.label),
            };
            let verdict = if outcome.accepted { "correct" } else { "fail" };
            writeln!(
                out,
                "  {form}: {verdict}, central length {}",
                outcome.central_length
            )?;
        }
    }
    writeln!(out, "restores Bob's key: {}", report.restores_bob_key)?;
    writeln!(out, "A_lba:\n{}", report.recovered_private)?;
    writeln!(out, "A_lba == A: {}", report.recovers_private())
}

pub fn render_in_class(report: &InClassReport) -> String {
    let mut out = String::new();
    write_in_class(&mut out, report).ok();
    out
}

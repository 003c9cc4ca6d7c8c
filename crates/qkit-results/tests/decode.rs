//! Integration tests for measurement decoding.
//!
//! Outcome tables are produced by a classical run of each circuit: only `x`
//! gates and measurements appear, so every shot yields the same outcome.

use proptest::prelude::*;
use qkit_ir::{Circuit, ClbitId, QubitId};
use qkit_results::{
    BitCounts, ClbitLayout, Counts, DecodeError, DecoderConfig, KeyMode, MeasurementDecoder,
    QubitDistribution, QubitKey, decode_by_qubit, decode_combined,
};
use rustc_hash::FxHashSet;

const SHOTS: u64 = 1024;

/// Run an `x`/`measure` circuit classically and report the outcome for
/// every shot, formatted the way a simulator reports it.
fn run(circuit: &Circuit) -> Counts {
    let mut flipped = FxHashSet::default();
    let mut ones = FxHashSet::default();
    for inst in circuit.instructions() {
        match inst.name() {
            "x" => {
                let q = inst.qubits[0];
                if !flipped.remove(&q) {
                    flipped.insert(q);
                }
            }
            "measure" => {
                if flipped.contains(&inst.qubits[0]) {
                    ones.insert(inst.clbits[0]);
                } else {
                    ones.remove(&inst.clbits[0]);
                }
            }
            _ => {}
        }
    }
    let outcome = ClbitLayout::new(circuit).encode(ones);
    Counts::from_pairs([(outcome, SHOTS)])
}

fn by_index(entries: &[(usize, u64, u64)]) -> QubitDistribution {
    entries
        .iter()
        .map(|&(q, zeros, ones)| (QubitKey::Index(q), BitCounts::new(zeros, ones)))
        .collect()
}

fn one_register() -> Circuit {
    let mut qc = Circuit::with_size("one_register", 3, 2);
    qc.x(QubitId(0)).unwrap();
    qc.measure(QubitId(0), ClbitId(0)).unwrap();
    qc.measure(QubitId(1), ClbitId(1)).unwrap();
    qc
}

fn measure_all() -> Circuit {
    let mut qc = Circuit::with_size("measure_all", 3, 2);
    qc.x(QubitId(1)).unwrap();
    qc.measure_all().unwrap();
    qc
}

/// Interleaved `qr1[2] cr1[2] qr2[2] cr2[2]`, x on `qr1[0]` and `qr2[0]`.
fn two_registers() -> Circuit {
    let mut qc = Circuit::new("two_registers");
    let qr1 = qc.add_qreg("qr1", 2);
    let cr1 = qc.add_creg("cr1", 2);
    let qr2 = qc.add_qreg("qr2", 2);
    let cr2 = qc.add_creg("cr2", 2);
    qc.x(qr1[0]).unwrap().x(qr2[0]).unwrap();
    for i in 0..2 {
        qc.measure(qr1[i], cr1[i]).unwrap();
        qc.measure(qr2[i], cr2[i]).unwrap();
    }
    qc
}

fn one_bit() -> Circuit {
    let mut qc = Circuit::with_size("one_bit", 1, 1);
    qc.x(QubitId(0)).unwrap();
    qc.measure(QubitId(0), ClbitId(0)).unwrap();
    qc
}

fn two_single_bit_registers() -> Circuit {
    let mut qc = Circuit::new("two_single_bit_registers");
    let qr1 = qc.add_qreg("qr1", 1);
    let cr1 = qc.add_creg("cr1", 1);
    let qr2 = qc.add_qreg("qr2", 1);
    let cr2 = qc.add_creg("cr2", 1);
    qc.x(qr1[0]).unwrap();
    qc.measure(qr1[0], cr1[0]).unwrap();
    qc.measure(qr2[0], cr2[0]).unwrap();
    qc
}

/// Registers of sizes 1, 2 and 3; every qubit except `qr1[0]` is measured
/// into the matching classical bit. `flips` lists the qubits that get `x`.
fn three_registers(flips: &[usize], then_measure_all: bool) -> Circuit {
    let mut qc = Circuit::new("three_registers");
    let mut qubits = Vec::new();
    let mut clbits = Vec::new();
    for (i, size) in [1, 2, 3].into_iter().enumerate() {
        qubits.extend(qc.add_qreg(format!("qr{}", i + 1), size));
        clbits.extend(qc.add_creg(format!("cr{}", i + 1), size));
    }
    for &q in flips {
        qc.x(qubits[q]).unwrap();
    }
    for i in 1..6 {
        qc.measure(qubits[i], clbits[i]).unwrap();
    }
    if then_measure_all {
        qc.measure_all().unwrap();
    }
    qc
}

// ============================================================================
// Per-qubit decoding
// ============================================================================

#[test]
fn test_by_qubit_one_register() {
    let qc = one_register();
    let decoded = decode_by_qubit(&run(&qc), &qc, KeyMode::Index).unwrap();
    assert_eq!(decoded, by_index(&[(0, 0, SHOTS), (1, SHOTS, 0)]));
}

#[test]
fn test_by_qubit_measure_all() {
    let qc = measure_all();
    let decoded = decode_by_qubit(&run(&qc), &qc, KeyMode::Index).unwrap();
    assert_eq!(
        decoded,
        by_index(&[(0, SHOTS, 0), (1, 0, SHOTS), (2, SHOTS, 0)])
    );
}

#[test]
fn test_by_qubit_two_registers() {
    let qc = two_registers();
    let decoded = decode_by_qubit(&run(&qc), &qc, KeyMode::Index).unwrap();
    assert_eq!(
        decoded,
        by_index(&[(0, 0, SHOTS), (1, SHOTS, 0), (2, 0, SHOTS), (3, SHOTS, 0)])
    );
}

#[test]
fn test_by_qubit_one_bit() {
    let qc = one_bit();
    let decoded = decode_by_qubit(&run(&qc), &qc, KeyMode::Index).unwrap();
    assert_eq!(decoded, by_index(&[(0, 0, SHOTS)]));
}

#[test]
fn test_by_qubit_two_single_bit_registers() {
    let qc = two_single_bit_registers();
    let decoded = decode_by_qubit(&run(&qc), &qc, KeyMode::Index).unwrap();
    assert_eq!(decoded, by_index(&[(0, 0, SHOTS), (1, SHOTS, 0)]));
}

#[test]
fn test_by_qubit_three_registers() {
    let qc = three_registers(&[2, 3, 5], false);
    let counts = run(&qc);
    assert_eq!(counts.get("101 10 0"), SHOTS);

    let decoded = decode_by_qubit(&counts, &qc, KeyMode::Index).unwrap();
    assert_eq!(
        decoded,
        by_index(&[
            (1, SHOTS, 0),
            (2, 0, SHOTS),
            (3, 0, SHOTS),
            (4, SHOTS, 0),
            (5, 0, SHOTS),
        ])
    );
}

#[test]
fn test_by_qubit_three_registers_then_measure_all() {
    let qc = three_registers(&[1, 3, 5], true);
    let decoded = decode_by_qubit(&run(&qc), &qc, KeyMode::Index).unwrap();
    assert_eq!(
        decoded,
        by_index(&[
            (0, SHOTS, 0),
            (1, 0, SHOTS),
            (2, SHOTS, 0),
            (3, 0, SHOTS),
            (4, SHOTS, 0),
            (5, 0, SHOTS),
        ])
    );
}

// ============================================================================
// Handle keys
// ============================================================================

fn by_handle(qc: &Circuit, entries: &[(usize, u64, u64)]) -> QubitDistribution {
    entries
        .iter()
        .map(|&(q, zeros, ones)| {
            (
                QubitKey::Handle(qc.qubits()[q].clone()),
                BitCounts::new(zeros, ones),
            )
        })
        .collect()
}

#[test]
fn test_by_handle_one_register() {
    let qc = one_register();
    let decoded = decode_by_qubit(&run(&qc), &qc, KeyMode::Handle).unwrap();
    assert_eq!(decoded, by_handle(&qc, &[(0, 0, SHOTS), (1, SHOTS, 0)]));
}

#[test]
fn test_by_handle_two_registers() {
    let qc = two_registers();
    let decoded = decode_by_qubit(&run(&qc), &qc, KeyMode::Handle).unwrap();
    assert_eq!(
        decoded,
        by_handle(
            &qc,
            &[(0, 0, SHOTS), (1, SHOTS, 0), (2, 0, SHOTS), (3, SHOTS, 0)]
        )
    );
    let keys: Vec<_> = decoded.keys().map(ToString::to_string).collect();
    assert_eq!(keys, ["qr1[0]", "qr1[1]", "qr2[0]", "qr2[1]"]);
}

#[test]
fn test_by_handle_two_single_bit_registers() {
    let qc = two_single_bit_registers();
    let decoded = decode_by_qubit(&run(&qc), &qc, KeyMode::Handle).unwrap();
    assert_eq!(decoded, by_handle(&qc, &[(0, 0, SHOTS), (1, SHOTS, 0)]));
}

#[test]
fn test_by_handle_three_registers() {
    let qc = three_registers(&[2, 3, 5], false);
    let decoded = decode_by_qubit(&run(&qc), &qc, KeyMode::Handle).unwrap();
    assert_eq!(
        decoded,
        by_handle(
            &qc,
            &[
                (1, SHOTS, 0),
                (2, 0, SHOTS),
                (3, 0, SHOTS),
                (4, SHOTS, 0),
                (5, 0, SHOTS),
            ]
        )
    );
}

#[test]
fn test_by_handle_three_registers_then_measure_all() {
    let qc = three_registers(&[1, 3, 5], true);
    let decoded = decode_by_qubit(&run(&qc), &qc, KeyMode::Handle).unwrap();
    assert_eq!(decoded.len(), 6);
    let q0 = QubitKey::Handle(qc.qubits()[0].clone());
    assert_eq!(decoded[&q0], BitCounts::new(SHOTS, 0));
    assert_eq!(q0.to_string(), "qr1[0]");
}

// ============================================================================
// Combined decoding
// ============================================================================

#[test]
fn test_combined_fixtures() {
    let cases = [
        (one_register(), "10-"),
        (measure_all(), "010"),
        (two_registers(), "1010"),
        (one_bit(), "1"),
        (two_single_bit_registers(), "10"),
        (three_registers(&[2, 3, 5], false), "-01101"),
        (three_registers(&[1, 3, 5], true), "010101"),
    ];
    for (qc, expected) in cases {
        let decoded = decode_combined(&run(&qc), &qc).unwrap();
        assert_eq!(
            decoded,
            Counts::from_pairs([(expected, SHOTS)]),
            "circuit {}",
            qc.name()
        );
    }
}

#[test]
fn test_combined_accumulates_outcomes_differing_in_unwired_bits() {
    let mut qc = Circuit::with_size("accumulate", 2, 2);
    qc.h(QubitId(1)).unwrap();
    qc.measure(QubitId(0), ClbitId(0)).unwrap();

    let counts = Counts::from_pairs([("00", 510), ("10", 514)]);
    let decoded = decode_combined(&counts, &qc).unwrap();
    assert_eq!(decoded, Counts::from_pairs([("0-", SHOTS)]));
}

#[test]
fn test_combined_mixed_outcomes() {
    let mut qc = Circuit::with_size("bell", 2, 2);
    qc.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
    qc.measure(QubitId(0), ClbitId(1)).unwrap();
    qc.measure(QubitId(1), ClbitId(0)).unwrap();

    let counts = Counts::from_pairs([("00", 500), ("11", 400), ("10", 124)]);
    let decoded = decode_combined(&counts, &qc).unwrap();
    // "10" sets c1, which holds q0
    assert_eq!(decoded.get("00"), 500);
    assert_eq!(decoded.get("11"), 400);
    assert_eq!(decoded.get("10"), 124);

    let per_qubit = decode_by_qubit(&counts, &qc, KeyMode::Index).unwrap();
    assert_eq!(per_qubit[&QubitKey::Index(0)], BitCounts::new(500, 524));
    assert_eq!(per_qubit[&QubitKey::Index(1)], BitCounts::new(624, 400));
}

// ============================================================================
// Wiring edge cases
// ============================================================================

#[test]
fn test_last_measurement_wins() {
    let mut qc = Circuit::with_size("remeasure", 1, 2);
    qc.measure(QubitId(0), ClbitId(0)).unwrap();
    qc.x(QubitId(0)).unwrap();
    qc.measure(QubitId(0), ClbitId(1)).unwrap();

    let counts = run(&qc);
    assert_eq!(counts.get("10"), SHOTS);
    let decoded = decode_by_qubit(&counts, &qc, KeyMode::Index).unwrap();
    assert_eq!(decoded, by_index(&[(0, 0, SHOTS)]));
}

#[test]
fn test_no_measurements() {
    let mut qc = Circuit::with_size("unmeasured", 2, 2);
    qc.x(QubitId(0)).unwrap();
    let counts = run(&qc);

    assert!(
        decode_by_qubit(&counts, &qc, KeyMode::Index)
            .unwrap()
            .is_empty()
    );
    let combined = decode_combined(&counts, &qc).unwrap();
    assert_eq!(combined, Counts::from_pairs([("--", SHOTS)]));
}

#[test]
fn test_circuit_without_qubits() {
    let qc = Circuit::with_size("empty", 0, 1);
    let counts = Counts::from_pairs([("0", 3), ("1", 5)]);
    let combined = decode_combined(&counts, &qc).unwrap();
    assert_eq!(combined, Counts::from_pairs([("", 8)]));
}

// ============================================================================
// Outcome formats
// ============================================================================

#[test]
fn test_hex_outcomes() {
    let mut qc = Circuit::with_size("hex", 3, 3);
    for i in 0..3 {
        qc.measure(QubitId(i), ClbitId(i)).unwrap();
    }
    let counts = Counts::from_pairs([("0x5", 10), ("0x0", 6)]);
    let decoded = decode_combined(&counts, &qc).unwrap();
    assert_eq!(decoded, Counts::from_pairs([("101", 10), ("000", 6)]));
}

#[test]
fn test_custom_separators_from_yaml() {
    let mut qc = Circuit::new("separators");
    let q = qc.add_qreg("q", 2);
    let a = qc.add_creg("a", 1);
    let b = qc.add_creg("b", 1);
    qc.measure(q[0], a[0]).unwrap();
    qc.measure(q[1], b[0]).unwrap();

    let config = DecoderConfig::from_yaml_str("placeholder: \"?\"\nseparators: [\":\"]\n")
        .unwrap();
    let decoder = MeasurementDecoder::with_config(&qc, config).unwrap();
    let decoded = decoder.combined(&Counts::from_pairs([("1:0", 7)])).unwrap();
    assert_eq!(decoded, Counts::from_pairs([("01", 7)]));

    // a space is no longer a separator
    let err = decoder
        .combined(&Counts::from_pairs([("1 0", 7)]))
        .unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidBit {
            outcome: "1 0".into(),
            found: ' ',
        }
    );
}

#[test]
fn test_with_config_rejects_bit_separator() {
    let mut qc = Circuit::with_size("bit_separator", 2, 2);
    qc.measure(QubitId(0), ClbitId(0)).unwrap();
    qc.measure(QubitId(1), ClbitId(1)).unwrap();

    let config = DecoderConfig {
        placeholder: '-',
        separators: vec![' ', '0'],
    };
    let err = MeasurementDecoder::with_config(&qc, config).unwrap_err();
    assert!(matches!(err, DecodeError::Config(_)));
}

#[test]
fn test_with_config_rejects_bit_placeholder() {
    let mut qc = Circuit::with_size("bit_placeholder", 2, 1);
    qc.measure(QubitId(0), ClbitId(0)).unwrap();

    let config = DecoderConfig::default().with_placeholder('1');
    assert!(matches!(
        MeasurementDecoder::with_config(&qc, config),
        Err(DecodeError::Config(_))
    ));

    // a valid placeholder keeps the unmeasured qubit distinguishable
    let config = DecoderConfig::default().with_placeholder('x');
    let decoded = MeasurementDecoder::with_config(&qc, config)
        .unwrap()
        .combined(&Counts::from_pairs([("1", 4)]))
        .unwrap();
    assert_eq!(decoded, Counts::from_pairs([("1x", 4)]));
}

#[test]
fn test_tallies_saturate() {
    let qc = one_register();
    let counts = Counts::from_pairs([("01", u64::MAX), ("11", 5)]);

    let decoded = decode_by_qubit(&counts, &qc, KeyMode::Index).unwrap();
    assert_eq!(decoded[&QubitKey::Index(0)], BitCounts::new(0, u64::MAX));
    assert_eq!(decoded[&QubitKey::Index(1)], BitCounts::new(u64::MAX, 5));
    assert_eq!(decoded[&QubitKey::Index(1)].total(), u64::MAX);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_outcome_too_short() {
    let mut qc = Circuit::with_size("short", 1, 3);
    qc.measure(QubitId(0), ClbitId(2)).unwrap();

    let err = decode_by_qubit(&Counts::from_pairs([("1", 4)]), &qc, KeyMode::Index).unwrap_err();
    assert_eq!(
        err,
        DecodeError::OutcomeTooShort {
            outcome: "1".into(),
            width: 1,
            position: 2,
        }
    );
    assert!(matches!(
        decode_combined(&Counts::from_pairs([("1", 4)]), &qc),
        Err(DecodeError::OutcomeTooShort { .. })
    ));
}

#[test]
fn test_invalid_characters() {
    let qc = one_register();
    let err = decode_combined(&Counts::from_pairs([("0a", 1)]), &qc).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidBit { found: 'a', .. }));
    assert!(err.to_string().contains("'0a'"));

    let err = decode_combined(&Counts::from_pairs([("0xzz", 1)]), &qc).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidHex { .. }));
}

// ============================================================================
// Property-based tests
// ============================================================================

/// A circuit of `n` qubits and `n` clbits with random measurements, plus an
/// outcome table of matching width.
fn circuit_and_counts() -> impl Strategy<Value = (Circuit, Counts)> {
    (1u32..6).prop_flat_map(|n| {
        let measurements = prop::collection::vec((0..n, 0..n), 0..8);
        let outcome = prop::collection::vec(any::<bool>(), n as usize)
            .prop_map(|bits| {
                bits.into_iter()
                    .map(|b| if b { '1' } else { '0' })
                    .collect::<String>()
            });
        let table = prop::collection::vec((outcome, 1u64..1000), 1..10);
        (Just(n), measurements, table).prop_map(|(n, measurements, table)| {
            let mut qc = Circuit::with_size("random", n, n);
            for (q, c) in measurements {
                qc.measure(QubitId(q), ClbitId(c)).unwrap();
            }
            (qc, Counts::from_pairs(table))
        })
    })
}

proptest! {
    #[test]
    fn prop_every_measured_qubit_sees_every_shot((qc, counts) in circuit_and_counts()) {
        let decoder = MeasurementDecoder::new(&qc);
        let decoded = decoder.by_qubit(&counts, KeyMode::Index).unwrap();

        prop_assert_eq!(decoded.len(), decoder.wiring().num_measured());
        for bits in decoded.values() {
            prop_assert_eq!(bits.total(), counts.total_shots());
        }
    }

    #[test]
    fn prop_combined_preserves_shots((qc, counts) in circuit_and_counts()) {
        let decoded = decode_combined(&counts, &qc).unwrap();

        prop_assert_eq!(decoded.total_shots(), counts.total_shots());
        prop_assert!(decoded.len() <= counts.len());
        for (key, _) in decoded.iter() {
            prop_assert_eq!(key.chars().count(), qc.num_qubits());
        }
    }

    #[test]
    fn prop_combined_agrees_with_by_qubit((qc, counts) in circuit_and_counts()) {
        let combined = decode_combined(&counts, &qc).unwrap();
        let per_qubit = decode_by_qubit(&counts, &qc, KeyMode::Index).unwrap();

        for (key, bits) in &per_qubit {
            let QubitKey::Index(q) = *key else {
                prop_assert!(false, "index mode produced a handle key");
                continue;
            };
            let ones: u64 = combined
                .iter()
                .filter(|(outcome, _)| outcome.as_bytes()[q] == b'1')
                .map(|(_, count)| count)
                .sum();
            prop_assert_eq!(bits.ones, ones);
        }
    }
}

use super::*;
use crate::records::{
    BimiRecord, DkimRecord, DmarcRecord, MxExchange, ParsedRecord, SpfRecord,
};
use crate::resolver::ResolveFailure;

fn ctx() -> DomainContext {
    DomainContext::new()
}

fn parsed_spf(text: &str) -> RecordOutcome {
    RecordOutcome::Parsed(ParsedRecord::Spf(SpfRecord::parse(text).unwrap()))
}

fn parsed_dmarc(text: &str) -> RecordOutcome {
    RecordOutcome::Parsed(ParsedRecord::Dmarc(DmarcRecord::parse(text).unwrap()))
}

fn ctx_with_dmarc(text: &str) -> DomainContext {
    let mut ctx = DomainContext::new();
    ctx.record(RecordKind::Dmarc, &parsed_dmarc(text));
    ctx
}

fn severities(findings: &[Finding]) -> Vec<Severity> {
    findings.iter().map(|f| f.severity).collect()
}

// --- generic handling ---

#[test]
fn resolver_failure_is_a_single_info_finding() {
    let outcome = RecordOutcome::Failed(ResolveFailure::Timeout);
    let findings = evaluate(RecordKind::Spf, None, &outcome, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Info]);
    assert!(findings[0].message.contains("could not verify"));
}

#[test]
fn malformed_record_is_a_single_critical_finding() {
    let outcome = RecordOutcome::Malformed {
        raw: "v=spf1 bogus".to_string(),
        reason: "unrecognized term `bogus`".to_string(),
    };
    let findings = evaluate(RecordKind::Spf, None, &outcome, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Critical]);
}

#[test]
fn ambiguous_record_is_a_single_critical_finding() {
    let outcome = RecordOutcome::Ambiguous {
        answers: vec!["v=spf1 -all".to_string(), "v=spf1 ~all".to_string()],
    };
    let findings = evaluate(RecordKind::Spf, None, &outcome, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Critical]);
    // The per-kind rules must not pile on top of a broken record
    assert_eq!(findings.len(), 1);
}

#[test]
fn selector_is_stamped_onto_findings() {
    let findings = evaluate(RecordKind::Dkim, Some("s1"), &RecordOutcome::Absent, &ctx());
    assert_eq!(findings[0].selector.as_deref(), Some("s1"));
}

// --- SPF ---

#[test]
fn spf_absent_warns() {
    let findings = evaluate(RecordKind::Spf, None, &RecordOutcome::Absent, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
}

#[test]
fn spf_eleven_includes_is_exactly_one_critical() {
    let includes: Vec<String> = (0..11).map(|i| format!("include:s{i}.example.net")).collect();
    let text = format!("v=spf1 {} -all", includes.join(" "));
    let findings = evaluate(RecordKind::Spf, None, &parsed_spf(&text), &ctx());
    let criticals: Vec<_> = findings
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .collect();
    assert_eq!(criticals.len(), 1);
    assert!(criticals[0].message.contains("PermError"));
}

#[test]
fn spf_ten_includes_is_fine() {
    let includes: Vec<String> = (0..10).map(|i| format!("include:s{i}.example.net")).collect();
    let text = format!("v=spf1 {} -all", includes.join(" "));
    let findings = evaluate(RecordKind::Spf, None, &parsed_spf(&text), &ctx());
    assert!(findings.is_empty(), "got {findings:?}");
}

#[test]
fn spf_plus_all_is_critical() {
    let findings = evaluate(RecordKind::Spf, None, &parsed_spf("v=spf1 +all"), &ctx());
    assert_eq!(severities(&findings), vec![Severity::Critical]);
}

#[test]
fn spf_question_all_warns() {
    let findings = evaluate(RecordKind::Spf, None, &parsed_spf("v=spf1 ?all"), &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
}

#[test]
fn spf_missing_all_warns_unless_redirect() {
    let findings = evaluate(
        RecordKind::Spf,
        None,
        &parsed_spf("v=spf1 ip4:192.0.2.0/24"),
        &ctx(),
    );
    assert_eq!(severities(&findings), vec![Severity::Warn]);

    let findings = evaluate(
        RecordKind::Spf,
        None,
        &parsed_spf("v=spf1 redirect=_spf.example.net"),
        &ctx(),
    );
    assert!(findings.is_empty(), "got {findings:?}");
}

#[test]
fn spf_overlong_record_warns() {
    let padding: Vec<String> = (0..30).map(|i| format!("ip4:198.51.{i}.0/24")).collect();
    let text = format!("v=spf1 {} -all", padding.join(" "));
    assert!(text.len() > 255);
    let findings = evaluate(RecordKind::Spf, None, &parsed_spf(&text), &ctx());
    assert!(findings
        .iter()
        .any(|f| f.severity == Severity::Warn && f.message.contains("255")));
}

// --- DMARC ---

#[test]
fn dmarc_policy_none_is_exactly_one_warn() {
    let findings = evaluate(
        RecordKind::Dmarc,
        None,
        &parsed_dmarc("v=DMARC1; p=none; rua=mailto:agg@example.com"),
        &ctx(),
    );
    assert_eq!(severities(&findings), vec![Severity::Warn]);
}

#[test]
fn dmarc_reject_is_clean() {
    let findings = evaluate(
        RecordKind::Dmarc,
        None,
        &parsed_dmarc("v=DMARC1; p=reject; rua=mailto:agg@example.com"),
        &ctx(),
    );
    assert!(findings.is_empty(), "got {findings:?}");
}

#[test]
fn dmarc_partial_enforcement_is_info() {
    let findings = evaluate(
        RecordKind::Dmarc,
        None,
        &parsed_dmarc("v=DMARC1; p=reject; pct=40; rua=mailto:agg@example.com"),
        &ctx(),
    );
    assert_eq!(severities(&findings), vec![Severity::Info]);
}

#[test]
fn dmarc_missing_rua_is_info() {
    let findings = evaluate(
        RecordKind::Dmarc,
        None,
        &parsed_dmarc("v=DMARC1; p=reject"),
        &ctx(),
    );
    assert_eq!(severities(&findings), vec![Severity::Info]);
    assert!(findings[0].message.contains("rua"));
}

// --- DKIM ---

#[test]
fn dkim_absent_selector_warns_with_selector_name() {
    let findings = evaluate(RecordKind::Dkim, Some("s1"), &RecordOutcome::Absent, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
    assert!(findings[0].message.contains("s1"));
}

#[test]
fn dkim_requested_without_selectors_warns() {
    let findings = evaluate(RecordKind::Dkim, None, &RecordOutcome::Absent, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
    assert!(findings[0].message.contains("no selectors"));
}

#[test]
fn dkim_short_rsa_key_is_critical() {
    // ~100 base64 chars is well under 1024 bits
    let record = DkimRecord::parse(&format!("v=DKIM1; p={}", "A".repeat(100))).unwrap();
    let outcome = RecordOutcome::Parsed(ParsedRecord::Dkim(record));
    let findings = evaluate(RecordKind::Dkim, Some("s1"), &outcome, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Critical]);
}

#[test]
fn dkim_1024_bit_key_warns() {
    // 220 base64 chars estimates to ~1032 bits: above the floor, below the
    // recommendation
    let record = DkimRecord::parse(&format!("v=DKIM1; p={}", "A".repeat(220))).unwrap();
    let outcome = RecordOutcome::Parsed(ParsedRecord::Dkim(record));
    let findings = evaluate(RecordKind::Dkim, Some("s1"), &outcome, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
}

#[test]
fn dkim_2048_bit_key_is_clean() {
    let record = DkimRecord::parse(&format!("v=DKIM1; p={}", "A".repeat(392))).unwrap();
    let outcome = RecordOutcome::Parsed(ParsedRecord::Dkim(record));
    let findings = evaluate(RecordKind::Dkim, Some("s1"), &outcome, &ctx());
    assert!(findings.is_empty(), "got {findings:?}");
}

#[test]
fn dkim_revoked_key_warns_and_skips_strength_check() {
    let record = DkimRecord::parse("v=DKIM1; p=").unwrap();
    let outcome = RecordOutcome::Parsed(ParsedRecord::Dkim(record));
    let findings = evaluate(RecordKind::Dkim, Some("s1"), &outcome, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
    assert!(findings[0].message.contains("revoked"));
}

#[test]
fn dkim_duplicate_answers_warn() {
    let mut record = DkimRecord::parse(&format!("v=DKIM1; p={}", "A".repeat(392))).unwrap();
    record.duplicates = 2;
    let outcome = RecordOutcome::Parsed(ParsedRecord::Dkim(record));
    let findings = evaluate(RecordKind::Dkim, Some("s1"), &outcome, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
}

// --- BIMI x DMARC matrix ---

fn parsed_bimi() -> RecordOutcome {
    RecordOutcome::Parsed(ParsedRecord::Bimi(
        BimiRecord::parse("v=BIMI1; l=https://example.com/logo.svg; a=https://example.com/vmc.pem")
            .unwrap(),
    ))
}

#[test]
fn bimi_with_enforced_dmarc_is_clean() {
    let ctx = ctx_with_dmarc("v=DMARC1; p=reject; rua=mailto:a@b.c");
    let findings = evaluate(RecordKind::Bimi, None, &parsed_bimi(), &ctx);
    assert!(findings.is_empty(), "got {findings:?}");
}

#[test]
fn bimi_with_monitoring_dmarc_warns() {
    let ctx = ctx_with_dmarc("v=DMARC1; p=none");
    let findings = evaluate(RecordKind::Bimi, None, &parsed_bimi(), &ctx);
    assert_eq!(severities(&findings), vec![Severity::Warn]);
}

#[test]
fn bimi_with_absent_dmarc_warns() {
    let mut ctx = DomainContext::new();
    ctx.record(RecordKind::Dmarc, &RecordOutcome::Absent);
    let findings = evaluate(RecordKind::Bimi, None, &parsed_bimi(), &ctx);
    assert_eq!(severities(&findings), vec![Severity::Warn]);
}

#[test]
fn bimi_with_failed_dmarc_lookup_is_info_skip() {
    let mut ctx = DomainContext::new();
    ctx.record(
        RecordKind::Dmarc,
        &RecordOutcome::Failed(ResolveFailure::ServFail),
    );
    let findings = evaluate(RecordKind::Bimi, None, &parsed_bimi(), &ctx);
    assert_eq!(severities(&findings), vec![Severity::Info]);
    assert!(findings[0].message.contains("skipped"));
}

#[test]
fn bimi_without_dmarc_evaluated_is_info_skip() {
    let findings = evaluate(RecordKind::Bimi, None, &parsed_bimi(), &ctx());
    assert_eq!(severities(&findings), vec![Severity::Info]);
}

#[test]
fn bimi_absent_is_info() {
    let findings = evaluate(RecordKind::Bimi, None, &RecordOutcome::Absent, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Info]);
}

#[test]
fn bimi_missing_logo_and_evidence_warn() {
    let record = BimiRecord::parse("v=BIMI1;").unwrap();
    let outcome = RecordOutcome::Parsed(ParsedRecord::Bimi(record));
    let ctx = ctx_with_dmarc("v=DMARC1; p=reject; rua=mailto:a@b.c");
    let findings = evaluate(RecordKind::Bimi, None, &outcome, &ctx);
    assert_eq!(severities(&findings), vec![Severity::Warn, Severity::Warn]);
}

// --- MX / addresses / NS ---

#[test]
fn mx_absent_warns() {
    let findings = evaluate(RecordKind::Mx, None, &RecordOutcome::Absent, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
}

#[test]
fn mx_uniform_priorities_warn() {
    let outcome = RecordOutcome::Parsed(ParsedRecord::Mx(vec![
        MxExchange {
            priority: 10,
            host: "mx1.example.com".to_string(),
        },
        MxExchange {
            priority: 10,
            host: "mx2.example.com".to_string(),
        },
    ]));
    let findings = evaluate(RecordKind::Mx, None, &outcome, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
}

#[test]
fn mx_tiered_priorities_are_clean() {
    let outcome = RecordOutcome::Parsed(ParsedRecord::Mx(vec![
        MxExchange {
            priority: 10,
            host: "mx1.example.com".to_string(),
        },
        MxExchange {
            priority: 20,
            host: "mx2.example.com".to_string(),
        },
    ]));
    let findings = evaluate(RecordKind::Mx, None, &outcome, &ctx());
    assert!(findings.is_empty());
}

#[test]
fn private_address_warns() {
    let outcome = RecordOutcome::Parsed(ParsedRecord::Addresses(vec![
        "192.0.2.10".parse().unwrap(),
        "10.0.0.5".parse().unwrap(),
    ]));
    let findings = evaluate(RecordKind::A, None, &outcome, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
    assert!(findings[0].message.contains("10.0.0.5"));
}

#[test]
fn unique_local_v6_warns() {
    let outcome = RecordOutcome::Parsed(ParsedRecord::Addresses(vec!["fd00::1".parse().unwrap()]));
    let findings = evaluate(RecordKind::Aaaa, None, &outcome, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
}

#[test]
fn single_nameserver_warns() {
    let outcome = RecordOutcome::Parsed(ParsedRecord::Hosts(vec!["ns1.example.com".to_string()]));
    let findings = evaluate(RecordKind::Ns, None, &outcome, &ctx());
    assert_eq!(severities(&findings), vec![Severity::Warn]);
}

#[test]
fn lame_delegation_is_info_only_when_probe_completed() {
    let outcome = RecordOutcome::Parsed(ParsedRecord::Hosts(vec![
        "ns1.example.com".to_string(),
        "ns2.example.com".to_string(),
    ]));

    let mut ctx = DomainContext::new();
    ctx.lame_ns_hosts = vec!["ns2.example.com".to_string()];
    ctx.ns_probe_complete = false;
    assert!(evaluate(RecordKind::Ns, None, &outcome, &ctx).is_empty());

    ctx.ns_probe_complete = true;
    let findings = evaluate(RecordKind::Ns, None, &outcome, &ctx);
    assert_eq!(severities(&findings), vec![Severity::Info]);
    assert!(findings[0].message.contains("ns2.example.com"));
}

// --- determinism ---

#[test]
fn identical_input_yields_identical_findings() {
    let outcome = parsed_spf("v=spf1 ?all");
    let a = evaluate(RecordKind::Spf, None, &outcome, &ctx());
    let b = evaluate(RecordKind::Spf, None, &outcome, &ctx());
    assert_eq!(a, b);
}

#[test]
fn severity_ordering() {
    assert!(Severity::Info < Severity::Warn);
    assert!(Severity::Warn < Severity::Critical);
    assert_eq!(Severity::Critical.to_string(), "CRITICAL");
}

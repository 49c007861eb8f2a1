//! End-to-end resolution scenarios: extraction, gating, conflict detection,
//! and registry-driven attribution working together.

use covgate_domain::{CoverageRef, DocCategory, DocumentSource, SlotKey, SlotStatus};
use covgate_gates::{AttributionDecision, AttributionGate};
use covgate_registry::CoverageRegistry;
use covgate_resolver::{apply_attribution, DocumentSet, EvidenceResolver, PagedTextDocument};

fn document_set(entries: &[(DocCategory, &str)]) -> DocumentSet {
    DocumentSet::new(
        entries
            .iter()
            .map(|(category, text)| {
                Box::new(PagedTextDocument::from_text(*category, text))
                    as Box<dyn DocumentSource>
            })
            .collect(),
    )
}

fn registry() -> CoverageRegistry {
    CoverageRegistry::from_json(
        r#"{
            "version": "test",
            "coverage_entries": {
                "CA001": {
                    "canonical_name": "암진단비(유사암제외)",
                    "diagnosis_type": "cancer",
                    "exclusion_keywords": ["유사암"]
                },
                "CB002": {
                    "canonical_name": "뇌출혈진단비",
                    "diagnosis_type": "cerebrovascular",
                    "exclusion_keywords": []
                },
                "CB003": {
                    "canonical_name": "뇌경색증진단비",
                    "diagnosis_type": "cerebrovascular",
                    "exclusion_keywords": []
                }
            }
        }"#,
    )
    .unwrap()
}

/// Resolve one slot and fold in the attribution decision, the way the batch
/// front end does.
fn resolve_with_attribution(
    resolver: &EvidenceResolver,
    registry: &CoverageRegistry,
    coverage: &CoverageRef,
    slot: SlotKey,
    docs: &DocumentSet,
) -> covgate_domain::SlotResult {
    let result = resolver.resolve_slot(coverage, slot, docs).unwrap();
    if result.evidences.is_empty() {
        return result;
    }
    let excerpts: Vec<String> = result
        .evidences
        .iter()
        .map(|evidence| evidence.excerpt.clone())
        .collect();
    let decision = AttributionGate::new(registry).check(&coverage.code, &excerpts);
    apply_attribution(result, &decision)
}

// Scenario A: a waiting-period clause sits right next to the target
// coverage's title; the slot resolves FOUND with the literal value.
#[test]
fn waiting_period_near_title_resolves_found() {
    let resolver = EvidenceResolver::standard();
    let coverage = CoverageRef::new("CB002", "뇌출혈진단비");
    let docs = document_set(&[(
        DocCategory::PolicyTerms,
        "제3관 보험금의 지급\n뇌출혈진단비 보장\n대기기간 90일이 적용됩니다\n기타 사항은 약관을 따릅니다",
    )]);

    let result = resolve_with_attribution(
        &resolver,
        &registry(),
        &coverage,
        SlotKey::WaitingPeriod,
        &docs,
    );

    assert_eq!(result.status, SlotStatus::Found);
    assert_eq!(result.value.as_deref(), Some("90일"));
    assert_eq!(result.evidences.len(), 1);
    assert_eq!(result.evidences[0].doc_type, DocCategory::PolicyTerms);
    assert!(result.evidences[0].excerpt.contains("뇌출혈진단비"));
}

// Scenario B: a reduction clause appears only in a row describing a
// different coverage and never names the target; attribution must reject
// the borrowed evidence and the slot ends UNKNOWN, not FOUND.
#[test]
fn neighbor_coverage_row_does_not_leak_into_target() {
    let resolver = EvidenceResolver::standard();
    let target = CoverageRef::new("CB002", "뇌출혈진단비");
    let docs = document_set(&[(
        DocCategory::ProductSummary,
        "뇌경색증진단비는 1년 미만 감액 50% 지급으로 운영됩니다",
    )]);

    let result =
        resolve_with_attribution(&resolver, &registry(), &target, SlotKey::Reduction, &docs);

    assert_eq!(result.status, SlotStatus::Unknown);
    assert!(result.evidences.is_empty());
    assert!(result.reason.is_some());
}

// Scenario C: policy terms and the business method document disagree on the
// waiting period; both evidences are retained under CONFLICT.
#[test]
fn disagreeing_documents_resolve_conflict() {
    let resolver = EvidenceResolver::standard();
    let coverage = CoverageRef::new("CB002", "뇌출혈진단비");
    let docs = document_set(&[
        (
            DocCategory::PolicyTerms,
            "뇌출혈진단비 보장 기준\n면책기간 30일이 적용됩니다",
        ),
        (
            DocCategory::BusinessMethod,
            "뇌출혈진단비 보장 기준\n면책기간 90일이 적용됩니다",
        ),
    ]);

    let result = resolve_with_attribution(
        &resolver,
        &registry(),
        &coverage,
        SlotKey::WaitingPeriod,
        &docs,
    );

    assert_eq!(result.status, SlotStatus::Conflict);
    assert_eq!(result.evidences.len(), 2);
    let categories: Vec<DocCategory> =
        result.evidences.iter().map(|e| e.doc_type).collect();
    assert!(categories.contains(&DocCategory::PolicyTerms));
    assert!(categories.contains(&DocCategory::BusinessMethod));
}

// Scenario D: the registry excludes the similar-cancer keyword for the
// carve-out cancer coverage; any excerpt mentioning it is rejected no
// matter how well the excerpt otherwise matches the canonical name.
#[test]
fn exclusion_keyword_dominates_inclusion() {
    let resolver = EvidenceResolver::standard();
    let coverage = CoverageRef::new("CA001", "암진단비(유사암제외)");
    let docs = document_set(&[(
        DocCategory::Proposal,
        "암진단비(유사암제외) 안내\n대기기간 90일이 적용됩니다\n유사암은 600만원을 지급합니다",
    )]);

    let resolved = resolver
        .resolve_slot(&coverage, SlotKey::WaitingPeriod, &docs)
        .unwrap();
    assert_eq!(resolved.status, SlotStatus::Found);

    let result = resolve_with_attribution(
        &resolver,
        &registry(),
        &coverage,
        SlotKey::WaitingPeriod,
        &docs,
    );
    assert_eq!(result.status, SlotStatus::Unknown);
    assert!(result.reason.unwrap().contains("유사암"));
}

// A coverage code absent from the registry skips attribution entirely.
#[test]
fn unregistered_coverage_skips_attribution() {
    let resolver = EvidenceResolver::standard();
    let coverage = CoverageRef::new("ZZ999", "질병수술비");
    let docs = document_set(&[(
        DocCategory::PolicyTerms,
        "질병수술비 보장 안내\n대기기간 90일이 적용됩니다",
    )]);

    let result = resolve_with_attribution(
        &resolver,
        &registry(),
        &coverage,
        SlotKey::WaitingPeriod,
        &docs,
    );

    assert_eq!(result.status, SlotStatus::Found);
    assert_eq!(result.value.as_deref(), Some("90일"));
}

// No documents at all: every requested slot reports UNKNOWN with the
// aggregate reason, and resolution of other coverages is unaffected.
#[test]
fn missing_documents_yield_unknown_per_slot() {
    let resolver = EvidenceResolver::standard();
    let coverage = CoverageRef::new("CB002", "뇌출혈진단비");
    let docs = document_set(&[]);

    let results = resolver
        .resolve(&coverage, &SlotKey::ALL, &docs)
        .unwrap();
    assert_eq!(results.len(), SlotKey::ALL.len());
    for (_, result) in &results {
        assert_eq!(result.status, SlotStatus::Unknown);
        assert_eq!(result.reason.as_deref(), Some("no documents available"));
    }
}

// Full-pipeline determinism: two complete runs over several coverages and
// all slots serialize identically.
#[test]
fn full_runs_are_byte_identical() {
    let resolver = EvidenceResolver::standard();
    let registry = registry();
    let coverages = [
        CoverageRef::new("CA001", "암진단비(유사암제외)"),
        CoverageRef::new("CB002", "뇌출혈진단비"),
    ];
    let docs = document_set(&[
        (
            DocCategory::Proposal,
            "1. 암진단비(유사암제외)   3,000만원\n2. 뇌출혈진단비   1,000만원",
        ),
        (
            DocCategory::PolicyTerms,
            "뇌출혈진단비 보장\n대기기간 90일이 적용됩니다\n감액 지급: 1년 미만 50%",
        ),
    ]);

    let run = |docs: &DocumentSet| -> String {
        let mut out = String::new();
        for coverage in &coverages {
            for slot in SlotKey::ALL {
                let result =
                    resolve_with_attribution(&resolver, &registry, coverage, slot, docs);
                out.push_str(&serde_json::to_string(&result).unwrap());
                out.push('\n');
            }
        }
        out
    };

    assert_eq!(run(&docs), run(&docs));
}

// The evidence cap holds even when a document is saturated with matches.
#[test]
fn evidence_cap_holds_under_saturation() {
    let resolver = EvidenceResolver::standard();
    let coverage = CoverageRef::new("CB002", "뇌출혈진단비");
    let page = "뇌출혈진단비 대기기간 90일이 적용됩니다\n\n\n".repeat(20);
    let docs = document_set(&[(DocCategory::PolicyTerms, &page)]);

    let result = resolver
        .resolve_slot(&coverage, SlotKey::WaitingPeriod, &docs)
        .unwrap();
    assert!(result.evidences.len() <= 3);
    assert_eq!(result.match_count, 20);
}

// Attribution decisions are pure values over the same inputs.
#[test]
fn attribution_is_deterministic() {
    let registry = registry();
    let gate = AttributionGate::new(&registry);
    let excerpts = vec!["유사암 진단 시 600만원".to_string()];
    let first = gate.check("CA001", &excerpts);
    let second = gate.check("CA001", &excerpts);
    assert_eq!(first, second);
    assert!(matches!(first, AttributionDecision::Rejected(_)));
}

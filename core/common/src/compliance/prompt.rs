//! 比較レポートを指示する固定プロンプト
//!
//! ドキュメントの中身に依存しない。毎回同じ文字列を送る。

/// SOP に対してポリシーの準拠状況を監査させる指示
pub const COMPLIANCE_PROMPT: &str = r#"You are a compliance auditor tasked with comparing a Policy document against a Standard Operating Procedure (SOP) document.

**Your Task:**
1. Analyze both documents thoroughly
2. Identify all key requirements, procedures, and guidelines in the SOP
3. Check if the Policy document adheres to each SOP requirement
4. Generate a comprehensive compliance report

**Report Structure:**

## Executive Summary
Provide a brief overview of compliance status (compliant, partially compliant, or non-compliant)

## Detailed Analysis

### 1. Adherence Assessment
For each major section/requirement in the SOP:
- **SOP Requirement:** [Describe the requirement]
- **Policy Implementation:** [How the policy addresses it]
- **Status:** ✅ Compliant / ⚠️ Partially Compliant / ❌ Non-Compliant
- **Gap Analysis:** [Describe any gaps or deviations]

### 2. Missing Elements
List any SOP requirements that are not addressed in the Policy

### 3. Conflicting Information
Identify any contradictions between the SOP and Policy

### 4. Additional Policy Elements
Note any elements in the Policy that go beyond SOP requirements

## Recommendations

### Priority 1 - Critical Issues
[Issues that must be addressed immediately]

### Priority 2 - Important Issues
[Issues that should be addressed soon]

### Priority 3 - Suggestions for Improvement
[Nice-to-have improvements]

## Compliance Score
Provide an overall compliance percentage and rating

Please be thorough, specific, and cite exact sections/pages when possible."#;

/// 固定プロンプトを返す
pub fn compliance_prompt() -> &'static str {
    COMPLIANCE_PROMPT
}

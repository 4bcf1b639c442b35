//! Static lookup tables shared by the analyzers.
//!
//! Lists are lowercase; callers lowercase their input before matching.

use std::sync::OnceLock;

use rustc_hash::FxHashSet;

/// Entities on the sanctions screening list. A hit is terminal.
pub const SANCTIONED_ENTITIES: &[&str] = &[
    "blackbridge trading",
    "golden crescent imports",
    "meridian shell holdings",
    "northstar procurement group",
    "vantage offshore services",
];

/// Politically exposed person surnames and aliases.
pub const PEP_NAMES: &[&str] = &[
    "abramov",
    "kuznetsova",
    "montclair",
    "obiang",
    "sokolov",
];

/// Jurisdictions flagged for elevated money-laundering exposure.
pub const HIGH_RISK_JURISDICTIONS: &[&str] = &[
    "north korea",
    "iran",
    "syria",
    "myanmar",
    "crimea",
    "offshore haven",
];

/// Negative-news terms counted toward adverse-media severity.
pub const NEGATIVE_NEWS_TERMS: &[&str] = &[
    "money laundering",
    "embezzlement",
    "bribery",
    "kickback",
    "ponzi",
    "shell company",
    "indicted",
    "under investigation",
];

/// Criminal-category legal keywords (severity 1.0).
pub const LEGAL_CRIMINAL_TERMS: &[&str] = &[
    "criminal charges",
    "felony",
    "indictment",
    "convicted",
    "guilty plea",
];

/// Fraud-category legal keywords (severity 0.95).
pub const LEGAL_FRAUD_TERMS: &[&str] = &[
    "fraud",
    "misrepresentation",
    "falsified",
    "deceptive practices",
    "securities violation",
];

/// Regulatory-category legal keywords (severity 0.7).
pub const LEGAL_REGULATORY_TERMS: &[&str] = &[
    "regulatory action",
    "consent decree",
    "cease and desist",
    "license revoked",
    "compliance violation",
    "sanctioned by",
];

/// Civil-category legal keywords (severity 0.5).
pub const LEGAL_CIVIL_TERMS: &[&str] = &[
    "lawsuit",
    "civil suit",
    "breach of contract",
    "settlement",
    "damages awarded",
];

/// Terms indicating a matter is still open.
pub const LEGAL_ONGOING_TERMS: &[&str] = &["ongoing", "pending", "active litigation"];

/// Terms indicating a matter has closed.
pub const LEGAL_RESOLVED_TERMS: &[&str] = &["resolved", "settled", "dismissed", "acquitted"];

/// Marketing phrases correlated with fraudulent onboarding attempts.
pub const RISKY_CONTENT_PHRASES: &[&str] = &[
    "guaranteed returns",
    "risk free",
    "no questions asked",
    "wire transfer only",
    "untraceable",
    "get rich",
    "double your money",
    "limited time offer",
    "act now",
];

/// Placeholder text that marks a non-serious submission.
pub const PLACEHOLDER_PATTERNS: &[&str] = &[
    "lorem ipsum",
    "test test",
    "asdf",
    "qwerty",
    "sample text",
    "placeholder",
];

/// Substrings in a vendor name that mark a test or demo submission.
pub const TEST_NAME_PATTERNS: &[&str] = &["123", "abc", "test", "demo", "sample"];

/// Bankruptcy and insolvency keywords; any hit is near-terminal for the
/// payment signal.
pub const BANKRUPTCY_TERMS: &[&str] = &[
    "bankruptcy",
    "chapter 11",
    "chapter 7",
    "insolvent",
    "liquidation",
    "receivership",
];

/// Softer financial-distress keywords, counted toward a density severity.
pub const FINANCIAL_DISTRESS_TERMS: &[&str] = &[
    "struggling",
    "losses",
    "declining",
    "downsizing",
    "layoffs",
    "cost cutting",
    "cash flow issues",
    "restructuring",
    "defaulted",
    "delinquent",
    "past due",
    "collections",
];

/// Phrases marking a business as newly formed.
pub const STARTUP_TERMS: &[&str] = &[
    "startup",
    "new company",
    "recently founded",
    "just launched",
];

/// Payment terms that shift all risk onto the counterparty.
pub const AGGRESSIVE_PAYMENT_TERMS: &[&str] = &[
    "payment upfront",
    "prepayment required",
    "100% advance",
    "no refunds",
    "cash only",
    "wire transfer only",
];

/// Conventional trade-credit terms; mildly reassuring.
pub const FLEXIBLE_PAYMENT_TERMS: &[&str] = &[
    "net 30",
    "net 60",
    "payment plans",
    "flexible terms",
    "credit terms",
];

/// Consumer mail providers; not evidence of fraud alone, but a business
/// registering under one loses the shared-domain clustering exemption.
pub const FREE_MAIL_PROVIDERS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "proton.me",
    "protonmail.com",
    "mail.com",
];

/// Top-level domains treated as trusted infrastructure.
pub const TRUSTED_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "co", "io", "us", "uk", "de", "fr", "ca", "au", "jp",
];

fn set(terms: &[&'static str]) -> FxHashSet<&'static str> {
    terms.iter().copied().collect()
}

/// Free-mail provider set, built once.
pub fn free_mail_providers() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| set(FREE_MAIL_PROVIDERS))
}

/// Trusted TLD set, built once.
pub fn trusted_tlds() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| set(TRUSTED_TLDS))
}

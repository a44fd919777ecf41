//! Topic adjacency table for follow-up suggestions

use std::collections::HashMap;

/// Suggested when the matched question has no entry of its own
pub const DEFAULT_FOLLOW_UPS: [&str; 3] = [
    "What is sexual wellness?",
    "How can I improve my sexual health?",
    "How can I practice safer sex?",
];

const TOPIC_LINKS: &[(&str, [&str; 3])] = &[
    (
        "What is sexual wellness?",
        [
            "How can I improve my sexual health?",
            "What is the relationship between mental health and sexual health?",
            "What are common sexual health concerns?",
        ],
    ),
    (
        "How can I improve my sexual health?",
        [
            "How can I practice safer sex?",
            "How can I improve communication with my partner about sex?",
            "What are common sexual health concerns?",
        ],
    ),
    (
        "What are common sexual health concerns?",
        [
            "How does aging affect sexual health?",
            "How can I maintain sexual wellness during pregnancy?",
            "What is the relationship between mental health and sexual health?",
        ],
    ),
    (
        "How can I practice safer sex?",
        [
            "What are common myths about sex?",
            "What is consent in sexual relationships?",
            "How can I improve my sexual health?",
        ],
    ),
    (
        "What is consent in sexual relationships?",
        [
            "How can I improve communication with my partner about sex?",
            "What are common myths about sex?",
            "How can I practice safer sex?",
        ],
    ),
    (
        "How can I improve communication with my partner about sex?",
        [
            "What is consent in sexual relationships?",
            "What are common myths about sex?",
            "How does aging affect sexual health?",
        ],
    ),
    (
        "What are common myths about sex?",
        [
            "How can I improve communication with my partner about sex?",
            "What is the relationship between mental health and sexual health?",
            "How does aging affect sexual health?",
        ],
    ),
    (
        "How does aging affect sexual health?",
        [
            "What are common sexual health concerns?",
            "How can I improve my sexual health?",
            "What are common myths about sex?",
        ],
    ),
    (
        "What is the relationship between mental health and sexual health?",
        [
            "How can I improve my sexual health?",
            "What are common sexual health concerns?",
            "How can I improve communication with my partner about sex?",
        ],
    ),
    (
        "How can I maintain sexual wellness during pregnancy?",
        [
            "What are common sexual health concerns?",
            "How can I practice safer sex?",
            "How can I improve communication with my partner about sex?",
        ],
    ),
];

lazy_static::lazy_static! {
    static ref FOLLOW_UPS: HashMap<&'static str, [&'static str; 3]> =
        TOPIC_LINKS.iter().copied().collect();
}

/// Follow-ups for a matched question, or the default triple
pub fn follow_ups_for(question: Option<&str>) -> [&'static str; 3] {
    question
        .and_then(|q| FOLLOW_UPS.get(q).copied())
        .unwrap_or(DEFAULT_FOLLOW_UPS)
}
